use crate::error::{Error, Result};
use crate::export::document::ExportDocument;

/// Emit an export document as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn emit_json(document: &ExportDocument) -> Result<String> {
    serde_json::to_string_pretty(document).map_err(|e| Error::Serialize {
        format: "json",
        message: e.to_string(),
    })
}
