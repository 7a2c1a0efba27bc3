use std::collections::HashSet;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::TestPlan;
use crate::model::tree::{forest_cases, forest_suites};

/// Text formats accepted for input documents (forests and settings).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Yaml,
}

impl InputFormat {
    /// Pick the format from a file extension, defaulting to JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

pub(crate) fn parse_document<T: DeserializeOwned>(
    text: &str,
    format: InputFormat,
) -> std::result::Result<T, String> {
    match format {
        InputFormat::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
        InputFormat::Yaml => serde_yaml::from_str(text).map_err(|e| e.to_string()),
    }
}

/// Read and deserialize a JSON or YAML document from disk.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path, what: &'static str) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&text, InputFormat::from_path(path)).map_err(|message| Error::Parse {
        path: path.to_path_buf(),
        what,
        message,
    })
}

/// Parse a forest from text and check the containment invariant.
///
/// # Errors
///
/// Returns an error if the text is not a valid forest or an id repeats.
pub fn parse_forest(text: &str, format: InputFormat) -> Result<Vec<TestPlan>> {
    let forest: Vec<TestPlan> = parse_document(text, format).map_err(|message| Error::Parse {
        path: "<input>".into(),
        what: "forest",
        message,
    })?;
    validate_unique_ids(&forest)?;
    Ok(forest)
}

/// Load a forest from a `.json`, `.yaml` or `.yml` file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or an id repeats.
pub fn load_forest(path: &Path) -> Result<Vec<TestPlan>> {
    let forest: Vec<TestPlan> = read_document(path, "forest")?;
    validate_unique_ids(&forest)?;
    debug!(
        path = %path.display(),
        plans = forest.len(),
        "loaded forest"
    );
    Ok(forest)
}

/// Ensure no plan, suite or case id appears twice within its kind.
///
/// # Errors
///
/// Returns [`Error::DuplicateId`] naming the first repeated id.
pub fn validate_unique_ids(forest: &[TestPlan]) -> Result<()> {
    fn check<'a>(ids: impl Iterator<Item = &'a str>) -> Result<()> {
        let mut seen = HashSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(Error::DuplicateId(id.to_owned()));
            }
        }
        Ok(())
    }

    check(forest.iter().map(|p| p.id.as_str()))?;
    check(forest_suites(forest).map(|s| s.id.as_str()))?;
    check(forest_cases(forest).map(|c| c.id.as_str()))
}
