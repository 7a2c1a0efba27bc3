use crate::error::{Error, Result};
use crate::export::document::ExportDocument;

/// Emit an export document as YAML.
///
/// # Errors
///
/// Returns an error if YAML serialization fails.
pub fn emit_yaml(document: &ExportDocument) -> Result<String> {
    serde_yaml::to_string(document).map_err(|e| Error::Serialize {
        format: "yaml",
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::test_documents::{grouped_document, plan_document};

    #[test]
    fn emits_top_level_sections() {
        let yaml = emit_yaml(&plan_document()).expect("emit failed");
        assert!(yaml.contains("settings:"));
        assert!(yaml.contains("selection:"));
        assert!(yaml.contains("data:"));
        assert!(yaml.contains("summary:"));
    }

    #[test]
    fn emits_settings_with_source_names() {
        let yaml = emit_yaml(&plan_document()).expect("emit failed");
        assert!(yaml.contains("printDesign: detailed"));
        assert!(yaml.contains("testOrder: original"));
    }

    #[test]
    fn emits_selection_ids() {
        let yaml = emit_yaml(&plan_document()).expect("emit failed");
        assert!(yaml.contains("selectedTestPlans:"));
        assert!(yaml.contains("- tp-1"));
    }

    #[test]
    fn emits_grouped_cases_as_mapping() {
        let yaml = emit_yaml(&grouped_document()).expect("emit failed");
        assert!(yaml.contains("Prioridad 2:"));
        assert!(yaml.contains("Prioridad 1:"));
    }

    #[test]
    fn emits_summary_counts() {
        let yaml = emit_yaml(&plan_document()).expect("emit failed");
        assert!(yaml.contains("testPlansCount: 1"));
        assert!(yaml.contains("filteredCasesCount: 0"));
    }
}
