use std::fmt::{self, Write};

use chrono::SecondsFormat;

use crate::emit::util::humanize;
use crate::error::{Error, Result};
use crate::export::document::ExportDocument;
use crate::export::group::Grouping;
use crate::export::project::ProjectedCase;
use crate::export::settings::CaseField;

/// Emit an export document as a printable Markdown report.
///
/// # Errors
///
/// Returns an error if writing the report fails.
pub fn emit_markdown(document: &ExportDocument) -> Result<String> {
    let mut out = String::new();
    write_document(&mut out, document).map_err(|e| Error::Serialize {
        format: "markdown",
        message: e.to_string(),
    })?;
    Ok(out)
}

fn write_document(out: &mut String, doc: &ExportDocument) -> fmt::Result {
    let settings = &doc.settings;
    let summary = &doc.summary;

    writeln!(out, "# Test Plan Export")?;
    writeln!(out)?;
    writeln!(
        out,
        "**Exported:** {} | **Design:** {} | **Order:** {} | **Grouped by:** {}",
        doc.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        settings.print_design,
        settings.test_order,
        settings.group_by
    )?;
    writeln!(out)?;
    write!(
        out,
        "**Plans:** {} | **Suites:** {} | **Cases:** {}",
        summary.test_plans_count, summary.test_suites_count, summary.test_cases_count
    )?;
    if summary.filtered_cases_count > 0 {
        write!(out, " | **Excluded (unexecuted):** {}", summary.filtered_cases_count)?;
    }
    writeln!(out)?;

    if !doc.data.test_plans.is_empty() {
        writeln!(out)?;
        writeln!(out, "## Test Plans")?;
        writeln!(out)?;
        for plan in &doc.data.test_plans {
            write!(out, "- **{}** (`{}`, {})", plan.name, plan.id, plan.state)?;
            if let Some(desc) = &plan.description {
                write!(out, ": {desc}")?;
            }
            writeln!(out)?;
        }
    }

    if !doc.data.test_suites.is_empty() {
        writeln!(out)?;
        writeln!(out, "## Test Suites")?;
        writeln!(out)?;
        for suite in &doc.data.test_suites {
            writeln!(out, "- **{}** (`{}`, {})", suite.name, suite.id, suite.kind)?;
        }
    }

    writeln!(out)?;
    writeln!(out, "## Test Cases")?;
    match &doc.data.test_cases {
        Grouping::Flat(cases) => {
            for case in cases {
                write_case(out, case, "###")?;
            }
        }
        Grouping::Groups(groups) => {
            for group in groups {
                writeln!(out)?;
                writeln!(out, "### {} ({})", group.label, group.cases.len())?;
                for case in &group.cases {
                    write_case(out, case, "####")?;
                }
            }
        }
    }

    Ok(())
}

/// Printable text of one projected field, if the projection kept it.
fn field_text(case: &ProjectedCase, field: CaseField) -> Option<String> {
    match field {
        CaseField::Description => case.description.clone(),
        CaseField::Preconditions => case.preconditions.clone(),
        CaseField::Steps => case.steps.clone(),
        CaseField::ExpectedResult => case.expected_result.clone(),
        CaseField::Variables => case.variables.as_ref().map(|v| v.join(", ")),
        CaseField::Tags => case
            .tags
            .as_ref()
            .map(|tags| tags.iter().map(|t| format!("`{t}`")).collect::<Vec<_>>().join(", ")),
        CaseField::Priority => case.priority.map(|p| p.to_string()),
        CaseField::AutomationStatus => case.automation_status.map(|s| s.to_string()),
        CaseField::LastExecuted => case.last_executed.clone(),
        CaseField::Outcome => case.outcome.as_ref().map(|o| o.to_string()),
    }
}

fn write_case(out: &mut String, case: &ProjectedCase, heading: &str) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{heading} {}: {}", case.id, case.name)?;
    writeln!(out)?;
    writeln!(out, "- **State:** {}", case.state)?;

    for &field in CaseField::ALL {
        let Some(text) = field_text(case, field) else {
            continue;
        };
        let label = humanize(field.as_str());
        if text.contains('\n') {
            writeln!(out, "- **{label}:**")?;
            for line in text.lines() {
                writeln!(out, "  {line}")?;
            }
        } else {
            writeln!(out, "- **{label}:** {text}")?;
        }
    }
    Ok(())
}
