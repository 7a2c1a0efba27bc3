use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use tracing::info;

use crate::export::filter::filter_unexecuted;
use crate::export::group::{Grouping, group_cases};
use crate::export::project::{ProjectedCase, ProjectedPlan, ProjectedSuite, project_fields};
use crate::export::resolve::resolve_selection;
use crate::export::settings::{ExportSettings, PrintDesign, TestOrder};
use crate::export::sort::sort_cases;
use crate::model::TestPlan;
use crate::selection::SelectionState;

/// Prefix of every exported file name.
pub const FILE_PREFIX: &str = "azure-devops-export";

/// The self-describing result of one export.
#[derive(Debug, Clone, Serialize)]
pub struct ExportDocument {
    #[serde(serialize_with = "iso_timestamp")]
    pub timestamp: DateTime<Utc>,
    pub settings: ExportSettings,
    pub selection: SelectionState,
    pub data: ExportData,
    pub summary: ExportSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportData {
    pub test_plans: Vec<ProjectedPlan>,
    pub test_suites: Vec<ProjectedSuite>,
    pub test_cases: Grouping<ProjectedCase>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSummary {
    /// Selected plan ids, including ids the forest does not hold.
    pub test_plans_count: usize,
    /// Selected suite ids, including ids the forest does not hold.
    pub test_suites_count: usize,
    /// Cases exported, after the unexecuted filter.
    pub test_cases_count: usize,
    /// Cases dropped by the unexecuted filter.
    pub filtered_cases_count: usize,
}

fn iso_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Run the export pipeline, stamped with the current time.
pub fn build_export_document(
    selection: &SelectionState,
    settings: &ExportSettings,
    forest: &[TestPlan],
) -> ExportDocument {
    build_export_document_at(selection, settings, forest, Utc::now())
}

/// Resolve → filter → sort → group → project, stamped with `timestamp`.
pub fn build_export_document_at(
    selection: &SelectionState,
    settings: &ExportSettings,
    forest: &[TestPlan],
    timestamp: DateTime<Utc>,
) -> ExportDocument {
    let resolved = resolve_selection(selection, forest);
    let kept = filter_unexecuted(&resolved.cases, settings.include_unexecuted_cases);
    let filtered_cases_count = resolved.cases.len() - kept.len();
    let sorted = sort_cases(&kept, settings.test_order);
    let test_cases = group_cases(&sorted, settings.group_by, &resolved.suites)
        .map(|case| project_fields(case, &settings.fields_to_include));

    let summary = ExportSummary {
        test_plans_count: selection.plans.len(),
        test_suites_count: selection.suites.len(),
        test_cases_count: test_cases.len(),
        filtered_cases_count,
    };
    info!(
        plans = summary.test_plans_count,
        suites = summary.test_suites_count,
        cases = summary.test_cases_count,
        filtered = summary.filtered_cases_count,
        design = %settings.print_design,
        order = %settings.test_order,
        group_by = %settings.group_by,
        "built export document"
    );

    ExportDocument {
        timestamp,
        settings: *settings,
        selection: selection.clone(),
        data: ExportData {
            test_plans: resolved.plans.iter().map(|p| ProjectedPlan::from(*p)).collect(),
            test_suites: resolved.suites.iter().map(|s| ProjectedSuite::from(*s)).collect(),
            test_cases,
        },
        summary,
    }
}

/// `azure-devops-export[-{design}][-{order}]-{date}`, omitting the design
/// when `detailed` and the order when `original`.
pub fn export_file_stem(settings: &ExportSettings, date: NaiveDate) -> String {
    let mut stem = FILE_PREFIX.to_owned();
    if settings.print_design != PrintDesign::Detailed {
        stem.push('-');
        stem.push_str(settings.print_design.as_str());
    }
    if settings.test_order != TestOrder::Original {
        stem.push('-');
        stem.push_str(settings.test_order.as_str());
    }
    stem.push('-');
    stem.push_str(&date.format("%Y-%m-%d").to_string());
    stem
}

/// The message shown once an export has been written.
pub fn confirmation_message(document: &ExportDocument) -> String {
    let summary = &document.summary;
    let mut message = format!(
        "Export complete: {} test case{} exported",
        summary.test_cases_count,
        if summary.test_cases_count == 1 { "" } else { "s" }
    );
    if summary.filtered_cases_count > 0 {
        message.push_str(&format!(
            " ({} unexecuted excluded)",
            summary.filtered_cases_count
        ));
    }
    message
}
