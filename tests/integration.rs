use std::path::PathBuf;

use serde_json::Value;

use tpsel::Error;
use tpsel::cli::commands::{ExportOptions, ListTarget, run_export, run_list, run_summary};
use tpsel::emit::ExportFormat;
use tpsel::export::settings::{CaseField, GroupBy, TestOrder};
use tpsel::selection::NodeRef;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn export_options(toggles: &[&str]) -> ExportOptions {
    let mut options = ExportOptions::new(fixture("forest.json"));
    options.toggles = toggles
        .iter()
        .map(|t| t.parse().expect("valid node reference"))
        .collect();
    options
}

fn rendered_json(options: &ExportOptions) -> Value {
    let report = run_export(options).expect("export should succeed");
    let rendered = report.rendered.expect("document printed to stdout");
    serde_json::from_str(&rendered).expect("valid JSON document")
}

fn case_ids(cases: &Value) -> Vec<&str> {
    cases
        .as_array()
        .expect("flat case list")
        .iter()
        .map(|c| c["id"].as_str().expect("case id"))
        .collect()
}

// ── export command ─────────────────────────────────────────

#[test]
fn export_plan_prints_json_document() {
    let doc = rendered_json(&export_options(&["plan:tp-2"]));
    assert_eq!(doc["selection"]["selectedTestPlans"][0], "tp-2");
    assert_eq!(doc["data"]["testPlans"][0]["name"], "API Test Plan");
    assert_eq!(doc["data"]["testSuites"][0]["type"], "RequirementTestSuite");
    assert_eq!(case_ids(&doc["data"]["testCases"]), vec!["tc-7", "tc-8", "tc-9"]);
    assert_eq!(doc["summary"]["testCasesCount"], 3);
    assert_eq!(doc["summary"]["filteredCasesCount"], 0);
}

#[test]
fn export_nested_suite_cascade_reaches_child_suite() {
    let doc = rendered_json(&export_options(&["suite:ts-2"]));
    assert_eq!(case_ids(&doc["data"]["testCases"]), vec!["tc-4", "tc-5", "tc-6"]);
    assert_eq!(doc["summary"]["testSuitesCount"], 2);
    assert_eq!(doc["summary"]["testPlansCount"], 0);
}

#[test]
fn export_excluding_unexecuted_reports_the_count() {
    let mut options = export_options(&["plan:tp-2"]);
    options.exclude_unexecuted = true;
    let report = run_export(&options).expect("export should succeed");
    assert_eq!(
        report.message,
        "Export complete: 2 test cases exported (1 unexecuted excluded)"
    );
}

#[test]
fn export_case_without_outcome_counts_as_unexecuted() {
    let mut options = export_options(&["plan:tp-3"]);
    options.exclude_unexecuted = true;
    let doc = rendered_json(&options);
    assert_eq!(doc["summary"]["testCasesCount"], 0);
    assert_eq!(doc["summary"]["filteredCasesCount"], 1);
}

#[test]
fn export_with_settings_file_sorts_then_groups() {
    let mut options = export_options(&["plan:tp-1"]);
    options.settings = Some(fixture("compact_settings.yaml"));
    let report = run_export(&options).expect("export should succeed");
    let rendered = report.rendered.expect("document printed to stdout");

    // Group keys appear in first-appearance order after the priority sort.
    let passed = rendered.find("\"Passed\"").expect("Passed group");
    let not_executed = rendered.find("\"Not Executed\": [").expect("Not Executed group");
    let failed = rendered.find("\"Failed\": [").expect("Failed group");
    let blocked = rendered.find("\"Blocked\": [").expect("Blocked group");
    assert!(passed < not_executed && not_executed < failed && failed < blocked);

    let doc: Value = serde_json::from_str(&rendered).expect("valid JSON document");
    assert_eq!(doc["settings"]["printDesign"], "compact");
    let passed_cases = &doc["data"]["testCases"]["Passed"];
    assert_eq!(case_ids(passed_cases), vec!["tc-1", "tc-5", "tc-2"]);
    let first = &passed_cases[0];
    assert!(first.get("steps").is_some());
    assert!(first.get("priority").is_some());
    assert!(first.get("description").is_none());
    assert!(first.get("tags").is_none());
}

#[test]
fn export_flags_override_settings_file() {
    let mut options = export_options(&["plan:tp-1"]);
    options.settings = Some(fixture("compact_settings.yaml"));
    options.order = Some(TestOrder::Original);
    options.group_by = Some(GroupBy::None);
    let doc = rendered_json(&options);
    assert_eq!(doc["settings"]["testOrder"], "original");
    assert_eq!(
        case_ids(&doc["data"]["testCases"]),
        vec!["tc-1", "tc-2", "tc-3", "tc-4", "tc-5", "tc-6"]
    );
}

#[test]
fn export_custom_field_list_keeps_only_those_fields() {
    let mut options = export_options(&["case:tc-1"]);
    options.fields = Some(vec![CaseField::Tags]);
    let doc = rendered_json(&options);
    assert_eq!(doc["settings"]["printDesign"], "custom");
    let case = &doc["data"]["testCases"][0];
    assert_eq!(case["tags"][0], "smoke");
    assert!(case.get("steps").is_none());
    assert!(case.get("outcome").is_none());
}

#[test]
fn export_writes_file_into_output_dir() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut options = export_options(&["plan:tp-1"]);
    options.order = Some(TestOrder::Priority);
    options.output_dir = Some(tmp.path().join("exports"));

    let report = run_export(&options).expect("export should succeed");
    assert!(report.rendered.is_none());
    let path = report.written.expect("file written");
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .expect("utf-8 file name");
    assert!(name.starts_with("azure-devops-export-priority-"));
    assert!(name.ends_with(".json"));
    assert!(report.message.starts_with("Export complete: 6 test cases exported"));

    let contents = std::fs::read_to_string(&path).expect("read export back");
    let doc: Value = serde_json::from_str(&contents).expect("valid JSON document");
    assert_eq!(doc["summary"]["testCasesCount"], 6);
}

#[test]
fn export_markdown_uses_md_extension() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let mut options = export_options(&["suite:ts-4"]);
    options.format = ExportFormat::Markdown;
    options.output_dir = Some(tmp.path().to_path_buf());

    let report = run_export(&options).expect("export should succeed");
    let path = report.written.expect("file written");
    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("md"));
    let contents = std::fs::read_to_string(&path).expect("read export back");
    assert!(contents.contains("### tc-8: POST endpoint validation"));
}

#[test]
fn export_yaml_to_stdout() {
    let mut options = export_options(&["case:tc-6"]);
    options.format = ExportFormat::Yaml;
    let report = run_export(&options).expect("export should succeed");
    let rendered = report.rendered.expect("document printed to stdout");
    assert!(rendered.contains("printDesign: detailed"));
    assert!(rendered.contains("automationStatus: Planned"));
}

#[test]
fn export_with_empty_selection_is_refused() {
    let err = run_export(&export_options(&[])).unwrap_err();
    assert!(matches!(err, Error::EmptySelection));

    // Toggling the same plan twice leaves nothing selected.
    let err = run_export(&export_options(&["plan:tp-1", "plan:tp-1"])).unwrap_err();
    assert!(matches!(err, Error::EmptySelection));
}

#[test]
fn export_reads_yaml_forest() {
    let mut options = ExportOptions::new(fixture("forest.yaml"));
    options.toggles = vec![NodeRef::plan("tp-9")];
    options.order = Some(TestOrder::Alphabetical);
    let doc = rendered_json(&options);
    assert_eq!(
        case_ids(&doc["data"]["testCases"]),
        vec!["tc-92", "tc-93", "tc-91"]
    );
}

#[test]
fn export_rejects_duplicate_ids() {
    let mut options = ExportOptions::new(fixture("duplicate_ids.json"));
    options.toggles = vec![NodeRef::plan("tp-1")];
    let err = run_export(&options).unwrap_err();
    assert_eq!(err.to_string(), "duplicate id 'tc-1' in forest");
}

#[test]
fn export_reports_missing_forest() {
    let options = ExportOptions::new(fixture("does_not_exist.json"));
    let err = run_export(&options).unwrap_err();
    assert!(matches!(err, Error::Read { .. }));
    assert!(err.to_string().starts_with("failed to read"));
}

// ── summary command ────────────────────────────────────────

#[test]
fn summary_counts_cascaded_selection() {
    let out = run_summary(&fixture("forest.json"), &[NodeRef::suite("ts-2")])
        .expect("summary should succeed");
    assert!(out.starts_with("Forest: 3 plans, 5 suites, 10 cases\n"));
    assert!(out.contains("Plans selected:  0"));
    assert!(out.contains("Suites selected: 2"));
    assert!(out.contains("Cases selected:  3"));
    assert!(out.contains("Export: ready"));
}

#[test]
fn summary_without_toggles_is_not_ready() {
    let out = run_summary(&fixture("forest.json"), &[]).expect("summary should succeed");
    assert!(out.contains("Export: nothing selected"));
}

// ── list command ───────────────────────────────────────────

#[test]
fn list_suites_walks_nested_suites() {
    let out = run_list(ListTarget::Suites, &fixture("forest.json"), &[])
        .expect("list should succeed");
    let ids: Vec<&str> = out
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(ids, vec!["ts-1", "ts-2", "ts-3", "ts-4", "ts-5"]);
}

#[test]
fn list_cases_shows_missing_outcome_as_dash() {
    let out = run_list(ListTarget::Cases, &fixture("forest.json"), &[])
        .expect("list should succeed");
    assert!(out.contains("tc-10 Concurrent user load test (priority 1, -)"));
    assert!(out.contains("tc-4 Navigation menu functionality (priority 2, Failed)"));
}

#[test]
fn list_tree_marks_selected_nodes() {
    let out = run_list(
        ListTarget::Tree,
        &fixture("forest.json"),
        &[NodeRef::case("tc-1")],
    )
    .expect("list should succeed");
    assert!(out.contains("[ ] tp-1 Web Application Test Plan\n"));
    assert!(out.contains("  [ ] ts-1 Authentication Tests\n"));
    assert!(out.contains("    [x] tc-1 Login with valid credentials\n"));
    assert!(out.contains("    [ ] tc-2 Login with invalid credentials\n"));
    assert!(out.contains("    [ ] ts-3 Mobile UI Tests\n"));
    assert!(out.contains("      [ ] tc-6 Responsive design validation\n"));
}

#[test]
fn list_tree_after_plan_toggle_marks_everything_below() {
    let out = run_list(
        ListTarget::Tree,
        &fixture("forest.json"),
        &[NodeRef::plan("tp-2")],
    )
    .expect("list should succeed");
    assert!(out.contains("[x] tp-2 API Test Plan\n"));
    assert!(out.contains("  [x] ts-4 REST API Tests\n"));
    assert!(out.contains("    [x] tc-9 Authentication headers\n"));
    assert!(out.contains("[ ] tp-3 Performance Test Plan\n"));
}
