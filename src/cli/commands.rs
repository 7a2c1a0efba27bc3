use std::fmt::{self, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::debug;

use crate::emit::ExportFormat;
use crate::emit::sink::{DirectorySink, FileSink};
use crate::error::{Error, Result};
use crate::export::document::{build_export_document, confirmation_message, export_file_stem};
use crate::export::settings::{
    CaseField, ExportSettings, FieldFlags, GroupBy, PrintDesign, TestOrder, load_settings,
};
use crate::model::load::load_forest;
use crate::model::tree::{count_nodes, forest_cases, forest_suites};
use crate::model::{TestPlan, TestSuite};
use crate::selection::engine::apply_toggles;
use crate::selection::{NodeRef, SelectionState};

/// Options for the `export` command.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub forest: PathBuf,
    pub toggles: Vec<NodeRef>,
    pub settings: Option<PathBuf>,
    pub design: Option<PrintDesign>,
    pub order: Option<TestOrder>,
    pub group_by: Option<GroupBy>,
    pub exclude_unexecuted: bool,
    pub fields: Option<Vec<CaseField>>,
    pub format: ExportFormat,
    pub output_dir: Option<PathBuf>,
}

impl ExportOptions {
    pub fn new(forest: impl Into<PathBuf>) -> Self {
        Self {
            forest: forest.into(),
            ..Default::default()
        }
    }

    /// Settings file first, then command-line overrides.
    fn resolve_settings(&self) -> Result<ExportSettings> {
        let mut settings = match &self.settings {
            Some(path) => load_settings(path)?,
            None => ExportSettings::default(),
        };
        if let Some(fields) = &self.fields {
            // An explicit field list only makes sense as a custom design.
            settings.fields_to_include = FieldFlags::only(fields);
            settings = settings.with_print_design(PrintDesign::Custom);
        }
        if let Some(design) = self.design {
            settings = settings.with_print_design(design);
        }
        if let Some(order) = self.order {
            settings = settings.with_test_order(order);
        }
        if let Some(group_by) = self.group_by {
            settings = settings.with_group_by(group_by);
        }
        if self.exclude_unexecuted {
            settings = settings.with_unexecuted(false);
        }
        Ok(settings)
    }
}

/// What an export produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    /// The rendered document, when it was not written to a directory.
    pub rendered: Option<String>,
    /// The file written, when an output directory was given.
    pub written: Option<PathBuf>,
    pub message: String,
}

fn load_selection(
    forest_path: &Path,
    toggles: &[NodeRef],
) -> Result<(Vec<TestPlan>, SelectionState)> {
    let forest = load_forest(forest_path)?;
    let selection = apply_toggles(&forest, toggles);
    debug!(
        plans = selection.plans.len(),
        suites = selection.suites.len(),
        cases = selection.cases.len(),
        "selection replayed"
    );
    Ok((forest, selection))
}

/// Run the `export` command: replay the toggles, build the document and
/// render it, writing into `output_dir` when one is given.
///
/// # Errors
///
/// Returns an error if nothing is selected, or if loading, rendering or
/// writing fails.
pub fn run_export(options: &ExportOptions) -> Result<ExportReport> {
    let (forest, selection) = load_selection(&options.forest, &options.toggles)?;
    if !selection.has_selection() {
        return Err(Error::EmptySelection);
    }
    let settings = options.resolve_settings()?;

    let document = build_export_document(&selection, &settings, &forest);
    let rendered = options.format.render(&document)?;
    let message = confirmation_message(&document);

    match &options.output_dir {
        Some(dir) => {
            let file_name = format!(
                "{}.{}",
                export_file_stem(&settings, document.timestamp.date_naive()),
                options.format.extension()
            );
            let mut sink = DirectorySink::new(dir);
            let path = sink.emit(&file_name, rendered.as_bytes())?;
            Ok(ExportReport {
                rendered: None,
                message: format!("{message}\nwritten to {}", path.display()),
                written: Some(path),
            })
        }
        None => Ok(ExportReport {
            rendered: Some(rendered),
            written: None,
            message,
        }),
    }
}

/// Collect text written by `write` into a `String`.
fn render_text(write: impl FnOnce(&mut String) -> fmt::Result) -> Result<String> {
    let mut out = String::new();
    write(&mut out).map_err(|e| Error::Serialize {
        format: "text",
        message: e.to_string(),
    })?;
    Ok(out)
}

/// Run the `summary` command: count what the toggles selected.
///
/// # Errors
///
/// Returns an error if the forest cannot be loaded.
pub fn run_summary(forest_path: &Path, toggles: &[NodeRef]) -> Result<String> {
    let (forest, selection) = load_selection(forest_path, toggles)?;
    render_text(|out| write_summary(out, &forest, &selection))
}

fn write_summary(
    out: &mut String,
    forest: &[TestPlan],
    selection: &SelectionState,
) -> fmt::Result {
    let totals = count_nodes(forest);
    writeln!(
        out,
        "Forest: {} plans, {} suites, {} cases",
        totals.plans, totals.suites, totals.cases
    )?;
    writeln!(out, "Plans selected:  {}", selection.plans.len())?;
    writeln!(out, "Suites selected: {}", selection.suites.len())?;
    writeln!(out, "Cases selected:  {}", selection.cases.len())?;
    let status = if selection.has_selection() {
        "ready"
    } else {
        "nothing selected"
    };
    writeln!(out, "Export: {status}")
}

/// What the `list` command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTarget {
    Plans,
    Suites,
    Cases,
    Tree,
}

impl FromStr for ListTarget {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plans" => Ok(Self::Plans),
            "suites" => Ok(Self::Suites),
            "cases" => Ok(Self::Cases),
            "tree" => Ok(Self::Tree),
            other => Err(Error::UnknownOption {
                option: "list target",
                value: other.to_owned(),
                expected: "plans, suites, cases, tree",
            }),
        }
    }
}

fn marker(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

fn write_suite_tree(
    out: &mut String,
    suite: &TestSuite,
    selection: &SelectionState,
    depth: usize,
) -> fmt::Result {
    let indent = "  ".repeat(depth);
    writeln!(
        out,
        "{indent}{} {} {}",
        marker(selection.suites.contains(&suite.id)),
        suite.id,
        suite.name
    )?;
    for case in &suite.test_cases {
        writeln!(
            out,
            "{indent}  {} {} {}",
            marker(selection.cases.contains(&case.id)),
            case.id,
            case.name
        )?;
    }
    for child in &suite.child_suites {
        write_suite_tree(out, child, selection, depth + 1)?;
    }
    Ok(())
}

fn write_listing(
    out: &mut String,
    what: ListTarget,
    forest: &[TestPlan],
    selection: &SelectionState,
) -> fmt::Result {
    match what {
        ListTarget::Plans => {
            for plan in forest {
                writeln!(out, "{} {} ({})", plan.id, plan.name, plan.state)?;
            }
        }
        ListTarget::Suites => {
            for suite in forest_suites(forest) {
                writeln!(out, "{} {} ({})", suite.id, suite.name, suite.kind)?;
            }
        }
        ListTarget::Cases => {
            for case in forest_cases(forest) {
                let outcome = case.outcome.as_ref().map_or("-", |o| o.as_str());
                writeln!(
                    out,
                    "{} {} (priority {}, {outcome})",
                    case.id, case.name, case.priority
                )?;
            }
        }
        ListTarget::Tree => {
            for plan in forest {
                writeln!(
                    out,
                    "{} {} {}",
                    marker(selection.plans.contains(&plan.id)),
                    plan.id,
                    plan.name
                )?;
                for suite in &plan.test_suites {
                    write_suite_tree(out, suite, selection, 1)?;
                }
            }
        }
    }
    Ok(())
}

/// Run the `list` command: list plans, suites or cases, or print the whole
/// forest with selection markers.
///
/// # Errors
///
/// Returns an error if the forest cannot be loaded.
pub fn run_list(what: ListTarget, forest_path: &Path, toggles: &[NodeRef]) -> Result<String> {
    let (forest, selection) = load_selection(forest_path, toggles)?;
    render_text(|out| write_listing(out, what, &forest, &selection))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_target_parses_known_names() {
        assert_eq!("tree".parse::<ListTarget>().expect("parse"), ListTarget::Tree);
        let err = "edges".parse::<ListTarget>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown list target 'edges' (expected: plans, suites, cases, tree)"
        );
    }

    #[test]
    fn field_list_switches_to_custom_design() {
        let mut options = ExportOptions::new("unused.json");
        options.fields = Some(vec![CaseField::Steps, CaseField::Outcome]);
        let settings = options.resolve_settings().expect("resolve");
        assert_eq!(settings.print_design, PrintDesign::Custom);
        assert!(settings.fields_to_include.steps);
        assert!(!settings.fields_to_include.description);
    }

    #[test]
    fn explicit_design_overrides_field_list() {
        let mut options = ExportOptions::new("unused.json");
        options.fields = Some(vec![CaseField::Steps]);
        options.design = Some(PrintDesign::Detailed);
        let settings = options.resolve_settings().expect("resolve");
        assert_eq!(settings.print_design, PrintDesign::Detailed);
        assert_eq!(settings.fields_to_include, FieldFlags::all());
    }

    #[test]
    fn flags_override_defaults() {
        let mut options = ExportOptions::new("unused.json");
        options.order = Some(TestOrder::Status);
        options.group_by = Some(GroupBy::Priority);
        options.exclude_unexecuted = true;
        let settings = options.resolve_settings().expect("resolve");
        assert_eq!(settings.test_order, TestOrder::Status);
        assert_eq!(settings.group_by, GroupBy::Priority);
        assert!(!settings.include_unexecuted_cases);
    }
}
