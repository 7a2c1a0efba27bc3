use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::load::read_document;

/// Implements `Display`/`FromStr` for a unit-only option enum from a single
/// name table, so the CLI and the settings file agree on spelling.
macro_rules! option_names {
    ($ty:ident, $option:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    other => Err(Error::UnknownOption {
                        option: $option,
                        value: other.to_owned(),
                        expected: concat!($($name, ", "),+).trim_end_matches(", "),
                    }),
                }
            }
        }
    };
}

/// Print layout; every design except `custom` dictates the field set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintDesign {
    #[default]
    Detailed,
    Summary,
    Compact,
    Custom,
}

option_names!(PrintDesign, "print design", {
    Detailed => "detailed",
    Summary => "summary",
    Compact => "compact",
    Custom => "custom",
});

impl PrintDesign {
    /// The field set a design imposes, or `None` for `custom`.
    pub fn preset(self) -> Option<FieldFlags> {
        match self {
            Self::Detailed => Some(FieldFlags::all()),
            Self::Summary => Some(FieldFlags {
                description: true,
                steps: true,
                expected_result: true,
                priority: true,
                outcome: true,
                ..FieldFlags::none()
            }),
            Self::Compact => Some(FieldFlags {
                steps: true,
                priority: true,
                outcome: true,
                ..FieldFlags::none()
            }),
            Self::Custom => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestOrder {
    #[default]
    Original,
    Alphabetical,
    Priority,
    Status,
}

option_names!(TestOrder, "test order", {
    Original => "original",
    Alphabetical => "alphabetical",
    Priority => "priority",
    Status => "status",
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    None,
    Suite,
    Priority,
    Status,
}

option_names!(GroupBy, "grouping", {
    None => "none",
    Suite => "suite",
    Priority => "priority",
    Status => "status",
});

/// The ten optional case attributes an export may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseField {
    Description,
    Preconditions,
    Steps,
    ExpectedResult,
    Variables,
    Tags,
    Priority,
    AutomationStatus,
    LastExecuted,
    Outcome,
}

option_names!(CaseField, "field", {
    Description => "description",
    Preconditions => "preconditions",
    Steps => "steps",
    ExpectedResult => "expectedResult",
    Variables => "variables",
    Tags => "tags",
    Priority => "priority",
    AutomationStatus => "automationStatus",
    LastExecuted => "lastExecuted",
    Outcome => "outcome",
});

/// One inclusion flag per [`CaseField`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldFlags {
    pub description: bool,
    pub preconditions: bool,
    pub steps: bool,
    pub expected_result: bool,
    pub variables: bool,
    pub tags: bool,
    pub priority: bool,
    pub automation_status: bool,
    pub last_executed: bool,
    pub outcome: bool,
}

impl FieldFlags {
    pub fn all() -> Self {
        Self {
            description: true,
            preconditions: true,
            steps: true,
            expected_result: true,
            variables: true,
            tags: true,
            priority: true,
            automation_status: true,
            last_executed: true,
            outcome: true,
        }
    }

    pub fn none() -> Self {
        Self {
            description: false,
            preconditions: false,
            steps: false,
            expected_result: false,
            variables: false,
            tags: false,
            priority: false,
            automation_status: false,
            last_executed: false,
            outcome: false,
        }
    }

    /// Only the listed fields enabled.
    pub fn only(fields: &[CaseField]) -> Self {
        let mut flags = Self::none();
        for &field in fields {
            flags.set(field, true);
        }
        flags
    }

    pub fn get(&self, field: CaseField) -> bool {
        *self.slot(field)
    }

    pub fn set(&mut self, field: CaseField, value: bool) {
        *self.slot_mut(field) = value;
    }

    pub fn enabled(&self) -> impl Iterator<Item = CaseField> + '_ {
        CaseField::ALL.iter().copied().filter(|&f| self.get(f))
    }

    fn slot(&self, field: CaseField) -> &bool {
        match field {
            CaseField::Description => &self.description,
            CaseField::Preconditions => &self.preconditions,
            CaseField::Steps => &self.steps,
            CaseField::ExpectedResult => &self.expected_result,
            CaseField::Variables => &self.variables,
            CaseField::Tags => &self.tags,
            CaseField::Priority => &self.priority,
            CaseField::AutomationStatus => &self.automation_status,
            CaseField::LastExecuted => &self.last_executed,
            CaseField::Outcome => &self.outcome,
        }
    }

    fn slot_mut(&mut self, field: CaseField) -> &mut bool {
        match field {
            CaseField::Description => &mut self.description,
            CaseField::Preconditions => &mut self.preconditions,
            CaseField::Steps => &mut self.steps,
            CaseField::ExpectedResult => &mut self.expected_result,
            CaseField::Variables => &mut self.variables,
            CaseField::Tags => &mut self.tags,
            CaseField::Priority => &mut self.priority,
            CaseField::AutomationStatus => &mut self.automation_status,
            CaseField::LastExecuted => &mut self.last_executed,
            CaseField::Outcome => &mut self.outcome,
        }
    }
}

impl Default for FieldFlags {
    fn default() -> Self {
        Self::all()
    }
}

/// How the selected cases are shaped on export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportSettings {
    pub print_design: PrintDesign,
    pub include_unexecuted_cases: bool,
    pub fields_to_include: FieldFlags,
    pub test_order: TestOrder,
    pub group_by: GroupBy,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            print_design: PrintDesign::Detailed,
            include_unexecuted_cases: true,
            fields_to_include: FieldFlags::all(),
            test_order: TestOrder::Original,
            group_by: GroupBy::None,
        }
    }
}

impl ExportSettings {
    /// Switch design. Any design but `custom` overwrites the field flags.
    #[must_use]
    pub fn with_print_design(mut self, design: PrintDesign) -> Self {
        self.print_design = design;
        if let Some(preset) = design.preset() {
            self.fields_to_include = preset;
        }
        self
    }

    /// Record a manual field choice. The current design's preset is then
    /// re-applied, so the choice only survives under `custom`.
    #[must_use]
    pub fn with_field(mut self, field: CaseField, value: bool) -> Self {
        self.fields_to_include.set(field, value);
        self.with_print_design(self.print_design)
    }

    #[must_use]
    pub fn with_test_order(mut self, order: TestOrder) -> Self {
        self.test_order = order;
        self
    }

    #[must_use]
    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }

    #[must_use]
    pub fn with_unexecuted(mut self, include: bool) -> Self {
        self.include_unexecuted_cases = include;
        self
    }
}

/// Load export settings from a YAML or JSON file.
///
/// Missing keys fall back to defaults, then the design preset is applied.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid settings.
pub fn load_settings(path: &Path) -> Result<ExportSettings> {
    let settings: ExportSettings = read_document(path, "export settings")?;
    Ok(settings.with_print_design(settings.print_design))
}

/// Parse a comma-separated field list such as `steps,priority,outcome`.
///
/// # Errors
///
/// Returns an error naming the first unknown field.
pub fn parse_field_list(input: &str) -> Result<Vec<CaseField>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}
