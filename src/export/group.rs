use serde::ser::{Serialize, Serializer};

use crate::export::settings::GroupBy;
use crate::model::{TestCase, TestSuite};

/// Label for cases without an outcome when grouping by status.
pub const UNEXECUTED_LABEL: &str = "Sin Ejecutar";
/// Label for cases no selected suite holds when grouping by suite.
pub const NO_SUITE_LABEL: &str = "Sin Suite";

/// A labelled run of cases.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseGroup<T> {
    pub label: String,
    pub cases: Vec<T>,
}

/// Either one flat sequence or labelled groups in first-appearance order.
///
/// Groups serialize as a map keyed by label, keys in group order.
#[derive(Debug, Clone, PartialEq)]
pub enum Grouping<T> {
    Flat(Vec<T>),
    Groups(Vec<CaseGroup<T>>),
}

impl<T> Grouping<T> {
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Grouping<U> {
        match self {
            Self::Flat(cases) => Grouping::Flat(cases.into_iter().map(f).collect()),
            Self::Groups(groups) => Grouping::Groups(
                groups
                    .into_iter()
                    .map(|group| CaseGroup {
                        label: group.label,
                        cases: group.cases.into_iter().map(&mut f).collect(),
                    })
                    .collect(),
            ),
        }
    }

    /// Total number of cases across all groups.
    pub fn len(&self) -> usize {
        match self {
            Self::Flat(cases) => cases.len(),
            Self::Groups(groups) => groups.iter().map(|g| g.cases.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every case in output order, regardless of grouping.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        match self {
            Self::Flat(cases) => Box::new(cases.iter()),
            Self::Groups(groups) => Box::new(groups.iter().flat_map(|g| g.cases.iter())),
        }
    }
}

impl<T: Serialize> Serialize for Grouping<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Flat(cases) => cases.serialize(serializer),
            Self::Groups(groups) => {
                serializer.collect_map(groups.iter().map(|g| (&g.label, &g.cases)))
            }
        }
    }
}

fn label_for(case: &TestCase, group_by: GroupBy, suites: &[&TestSuite]) -> String {
    match group_by {
        GroupBy::None => String::new(),
        GroupBy::Priority => format!("Prioridad {}", case.priority),
        GroupBy::Status => case
            .outcome
            .as_ref()
            .map_or_else(|| UNEXECUTED_LABEL.to_owned(), |o| o.to_string()),
        GroupBy::Suite => suites
            .iter()
            .find(|suite| suite.test_cases.iter().any(|c| c.id == case.id))
            .map_or_else(|| NO_SUITE_LABEL.to_owned(), |suite| suite.name.clone()),
    }
}

/// Group cases, keeping their relative order inside each group.
///
/// For `suite` grouping the label is the name of the first suite in
/// `suites` (the resolved selection) that directly holds the case.
pub fn group_cases<'a>(
    cases: &[&'a TestCase],
    group_by: GroupBy,
    suites: &[&TestSuite],
) -> Grouping<&'a TestCase> {
    if group_by == GroupBy::None {
        return Grouping::Flat(cases.to_vec());
    }

    let mut groups: Vec<CaseGroup<&'a TestCase>> = Vec::new();
    for &case in cases {
        let label = label_for(case, group_by, suites);
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.cases.push(case),
            None => groups.push(CaseGroup {
                label,
                cases: vec![case],
            }),
        }
    }
    Grouping::Groups(groups)
}
