use crate::model::tree::{forest_cases, forest_suites};
use crate::model::{TestCase, TestPlan, TestSuite};
use crate::selection::SelectionState;

/// Forest entities whose ids are in a selection, in forest order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSelection<'a> {
    pub plans: Vec<&'a TestPlan>,
    pub suites: Vec<&'a TestSuite>,
    pub cases: Vec<&'a TestCase>,
}

/// Match each tier of `selection` against the forest independently.
///
/// A suite is included only if its own id is selected, regardless of its
/// parent or children. Cases are searched for under every suite of every
/// plan, so a selected case is found even when its suite is not selected.
pub fn resolve_selection<'a>(
    selection: &SelectionState,
    forest: &'a [TestPlan],
) -> ResolvedSelection<'a> {
    ResolvedSelection {
        plans: forest
            .iter()
            .filter(|plan| selection.plans.contains(&plan.id))
            .collect(),
        suites: forest_suites(forest)
            .filter(|suite| selection.suites.contains(&suite.id))
            .collect(),
        cases: forest_cases(forest)
            .filter(|case| selection.cases.contains(&case.id))
            .collect(),
    }
}
