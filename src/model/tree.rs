use crate::model::{TestCase, TestPlan, TestSuite};

/// Pre-order, depth-first walk over a suite subtree.
///
/// Yields each suite before its children, children in declaration order.
pub struct SuiteWalk<'a> {
    stack: Vec<&'a TestSuite>,
}

impl<'a> Iterator for SuiteWalk<'a> {
    type Item = &'a TestSuite;

    fn next(&mut self) -> Option<Self::Item> {
        let suite = self.stack.pop()?;
        self.stack.extend(suite.child_suites.iter().rev());
        Some(suite)
    }
}

/// Walk `suites` and every suite nested beneath them.
pub fn walk_suites(suites: &[TestSuite]) -> SuiteWalk<'_> {
    SuiteWalk {
        stack: suites.iter().rev().collect(),
    }
}

/// Every suite in the forest, plan by plan, in pre-order.
pub fn forest_suites(forest: &[TestPlan]) -> impl Iterator<Item = &TestSuite> {
    forest.iter().flat_map(|plan| walk_suites(&plan.test_suites))
}

/// Every case in the forest, in the order their suites are walked.
pub fn forest_cases(forest: &[TestPlan]) -> impl Iterator<Item = &TestCase> {
    forest_suites(forest).flat_map(|suite| suite.test_cases.iter())
}

pub fn find_plan<'a>(forest: &'a [TestPlan], id: &str) -> Option<&'a TestPlan> {
    forest.iter().find(|plan| plan.id == id)
}

/// Find a suite at any depth.
pub fn find_suite<'a>(forest: &'a [TestPlan], id: &str) -> Option<&'a TestSuite> {
    forest_suites(forest).find(|suite| suite.id == id)
}

pub fn find_case<'a>(forest: &'a [TestPlan], id: &str) -> Option<&'a TestCase> {
    forest_cases(forest).find(|case| case.id == id)
}

/// Totals of each node kind in a forest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeCounts {
    pub plans: usize,
    pub suites: usize,
    pub cases: usize,
}

pub fn count_nodes(forest: &[TestPlan]) -> NodeCounts {
    NodeCounts {
        plans: forest.len(),
        suites: forest_suites(forest).count(),
        cases: forest_cases(forest).count(),
    }
}
