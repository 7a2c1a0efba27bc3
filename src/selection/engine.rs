use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::model::tree::{find_case, find_plan, find_suite, walk_suites};
use crate::model::{TestPlan, TestSuite};
use crate::selection::{NodeKind, NodeRef, SelectionState};

fn set_membership(ids: &mut BTreeSet<String>, id: &str, select: bool) {
    if select {
        ids.insert(id.to_owned());
    } else {
        ids.remove(id);
    }
}

/// Apply `select` to every suite yielded and to each suite's own cases.
/// Returns how many nodes were visited.
fn cascade<'a>(
    state: &mut SelectionState,
    suites: impl Iterator<Item = &'a TestSuite>,
    select: bool,
) -> usize {
    let mut visited = 0;
    for suite in suites {
        set_membership(&mut state.suites, &suite.id, select);
        for case in &suite.test_cases {
            set_membership(&mut state.cases, &case.id, select);
        }
        visited += 1 + suite.test_cases.len();
    }
    visited
}

/// Toggle one node and cascade the result to its descendants.
///
/// `current` is left untouched; the returned state replaces it. An id that
/// is not in `forest` still flips in its own set, but cascades nowhere.
pub fn toggle(forest: &[TestPlan], current: &SelectionState, node: &NodeRef) -> SelectionState {
    let mut next = current.clone();
    let select = !current.is_selected(node);
    set_membership(next.ids_mut(node.kind), &node.id, select);

    let cascaded = match node.kind {
        NodeKind::Plan => match find_plan(forest, &node.id) {
            Some(plan) => cascade(&mut next, walk_suites(&plan.test_suites), select),
            None => {
                warn!(node = %node, "plan not found in forest, nothing to cascade");
                0
            }
        },
        NodeKind::Suite => match find_suite(forest, &node.id) {
            Some(suite) => {
                // The suite itself is revisited by the walk; its membership is already `select`.
                cascade(&mut next, walk_suites(std::slice::from_ref(suite)), select) - 1
            }
            None => {
                warn!(node = %node, "suite not found in forest, nothing to cascade");
                0
            }
        },
        NodeKind::Case => {
            if find_case(forest, &node.id).is_none() {
                warn!(node = %node, "case not found in forest");
            }
            0
        }
    };

    debug!(
        node = %node,
        selected = select,
        cascaded,
        "toggled node"
    );
    next
}

/// Replay a sequence of toggles starting from an empty selection.
pub fn apply_toggles<'a>(
    forest: &[TestPlan],
    nodes: impl IntoIterator<Item = &'a NodeRef>,
) -> SelectionState {
    nodes
        .into_iter()
        .fold(SelectionState::new(), |state, node| {
            toggle(forest, &state, node)
        })
}
