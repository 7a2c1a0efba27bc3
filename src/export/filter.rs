use crate::model::{Outcome, TestCase};

/// A case counts as executed when it has an outcome other than `Not Executed`.
pub fn is_executed(case: &TestCase) -> bool {
    matches!(&case.outcome, Some(outcome) if *outcome != Outcome::NotExecuted)
}

/// Drop never-executed cases unless `include_unexecuted` is set.
///
/// A missing outcome is treated as `Not Executed`. Order is preserved.
pub fn filter_unexecuted<'a>(
    cases: &[&'a TestCase],
    include_unexecuted: bool,
) -> Vec<&'a TestCase> {
    if include_unexecuted {
        return cases.to_vec();
    }
    cases.iter().copied().filter(|case| is_executed(case)).collect()
}
