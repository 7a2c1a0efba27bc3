use std::cmp::Ordering;

use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed, CollatorPreferences};

use crate::export::settings::TestOrder;
use crate::model::{Outcome, TestCase};

/// Rank used by `status` ordering. A missing outcome ranks as `Not Executed`;
/// outcomes outside the known set rank last.
pub fn status_rank(outcome: Option<&Outcome>) -> u8 {
    match outcome {
        Some(Outcome::Passed) => 1,
        Some(Outcome::Failed) => 2,
        Some(Outcome::Blocked) => 3,
        Some(Outcome::NotExecuted) | None => 4,
        Some(Outcome::Other(_)) => 5,
    }
}

thread_local! {
    /// Root-locale collator at default (tertiary) strength.
    static ROOT_COLLATOR: Option<CollatorBorrowed<'static>> =
        Collator::try_new(CollatorPreferences::default(), CollatorOptions::default()).ok();
}

/// Compare names the way a browser's `localeCompare` does: accents and case
/// only break ties between otherwise equal letters, lowercase first.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    ROOT_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(a, b),
        None => a.cmp(b),
    })
}

/// Order cases for export. Every ordering is stable: ties keep input order.
pub fn sort_cases<'a>(cases: &[&'a TestCase], order: TestOrder) -> Vec<&'a TestCase> {
    let mut sorted = cases.to_vec();
    match order {
        TestOrder::Original => {}
        TestOrder::Alphabetical => sorted.sort_by(|a, b| locale_compare(&a.name, &b.name)),
        TestOrder::Priority => sorted.sort_by_key(|case| case.priority),
        TestOrder::Status => sorted.sort_by_key(|case| status_rank(case.outcome.as_ref())),
    }
    sorted
}
