pub mod diagnostics;
pub mod weekly;

use std::collections::HashSet;

use tracing::debug;

use crate::types::analysis::AnalysisResult;
use crate::types::identifiers::CanonicalIdentity;
pub use diagnostics::diagnose;
pub use weekly::{weekly_report, WEEKLY_PERIOD_DAYS};

/// `part / total * 100`, rounded to two decimals with ties to even
/// (`1/32` gives `3.12`). Zero when `total` is zero.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = part as f64 / total as f64 * 100.0;
    (raw * 100.0).round_ties_even() / 100.0
}

/// Split the roster, in its own order, into members that engaged and members
/// that did not.
pub fn partition<'r>(
    roster: &'r [CanonicalIdentity],
    engaged: &HashSet<&CanonicalIdentity>,
) -> (Vec<&'r CanonicalIdentity>, Vec<&'r CanonicalIdentity>) {
    roster.iter().partition(|member| {
        let hit = engaged.contains(member);
        if hit {
            debug!(username = %member, "match");
        } else {
            debug!(username = %member, "no match");
        }
        hit
    })
}

/// Reconcile a roster against a post's engaged identities.
///
/// Exact matching on canonical keys; `total` counts roster entries as given.
pub fn reconcile(roster: &[CanonicalIdentity], engaged: &[CanonicalIdentity]) -> AnalysisResult {
    let engaged_set: HashSet<&CanonicalIdentity> = engaged.iter().collect();
    let (hits, misses) = partition(roster, &engaged_set);

    let total = roster.len();
    let engaged_count = hits.len();

    debug_assert_eq!(hits.len() + misses.len(), total);

    AnalysisResult {
        total,
        engaged_count,
        percentage: percentage(engaged_count, total),
        engaged: hits.into_iter().cloned().collect(),
        not_engaged: misses.into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_rounds_to_two_decimals() {
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(1, 8), 12.5);
        assert_eq!(percentage(3, 3), 100.0);
    }

    #[test]
    fn percentage_ties_round_to_even() {
        assert_eq!(percentage(1, 32), 3.12);
        assert_eq!(percentage(5, 32), 15.62);
        assert_eq!(percentage(3, 32), 9.38);
    }

    #[test]
    fn percentage_of_empty_total_is_zero() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(5, 0), 0.0);
    }
}
