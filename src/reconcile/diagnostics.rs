use std::collections::HashSet;

use tracing::info;

use super::reconcile;
use crate::types::analysis::{DebugResult, IdentityGroup};
use crate::types::identifiers::CanonicalIdentity;

/// Reconcile and additionally enumerate engaged identities missing from the roster.
///
/// Every list is returned in full. Extra engagements keep the order in which
/// they first appear in `engaged` and are listed once each.
pub fn diagnose(roster: &[CanonicalIdentity], engaged: &[CanonicalIdentity]) -> DebugResult {
    let analysis = reconcile(roster, engaged);

    let roster_set: HashSet<&CanonicalIdentity> = roster.iter().collect();
    let mut seen = HashSet::new();
    let extra: Vec<CanonicalIdentity> = engaged
        .iter()
        .filter(|id| !roster_set.contains(id) && seen.insert(*id))
        .cloned()
        .collect();

    info!(
        roster = roster.len(),
        engaged = engaged.len(),
        matches = analysis.engaged_count,
        mismatches = analysis.not_engaged.len(),
        extra = extra.len(),
        "diagnostics computed"
    );

    DebugResult {
        analysis,
        roster: IdentityGroup::new(roster.to_vec()),
        engagement: IdentityGroup::new(engaged.to_vec()),
        extra_engagements: IdentityGroup::new(extra),
    }
}
