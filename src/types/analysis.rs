use serde::{Deserialize, Serialize};

use crate::types::identifiers::{CanonicalIdentity, Platform, PostId};

/// Outcome of reconciling a roster against one post's engagement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub total: usize,
    pub engaged_count: usize,
    /// `engaged_count / total * 100`, two decimals; `0.0` for an empty roster.
    pub percentage: f64,
    /// Roster members that engaged, in roster order.
    pub engaged: Vec<CanonicalIdentity>,
    /// Roster members that did not, in roster order.
    pub not_engaged: Vec<CanonicalIdentity>,
}

/// A counted list, never truncated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityGroup {
    pub count: usize,
    pub users: Vec<CanonicalIdentity>,
}

impl IdentityGroup {
    pub fn new(users: Vec<CanonicalIdentity>) -> Self {
        Self {
            count: users.len(),
            users,
        }
    }
}

/// Full troubleshooting view of a reconciliation: the [`AnalysisResult`]
/// plus the complete inputs and the engaged identities missing from the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugResult {
    #[serde(flatten)]
    pub analysis: AnalysisResult,
    pub roster: IdentityGroup,
    pub engagement: IdentityGroup,
    /// Identities that engaged but are not on the roster.
    pub extra_engagements: IdentityGroup,
}

impl DebugResult {
    /// Roster members found in the engagement, in roster order.
    pub fn matches(&self) -> &[CanonicalIdentity] {
        &self.analysis.engaged
    }

    pub fn mismatches(&self) -> &[CanonicalIdentity] {
        &self.analysis.not_engaged
    }
}

/// Analysis payload for a single post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostAnalysis {
    pub post_id: PostId,
    pub post_title: String,
    pub platform: Platform,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

/// A counted list with a short head for display next to the full list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampledGroup {
    pub count: usize,
    pub sample: Vec<CanonicalIdentity>,
    pub all: Vec<CanonicalIdentity>,
}

impl SampledGroup {
    pub fn new(all: Vec<CanonicalIdentity>, sample_size: usize) -> Self {
        let sample = all.iter().take(sample_size).cloned().collect();
        Self {
            count: all.len(),
            sample,
            all,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugAnalysis {
    pub matches: IdentityGroup,
    pub mismatches: IdentityGroup,
    pub extra_engagements: IdentityGroup,
}

/// Debug payload for a single post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugReport {
    pub post_title: String,
    pub platform: Platform,
    pub roster_users: SampledGroup,
    pub engagement_users: SampledGroup,
    pub analysis: DebugAnalysis,
}

/// What an upload replaced the stored data with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub count: usize,
    pub platform: Platform,
    pub replaced: usize,
    pub sample_users: Vec<CanonicalIdentity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberEngagement {
    pub username: CanonicalIdentity,
    pub platform: Platform,
    pub engaged_posts: usize,
    pub total_posts: usize,
    pub engagement_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub total_users: usize,
    pub total_posts: usize,
    pub active_users: usize,
}

/// Per-member engagement over the posts of the last seven days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReport {
    pub period_days: i64,
    pub users: Vec<MemberEngagement>,
    pub summary: WeeklySummary,
}
