pub mod analysis;
pub mod identifiers;
pub mod records;

pub use analysis::{
    AnalysisResult, DebugAnalysis, DebugReport, DebugResult, IdentityGroup, MemberEngagement,
    PostAnalysis, SampledGroup, UploadSummary, WeeklyReport, WeeklySummary,
};
pub use identifiers::{
    CanonicalIdentity, IdentityError, Platform, PlatformError, PostId, SnapshotVersion,
};
pub use records::{EngagementRecord, NewPost, Post, PostOverview, RosterEntry};
