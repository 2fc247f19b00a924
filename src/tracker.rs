use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::IngestConfig;
use crate::ingest::{IngestError, Ingestor};
use crate::reconcile::{diagnose, reconcile, weekly_report};
use crate::store::EngagementStore;
use crate::types::analysis::{
    DebugAnalysis, DebugReport, IdentityGroup, PostAnalysis, SampledGroup, UploadSummary,
    WeeklyReport,
};
use crate::types::identifiers::{CanonicalIdentity, IdentityError, Platform, PostId};
use crate::types::records::{NewPost, Post, PostOverview, RosterEntry};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("Post not found: {0}")]
    PostNotFound(PostId),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<IdentityError> for TrackerError {
    fn from(err: IdentityError) -> Self {
        TrackerError::Validation(err.to_string())
    }
}

/// The operations behind the upload, analysis and debug endpoints.
///
/// Generic over the storage collaborator. Parsing always completes before the
/// store is touched, so a failed upload leaves stored data unchanged.
pub struct EngagementTracker<S> {
    store: S,
    ingestor: Ingestor,
}

impl<S: EngagementStore> EngagementTracker<S> {
    pub fn new(store: S, config: IngestConfig) -> Self {
        Self {
            store,
            ingestor: Ingestor::new(config),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn config(&self) -> &IngestConfig {
        self.ingestor.config()
    }

    fn require_post(&self, id: &PostId) -> Result<Post, TrackerError> {
        self.store
            .post(id)
            .ok_or_else(|| TrackerError::PostNotFound(id.clone()))
    }

    /// Parse an uploaded roster and make it the platform's entire roster.
    pub fn upload_roster(
        &mut self,
        platform: Platform,
        bytes: &[u8],
        media_type: &str,
    ) -> Result<UploadSummary, TrackerError> {
        info!(%platform, media_type, "starting roster upload");
        let roster = self.ingestor.ingest(bytes, media_type)?;

        let sample_users = roster
            .iter()
            .take(self.config().upload_sample_size)
            .cloned()
            .collect();
        let count = roster.len();

        let replaced = self.store.replace_roster(platform, roster);
        info!(%platform, replaced, inserted = count, "roster replaced");

        Ok(UploadSummary {
            count,
            platform,
            replaced,
            sample_users,
        })
    }

    /// Add one manually entered member to a platform roster.
    pub fn add_member(&mut self, platform: Platform, raw: &str) -> Result<RosterEntry, TrackerError> {
        let username = CanonicalIdentity::try_from_raw(raw)?;
        self.store.add_roster_entry(platform, username.clone());
        debug!(%platform, %username, "member added");
        Ok(RosterEntry { username, platform })
    }

    pub fn remove_member(&mut self, platform: Platform, username: &CanonicalIdentity) -> bool {
        self.store.remove_roster_entry(platform, username)
    }

    pub fn roster(&self, platform: Platform) -> Vec<CanonicalIdentity> {
        self.store.roster(platform)
    }

    pub fn create_post(&mut self, new_post: NewPost) -> Result<Post, TrackerError> {
        self.create_post_at(new_post, Utc::now())
    }

    /// Like [`EngagementTracker::create_post`] with an explicit creation time.
    pub fn create_post_at(
        &mut self,
        new_post: NewPost,
        created_at: DateTime<Utc>,
    ) -> Result<Post, TrackerError> {
        if new_post.title.trim().is_empty() {
            return Err(TrackerError::Validation("post title must not be empty".into()));
        }
        let post = new_post.into_post(PostId::generate(), created_at);
        self.store.insert_post(post.clone());
        info!(post = %post.id, title = %post.title, "post created");
        Ok(post)
    }

    pub fn list_posts(&self) -> Vec<PostOverview> {
        self.store
            .posts()
            .into_iter()
            .map(|post| {
                let engagement_count = self.store.engagements(&post.id).len();
                PostOverview {
                    post,
                    has_engagement_data: engagement_count > 0,
                    engagement_count,
                }
            })
            .collect()
    }

    /// Delete a post together with all of its engagement.
    pub fn delete_post(&mut self, id: &PostId) -> Result<(), TrackerError> {
        if !self.store.delete_post(id) {
            return Err(TrackerError::PostNotFound(id.clone()));
        }
        info!(post = %id, "post and engagement deleted");
        Ok(())
    }

    /// Parse an engagement export and make it the post's entire engagement set.
    pub fn upload_engagement(
        &mut self,
        post_id: &PostId,
        bytes: &[u8],
        media_type: &str,
    ) -> Result<UploadSummary, TrackerError> {
        let post = self.require_post(post_id)?;
        info!(post = %post.id, title = %post.title, "starting engagement upload");

        let engaged = self.ingestor.ingest(bytes, media_type)?;
        let sample_users = engaged
            .iter()
            .take(self.config().upload_sample_size)
            .cloned()
            .collect();
        let count = engaged.len();

        let replaced = self.store.replace_engagements(post_id, engaged);
        info!(post = %post.id, replaced, inserted = count, "engagement replaced");

        Ok(UploadSummary {
            count,
            platform: post.platform,
            replaced,
            sample_users,
        })
    }

    pub fn analyze(&self, post_id: &PostId) -> Result<PostAnalysis, TrackerError> {
        let post = self.require_post(post_id)?;
        let roster = self.store.roster(post.platform);
        let engaged = self.store.engagements(post_id);

        info!(
            post = %post.id,
            platform = %post.platform,
            roster = roster.len(),
            engaged = engaged.len(),
            "analyzing engagement"
        );

        let result = reconcile(&roster, &engaged);
        info!(
            engaged = result.engaged_count,
            not_engaged = result.not_engaged.len(),
            percentage = result.percentage,
            "analysis complete"
        );

        Ok(PostAnalysis {
            post_id: post.id,
            post_title: post.title,
            platform: post.platform,
            result,
        })
    }

    pub fn debug(&self, post_id: &PostId) -> Result<DebugReport, TrackerError> {
        let post = self.require_post(post_id)?;
        let roster = self.store.roster(post.platform);
        let engaged = self.store.engagements(post_id);
        let sample_size = self.config().debug_sample_size;

        let result = diagnose(&roster, &engaged);

        Ok(DebugReport {
            post_title: post.title,
            platform: post.platform,
            roster_users: SampledGroup::new(result.roster.users, sample_size),
            engagement_users: SampledGroup::new(result.engagement.users, sample_size),
            analysis: DebugAnalysis {
                matches: IdentityGroup::new(result.analysis.engaged),
                mismatches: IdentityGroup::new(result.analysis.not_engaged),
                extra_engagements: result.extra_engagements,
            },
        })
    }

    pub fn weekly_report(&self, now: DateTime<Utc>) -> WeeklyReport {
        let posts = self.store.posts();

        let rosters: BTreeMap<Platform, Vec<CanonicalIdentity>> = Platform::ALL
            .iter()
            .map(|platform| (*platform, self.store.roster(*platform)))
            .collect();

        let engagements: HashMap<PostId, Vec<CanonicalIdentity>> = posts
            .iter()
            .map(|post| (post.id.clone(), self.store.engagements(&post.id)))
            .collect();

        weekly_report(now, &posts, &rosters, &engagements)
    }
}
