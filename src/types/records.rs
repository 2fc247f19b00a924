use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::identifiers::{CanonicalIdentity, Platform, PostId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RosterEntry {
    pub username: CanonicalIdentity,
    pub platform: Platform,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub post_id: PostId,
    pub username: CanonicalIdentity,
    pub platform: Platform,
}

/// A published piece of content whose engagement is tracked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub platform: Platform,
    /// Identifier of the post on the platform itself.
    pub external_id: String,
    pub post_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>, // drives the weekly report window
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub platform: Platform,
    pub external_id: String,
    pub post_date: DateTime<Utc>,
}

impl NewPost {
    pub fn into_post(self, id: PostId, created_at: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            platform: self.platform,
            external_id: self.external_id,
            post_date: self.post_date,
            created_at,
        }
    }
}

/// A post plus whether engagement has been uploaded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOverview {
    #[serde(flatten)]
    pub post: Post,
    pub has_engagement_data: bool,
    pub engagement_count: usize,
}
