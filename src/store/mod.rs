pub mod memory;
pub mod snapshot;

use std::path::PathBuf;

use thiserror::Error;

use crate::types::identifiers::{CanonicalIdentity, Platform, PostId};
use crate::types::records::Post;
pub use memory::MemoryStore;
pub use snapshot::{SnapshotManifest, SnapshotWriter, StoreSnapshot};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Output directory already exists: {0}")]
    OutputExists(PathBuf),
    #[error("Snapshot version mismatch: manifest says {expected}, content hashes to {actual}")]
    SnapshotMismatch { expected: String, actual: String },
    #[error("Invalid version format: {0}")]
    InvalidVersionFormat(String),
}

/// Storage collaborator for rosters, posts and engagement.
///
/// Replacements are full replaces: the previous set for the scope is gone
/// once the call returns. Identities are [`CanonicalIdentity`], so empty keys
/// cannot be stored.
pub trait EngagementStore {
    /// Replace a platform's roster. Returns how many entries were removed.
    fn replace_roster(&mut self, platform: Platform, roster: Vec<CanonicalIdentity>) -> usize;

    fn roster(&self, platform: Platform) -> Vec<CanonicalIdentity>;

    fn add_roster_entry(&mut self, platform: Platform, username: CanonicalIdentity);

    /// Remove every entry with this key. Returns whether anything was removed.
    fn remove_roster_entry(&mut self, platform: Platform, username: &CanonicalIdentity) -> bool;

    fn insert_post(&mut self, post: Post);

    fn post(&self, id: &PostId) -> Option<Post>;

    /// All posts, newest `created_at` first.
    fn posts(&self) -> Vec<Post>;

    /// Delete a post and all of its engagement. Returns whether the post existed.
    fn delete_post(&mut self, id: &PostId) -> bool;

    /// Replace a post's engagement. Returns how many records were removed.
    fn replace_engagements(&mut self, post: &PostId, engaged: Vec<CanonicalIdentity>) -> usize;

    fn engagements(&self, post: &PostId) -> Vec<CanonicalIdentity>;
}
