use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::EngagementStore;
use crate::types::identifiers::{CanonicalIdentity, Platform, PostId};
use crate::types::records::{EngagementRecord, Post, RosterEntry};

/// In-process store. Single-threaded; callers that share it wrap it in a lock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    rosters: BTreeMap<Platform, Vec<CanonicalIdentity>>,
    posts: BTreeMap<PostId, Post>,
    engagements: BTreeMap<PostId, Vec<CanonicalIdentity>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rosters(&self) -> &BTreeMap<Platform, Vec<CanonicalIdentity>> {
        &self.rosters
    }

    pub fn posts_len(&self) -> usize {
        self.posts.len()
    }

    pub fn all_engagements(&self) -> &BTreeMap<PostId, Vec<CanonicalIdentity>> {
        &self.engagements
    }

    pub fn roster_entries(&self) -> Vec<RosterEntry> {
        self.rosters
            .iter()
            .flat_map(|(platform, ids)| {
                ids.iter().map(move |id| RosterEntry {
                    username: id.clone(),
                    platform: *platform,
                })
            })
            .collect()
    }

    pub fn engagement_records(&self, post: &PostId) -> Vec<EngagementRecord> {
        let Some(platform) = self.posts.get(post).map(|p| p.platform) else {
            return Vec::new();
        };
        self.engagements(post)
            .into_iter()
            .map(|username| EngagementRecord {
                post_id: post.clone(),
                username,
                platform,
            })
            .collect()
    }
}

impl EngagementStore for MemoryStore {
    fn replace_roster(&mut self, platform: Platform, roster: Vec<CanonicalIdentity>) -> usize {
        self.rosters
            .insert(platform, roster)
            .map_or(0, |previous| previous.len())
    }

    fn roster(&self, platform: Platform) -> Vec<CanonicalIdentity> {
        self.rosters.get(&platform).cloned().unwrap_or_default()
    }

    fn add_roster_entry(&mut self, platform: Platform, username: CanonicalIdentity) {
        self.rosters.entry(platform).or_default().push(username);
    }

    fn remove_roster_entry(&mut self, platform: Platform, username: &CanonicalIdentity) -> bool {
        let Some(roster) = self.rosters.get_mut(&platform) else {
            return false;
        };
        let before = roster.len();
        roster.retain(|id| id != username);
        roster.len() != before
    }

    fn insert_post(&mut self, post: Post) {
        self.posts.insert(post.id.clone(), post);
    }

    fn post(&self, id: &PostId) -> Option<Post> {
        self.posts.get(id).cloned()
    }

    fn posts(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().cloned().collect();
        // Newest first; id breaks ties so the order is total.
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        posts
    }

    fn delete_post(&mut self, id: &PostId) -> bool {
        self.engagements.remove(id);
        self.posts.remove(id).is_some()
    }

    fn replace_engagements(&mut self, post: &PostId, engaged: Vec<CanonicalIdentity>) -> usize {
        self.engagements
            .insert(post.clone(), engaged)
            .map_or(0, |previous| previous.len())
    }

    fn engagements(&self, post: &PostId) -> Vec<CanonicalIdentity> {
        self.engagements.get(post).cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<CanonicalIdentity> {
        raw.iter().filter_map(|r| CanonicalIdentity::parse(*r)).collect()
    }

    #[test]
    fn replace_reports_removed_count() {
        let mut store = MemoryStore::new();
        assert_eq!(store.replace_roster(Platform::X, ids(&["a", "b", "c"])), 0);
        assert_eq!(store.replace_roster(Platform::X, ids(&["d"])), 3);
        assert_eq!(store.roster(Platform::X), ids(&["d"]));
    }

    #[test]
    fn remove_entry_drops_duplicates() {
        let mut store = MemoryStore::new();
        store.replace_roster(Platform::Instagram, ids(&["a", "b", "a"]));
        let a = CanonicalIdentity::parse("a").unwrap();
        assert!(store.remove_roster_entry(Platform::Instagram, &a));
        assert_eq!(store.roster(Platform::Instagram), ids(&["b"]));
        assert!(!store.remove_roster_entry(Platform::X, &a));
    }

    #[test]
    fn roster_entries_carry_platform() {
        let mut store = MemoryStore::new();
        store.replace_roster(Platform::X, ids(&["a"]));
        store.replace_roster(Platform::Instagram, ids(&["b"]));
        let entries = store.roster_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].platform, Platform::Instagram);
        assert_eq!(entries[1].username.as_str(), "a");
    }
}
