use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::{DateTime, Duration, Utc};

use super::percentage;
use crate::types::analysis::{MemberEngagement, WeeklyReport, WeeklySummary};
use crate::types::identifiers::{CanonicalIdentity, Platform, PostId};
use crate::types::records::Post;

pub const WEEKLY_PERIOD_DAYS: i64 = 7;

/// Per-member engagement across posts created in the week before `now`.
///
/// A member is only measured against posts of their own platform. Members
/// are listed platform by platform, each roster in its stored order.
pub fn weekly_report(
    now: DateTime<Utc>,
    posts: &[Post],
    rosters: &BTreeMap<Platform, Vec<CanonicalIdentity>>,
    engagements: &HashMap<PostId, Vec<CanonicalIdentity>>,
) -> WeeklyReport {
    let window_start = now - Duration::days(WEEKLY_PERIOD_DAYS);
    let recent: Vec<&Post> = posts
        .iter()
        .filter(|post| post.created_at >= window_start)
        .collect();

    let engaged_sets: HashMap<&PostId, HashSet<&CanonicalIdentity>> = recent
        .iter()
        .map(|post| {
            let set: HashSet<&CanonicalIdentity> = engagements
                .get(&post.id)
                .map(|ids| ids.iter().collect())
                .unwrap_or_default();
            (&post.id, set)
        })
        .collect();

    let mut users = Vec::new();
    for (platform, roster) in rosters {
        let platform_posts: Vec<&PostId> = recent
            .iter()
            .filter(|post| post.platform == *platform)
            .map(|post| &post.id)
            .collect();
        let total_posts = platform_posts.len();

        for member in roster {
            let engaged_posts = platform_posts
                .iter()
                .filter(|id| engaged_sets.get(*id).is_some_and(|set| set.contains(member)))
                .count();

            users.push(MemberEngagement {
                username: member.clone(),
                platform: *platform,
                engaged_posts,
                total_posts,
                engagement_rate: percentage(engaged_posts, total_posts),
            });
        }
    }

    let summary = WeeklySummary {
        total_users: users.len(),
        total_posts: recent.len(),
        active_users: users.iter().filter(|u| u.engaged_posts > 0).count(),
    };

    WeeklyReport {
        period_days: WEEKLY_PERIOD_DAYS,
        users,
        summary,
    }
}
