use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Post;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Feed,
    Timeline,
}

impl ViewMode {
    pub fn parse(value: &str) -> Self {
        match value {
            "timeline" => ViewMode::Timeline,
            _ => ViewMode::Feed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Day,
    Month,
    Year,
}

impl GroupBy {
    /// Unrecognized values fall back to month grouping.
    pub fn parse(value: &str) -> Self {
        match value {
            "day" => GroupBy::Day,
            "year" => GroupBy::Year,
            _ => GroupBy::Month,
        }
    }

    /// Display label for the bucket a timestamp falls into, e.g.
    /// "Friday, January 05, 2024" / "January 2024" / "2024".
    pub fn label(self, at: DateTime<Utc>) -> String {
        match self {
            GroupBy::Day => at.format("%A, %B %d, %Y").to_string(),
            GroupBy::Month => at.format("%B %Y").to_string(),
            GroupBy::Year => at.format("%Y").to_string(),
        }
    }
}

/// Result of one feed query. `posts` is the flat newest-first list (empty in
/// timeline mode); the grouped fields are present per the view-mode rules.
#[derive(Debug)]
pub struct FeedPage {
    pub posts: Vec<Post>,
    pub grouped_posts: Option<Vec<(String, Vec<Post>)>>,
    pub grouped_feed: Option<Vec<(String, Vec<Post>)>>,
    pub available_years: Vec<i32>,
}

/// Distinct years across the whole post set, newest first. Drives the year
/// selector, so it ignores whatever filters are currently active.
pub fn available_years(posts: &[Post]) -> Vec<i32> {
    let years: BTreeSet<i32> = posts.iter().map(|p| p.created_at.year()).collect();
    years.into_iter().rev().collect()
}

/// Buckets an already newest-first sequence of posts. Each post lands in
/// exactly one group and keeps its relative order, so a group's first member
/// is also its most recent; groups are then ordered by that member.
pub fn group_posts_by_date(posts: &[Post], group_by: GroupBy) -> Vec<(String, Vec<Post>)> {
    let mut groups: Vec<(String, Vec<Post>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for post in posts {
        let key = group_by.label(post.created_at);
        match index.get(&key) {
            Some(&slot) => groups[slot].1.push(post.clone()),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![post.clone()]));
            }
        }
    }

    groups.sort_by(|a, b| b.1[0].created_at.cmp(&a.1[0].created_at));
    groups
}

/// Applies the category/year filters and view-mode rules to `all_posts`,
/// which must already be sorted by `created_at` descending.
pub fn build_feed(
    all_posts: Vec<Post>,
    category_id: Option<Uuid>,
    year: Option<i32>,
    view: ViewMode,
    group_by: GroupBy,
) -> FeedPage {
    let available_years = available_years(&all_posts);

    let filtered: Vec<Post> = all_posts
        .into_iter()
        .filter(|p| category_id.is_none_or(|c| p.category_id == Some(c)))
        .filter(|p| year.is_none_or(|y| p.created_at.year() == y))
        .collect();

    match view {
        ViewMode::Timeline => FeedPage {
            posts: Vec::new(),
            grouped_posts: Some(group_posts_by_date(&filtered, group_by)),
            grouped_feed: None,
            available_years,
        },
        ViewMode::Feed => {
            // Year buckets are a timeline-only presentation; the feed view
            // gets a supplementary grouping for day and month only.
            let grouped_feed = match group_by {
                GroupBy::Day | GroupBy::Month => Some(group_posts_by_date(&filtered, group_by)),
                GroupBy::Year => None,
            };
            FeedPage {
                posts: filtered,
                grouped_posts: None,
                grouped_feed,
                available_years,
            }
        }
    }
}
