use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::feed::{GroupBy, ViewMode};
use crate::models::{Category, Post, User};

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

/// Like/favorite counts are derived from set membership, never stored.
#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: Uuid,
    pub caption: String,
    pub image: Option<Uuid>,
    pub video: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub like_count: usize,
    pub favorite_count: usize,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        let like_count = post.likes.len();
        let favorite_count = post.favorites.len();
        Self {
            id: post.id,
            caption: post.caption,
            image: post.image,
            video: post.video,
            category_id: post.category_id,
            created_at: post.created_at,
            like_count,
            favorite_count,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            icon: category.icon,
            created_at: category.created_at,
        }
    }
}

/// One date bucket of the timeline/feed grouping.
#[derive(Debug, Serialize)]
pub struct PostGroup {
    pub label: String,
    pub posts: Vec<PostResponse>,
}

/// Everything the presentation layer needs to render the feed page:
/// the flat list, the optional groupings, and the filter controls.
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub posts: Vec<PostResponse>,
    pub grouped_posts: Option<Vec<PostGroup>>,
    pub grouped_feed: Option<Vec<PostGroup>>,
    pub categories: Vec<CategoryResponse>,
    pub selected_category: Option<Uuid>,
    pub selected_year: Option<i32>,
    pub available_years: Vec<i32>,
    pub view: ViewMode,
    pub group_by: GroupBy,
}

#[derive(Debug, Serialize)]
pub struct MediaUploadResponse {
    pub id: Uuid,
}
