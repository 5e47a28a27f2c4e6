use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single feed entry. At most one of `image`/`video` is ever set; when a
/// request carries both, the video wins and the image is dropped.
///
/// `image` and `video` are handles into the media store; the post owns them
/// and they are released when the post is deleted. `category_id` is a weak
/// reference: deleting the category detaches the post, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub caption: String,
    pub image: Option<Uuid>,
    pub video: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub likes: HashSet<Uuid>,
    pub favorites: HashSet<Uuid>,
}
