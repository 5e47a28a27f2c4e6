use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::feed::{FeedPage, GroupBy, ViewMode, build_feed};
use crate::models::{Category, DEFAULT_ICON, Post, User};
use crate::storage::MediaStore;

/// Shared application state: all records live in `DashMap`s so every
/// mutation is an atomic single-entry write.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<DashMap<Uuid, User>>,
    pub email_index: Arc<DashMap<String, Uuid>>, // Quick lookup by email
    pub posts: Arc<DashMap<Uuid, Post>>,
    pub categories: Arc<DashMap<Uuid, Category>>,
    pub category_names: Arc<DashMap<String, Uuid>>, // Upsert key: unique name
    pub media: MediaStore,
    pub jwt_secret: String,
}

impl AppState {
    pub fn new(jwt_secret: String) -> Self {
        Self {
            users: Arc::new(DashMap::new()),
            email_index: Arc::new(DashMap::new()),
            posts: Arc::new(DashMap::new()),
            categories: Arc::new(DashMap::new()),
            category_names: Arc::new(DashMap::new()),
            media: MediaStore::new(),
            jwt_secret,
        }
    }

    /// Lenient category resolution: an id that matches nothing leaves the
    /// post uncategorized rather than failing the request.
    fn resolve_category(&self, category_id: Option<Uuid>) -> Option<Uuid> {
        category_id.filter(|id| self.categories.contains_key(id))
    }

    pub fn create_post(
        &self,
        caption: String,
        image: Option<Uuid>,
        video: Option<Uuid>,
        category_id: Option<Uuid>,
    ) -> Post {
        // Single-media rule: prefer the video when both are supplied.
        let image = if video.is_some() { None } else { image };

        let post = Post {
            id: Uuid::new_v4(),
            caption,
            image,
            video,
            category_id: self.resolve_category(category_id),
            created_at: Utc::now(),
            likes: HashSet::new(),
            favorites: HashSet::new(),
        };
        self.posts.insert(post.id, post.clone());
        post
    }

    /// Caption and category are overwritten unconditionally (an absent
    /// category id clears the reference). Media only changes when a new
    /// handle is supplied, and setting one side clears the other.
    pub fn edit_post(
        &self,
        id: Uuid,
        caption: String,
        image: Option<Uuid>,
        video: Option<Uuid>,
        category_id: Option<Uuid>,
    ) -> Result<Post, ApiError> {
        let image = if video.is_some() { None } else { image };
        let category_id = self.resolve_category(category_id);

        let mut post = self.posts.get_mut(&id).ok_or(ApiError::NotFound)?;
        post.caption = caption;
        post.category_id = category_id;

        if let Some(handle) = image {
            post.image = Some(handle);
            post.video = None;
        } else if let Some(handle) = video {
            post.video = Some(handle);
            post.image = None;
        }

        Ok(post.clone())
    }

    /// Releases owned media first, then drops the record. Media deletion is
    /// best-effort and never blocks record removal.
    pub fn delete_post(&self, id: Uuid) -> Result<(), ApiError> {
        let post = self
            .posts
            .get(&id)
            .map(|entry| entry.clone())
            .ok_or(ApiError::NotFound)?;

        if let Some(handle) = post.image {
            self.media.delete(handle);
        }
        if let Some(handle) = post.video {
            self.media.delete(handle);
        }

        self.posts.remove(&id);
        Ok(())
    }

    pub fn toggle_like(&self, post_id: Uuid, user_id: Uuid) -> Result<Post, ApiError> {
        let mut post = self.posts.get_mut(&post_id).ok_or(ApiError::NotFound)?;
        if !post.likes.remove(&user_id) {
            post.likes.insert(user_id);
        }
        Ok(post.clone())
    }

    pub fn toggle_favorite(&self, post_id: Uuid, user_id: Uuid) -> Result<Post, ApiError> {
        let mut post = self.posts.get_mut(&post_id).ok_or(ApiError::NotFound)?;
        if !post.favorites.remove(&user_id) {
            post.favorites.insert(user_id);
        }
        Ok(post.clone())
    }

    /// Create-or-update by unique name. The icon default only applies to a
    /// brand-new category created with no icon at all; an explicitly empty
    /// icon is stored as empty.
    pub fn upsert_category(&self, name: &str, icon: Option<String>) -> Result<Category, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::ValidationError(
                "Name is required to create a category".into(),
            ));
        }

        if let Some(id) = self.category_names.get(name).map(|entry| *entry) {
            let mut category = self.categories.get_mut(&id).ok_or(ApiError::NotFound)?;
            if let Some(icon) = icon {
                category.icon = icon;
            }
            return Ok(category.clone());
        }

        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            icon: icon.unwrap_or_else(|| DEFAULT_ICON.to_string()),
            created_at: Utc::now(),
        };
        self.category_names.insert(category.name.clone(), category.id);
        self.categories.insert(category.id, category.clone());
        Ok(category)
    }

    /// Detaches referring posts instead of cascading.
    pub fn delete_category(&self, id: Uuid) -> Result<(), ApiError> {
        let (_, category) = self.categories.remove(&id).ok_or(ApiError::NotFound)?;
        self.category_names.remove(&category.name);

        for mut entry in self.posts.iter_mut() {
            if entry.category_id == Some(id) {
                entry.category_id = None;
            }
        }
        Ok(())
    }

    pub fn list_categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self
            .categories
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        categories
    }

    pub fn list_feed(
        &self,
        category_id: Option<Uuid>,
        year: Option<i32>,
        view: ViewMode,
        group_by: GroupBy,
    ) -> FeedPage {
        let mut posts: Vec<Post> = self
            .posts
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        // Sort by creation date (newest first)
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        build_feed(posts, category_id, year, view, group_by)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> AppState {
        AppState::new("test-secret".into())
    }

    fn media_pair(state: &AppState) -> (Uuid, Uuid) {
        let image = state.media.store("image/jpeg", vec![1, 2, 3]);
        let video = state.media.store("video/mp4", vec![4, 5, 6]);
        (image, video)
    }

    #[test]
    fn create_with_both_media_keeps_video_only() {
        let state = state();
        let (image, video) = media_pair(&state);

        let post = state.create_post("hi".into(), Some(image), Some(video), None);

        assert_eq!(post.video, Some(video));
        assert_eq!(post.image, None);
    }

    #[test]
    fn create_accepts_empty_caption_and_unknown_category() {
        let state = state();
        let post = state.create_post(String::new(), None, None, Some(Uuid::new_v4()));

        assert_eq!(post.caption, "");
        assert_eq!(post.category_id, None);
        assert!(state.posts.contains_key(&post.id));
    }

    #[test]
    fn create_resolves_existing_category() {
        let state = state();
        let category = state.upsert_category("travel", None).unwrap();

        let post = state.create_post("trip".into(), None, None, Some(category.id));

        assert_eq!(post.category_id, Some(category.id));
    }

    #[test]
    fn edit_missing_post_is_not_found() {
        let state = state();
        let err = state
            .edit_post(Uuid::new_v4(), "x".into(), None, None, None)
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn edit_with_new_image_clears_video() {
        let state = state();
        let (image, video) = media_pair(&state);
        let post = state.create_post("v".into(), None, Some(video), None);

        let updated = state
            .edit_post(post.id, "v".into(), Some(image), None, None)
            .unwrap();

        assert_eq!(updated.image, Some(image));
        assert_eq!(updated.video, None);
    }

    #[test]
    fn edit_with_new_video_clears_image() {
        let state = state();
        let (image, video) = media_pair(&state);
        let post = state.create_post("i".into(), Some(image), None, None);

        let updated = state
            .edit_post(post.id, "i".into(), None, Some(video), None)
            .unwrap();

        assert_eq!(updated.video, Some(video));
        assert_eq!(updated.image, None);
    }

    #[test]
    fn edit_without_media_leaves_media_untouched() {
        let state = state();
        let (_, video) = media_pair(&state);
        let post = state.create_post("old".into(), None, Some(video), None);

        let updated = state
            .edit_post(post.id, "new".into(), None, None, None)
            .unwrap();

        assert_eq!(updated.caption, "new");
        assert_eq!(updated.video, Some(video));
        assert_eq!(updated.image, None);
    }

    #[test]
    fn edit_without_category_clears_it() {
        let state = state();
        let category = state.upsert_category("books", None).unwrap();
        let post = state.create_post("c".into(), None, None, Some(category.id));

        let updated = state.edit_post(post.id, "c".into(), None, None, None).unwrap();
        assert_eq!(updated.category_id, None);

        let updated = state
            .edit_post(post.id, "c".into(), None, None, Some(category.id))
            .unwrap();
        assert_eq!(updated.category_id, Some(category.id));
    }

    #[test]
    fn delete_releases_media_and_second_delete_is_not_found() {
        let state = state();
        let image = state.media.store("image/png", vec![9]);
        let post = state.create_post("pic".into(), Some(image), None, None);

        state.delete_post(post.id).unwrap();

        assert!(!state.media.contains(image));
        assert!(!state.posts.contains_key(&post.id));
        assert!(matches!(
            state.delete_post(post.id).unwrap_err(),
            ApiError::NotFound
        ));
    }

    #[test]
    fn delete_tolerates_already_missing_media() {
        let state = state();
        let video = state.media.store("video/mp4", vec![7]);
        let post = state.create_post("clip".into(), None, Some(video), None);

        // Blob disappears out from under the record.
        state.media.delete(video);

        state.delete_post(post.id).unwrap();
        assert!(!state.posts.contains_key(&post.id));
    }

    #[test]
    fn toggle_like_is_an_involution() {
        let state = state();
        let post = state.create_post("hi".into(), None, None, None);
        let user = Uuid::new_v4();

        let liked = state.toggle_like(post.id, user).unwrap();
        assert!(liked.likes.contains(&user));
        assert_eq!(liked.likes.len(), 1);

        let unliked = state.toggle_like(post.id, user).unwrap();
        assert!(!unliked.likes.contains(&user));
        assert!(unliked.likes.is_empty());
    }

    #[test]
    fn favorites_are_independent_of_likes() {
        let state = state();
        let post = state.create_post("hi".into(), None, None, None);
        let user = Uuid::new_v4();

        state.toggle_like(post.id, user).unwrap();
        let favorited = state.toggle_favorite(post.id, user).unwrap();

        assert!(favorited.likes.contains(&user));
        assert!(favorited.favorites.contains(&user));
    }

    #[test]
    fn toggle_on_missing_post_is_not_found() {
        let state = state();
        assert!(matches!(
            state.toggle_like(Uuid::new_v4(), Uuid::new_v4()).unwrap_err(),
            ApiError::NotFound
        ));
        assert!(matches!(
            state
                .toggle_favorite(Uuid::new_v4(), Uuid::new_v4())
                .unwrap_err(),
            ApiError::NotFound
        ));
    }

    #[test]
    fn upsert_rejects_blank_names() {
        let state = state();
        assert!(matches!(
            state.upsert_category("   ", None).unwrap_err(),
            ApiError::ValidationError(_)
        ));
        assert!(state.categories.is_empty());
    }

    #[test]
    fn upsert_twice_updates_icon_in_place() {
        let state = state();
        let first = state.upsert_category("music", Some("🎵".into())).unwrap();
        let second = state.upsert_category("music", Some("🎸".into())).unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.icon, "🎸");
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(state.categories.len(), 1);
    }

    #[test]
    fn upsert_trims_name_and_applies_icon_default() {
        let state = state();
        let defaulted = state.upsert_category("  school  ", None).unwrap();
        assert_eq!(defaulted.name, "school");
        assert_eq!(defaulted.icon, DEFAULT_ICON);

        // An explicitly empty icon is stored as empty, create or update.
        let bare = state.upsert_category("plain", Some(String::new())).unwrap();
        assert_eq!(bare.icon, "");
        let cleared = state.upsert_category("school", Some(String::new())).unwrap();
        assert_eq!(cleared.icon, "");
    }

    #[test]
    fn delete_category_detaches_posts() {
        let state = state();
        let category = state.upsert_category("food", None).unwrap();
        let post = state.create_post("lunch".into(), None, None, Some(category.id));

        state.delete_category(category.id).unwrap();

        let post = state.posts.get(&post.id).unwrap().clone();
        assert_eq!(post.category_id, None);
        assert!(state.categories.is_empty());
        assert!(matches!(
            state.delete_category(category.id).unwrap_err(),
            ApiError::NotFound
        ));
    }

    #[test]
    fn deleted_category_name_is_reusable() {
        let state = state();
        let first = state.upsert_category("art", None).unwrap();
        state.delete_category(first.id).unwrap();

        let second = state.upsert_category("art", Some("🎨".into())).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(second.icon, "🎨");
    }

    #[test]
    fn categories_list_in_name_order() {
        let state = state();
        state.upsert_category("zoo", None).unwrap();
        state.upsert_category("art", None).unwrap();
        state.upsert_category("music", None).unwrap();

        let names: Vec<String> = state
            .list_categories()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["art", "music", "zoo"]);
    }
}
