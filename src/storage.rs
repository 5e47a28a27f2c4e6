use std::sync::Arc;

use dashmap::DashMap;
use tracing::warn;
use uuid::Uuid;

/// In-memory blob store for post media. Posts hold handles only; the bytes
/// live here until the owning post is deleted.
#[derive(Clone)]
pub struct MediaStore {
    objects: Arc<DashMap<Uuid, MediaObject>>,
}

#[derive(Debug, Clone)]
pub struct MediaObject {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaStore {
    pub fn new() -> Self {
        Self {
            objects: Arc::new(DashMap::new()),
        }
    }

    pub fn store(&self, content_type: &str, bytes: Vec<u8>) -> Uuid {
        let id = Uuid::new_v4();
        self.objects.insert(
            id,
            MediaObject {
                content_type: content_type.to_string(),
                bytes,
            },
        );
        id
    }

    pub fn get(&self, id: Uuid) -> Option<MediaObject> {
        self.objects.get(&id).map(|entry| entry.clone())
    }

    /// Best-effort delete: a missing object is logged and ignored so that
    /// record deletion can proceed regardless.
    pub fn delete(&self, id: Uuid) {
        if self.objects.remove(&id).is_none() {
            warn!("Media object {} was already gone", id);
        }
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.objects.contains_key(&id)
    }
}

impl Default for MediaStore {
    fn default() -> Self {
        Self::new()
    }
}
