use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Icon applied when a brand-new category is created without one.
pub const DEFAULT_ICON: &str = "🎓";

/// Categories are keyed by unique name; the only write path is an
/// upsert-by-name, so `created_at` survives icon updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
}
