use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Validate, Deserialize)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 3, max = 20, message = "Username must be 3-20 characters"))]
    pub username: String,
    #[validate(length(min = 8, max = 100, message = "Password must be 8-100 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

/// Shared by create and edit: same fields, same single-media rule. Media
/// fields are handles returned by POST /media. An empty caption is fine.
#[derive(Debug, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub caption: String,
    pub image: Option<Uuid>,
    pub video: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Validate, Deserialize)]
pub struct UpsertCategoryRequest {
    pub name: String,
    #[validate(length(max = 10, message = "Icon must be at most 10 characters"))]
    pub icon: Option<String>,
}

/// Query parameters for GET /feed. `view` and `group` are free-form strings;
/// unknown values fall back to "feed" and "month".
#[derive(Debug, Deserialize)]
pub struct FeedParams {
    pub category: Option<Uuid>,
    pub year: Option<i32>,
    pub view: Option<String>,
    pub group: Option<String>,
}
