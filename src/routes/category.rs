use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::require_user,
    dto::{CategoryResponse, UpsertCategoryRequest},
    errors::ApiError,
    states::AppState,
};

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<CategoryResponse>> {
    Json(state.list_categories().into_iter().map(Into::into).collect())
}

/// POST /categories
/// Headers: Authorization: Bearer <token>
/// Body: { "name": "...", "icon": "🎵" }
pub async fn upsert_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpsertCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    payload
        .validate()
        .map_err(|e| ApiError::ValidationError(e.to_string()))?;

    let user_id = require_user(&headers, &state.jwt_secret)?;

    let icon = payload.icon.map(|s| s.trim().to_string());
    let category = state.upsert_category(&payload.name, icon)?;

    info!("Category saved: {} by user {}", category.name, user_id);

    Ok(Json(category.into()))
}

/// DELETE /categories/{id}
/// Headers: Authorization: Bearer <token>
pub async fn delete_category(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let user_id = require_user(&headers, &state.jwt_secret)?;

    state.delete_category(id)?;

    info!("Category deleted: {} by user {}", id, user_id);

    Ok(StatusCode::NO_CONTENT)
}
