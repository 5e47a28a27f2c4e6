use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::require_user,
    dto::{PostRequest, PostResponse},
    errors::ApiError,
    states::AppState,
};

/// POST /posts
/// Headers: Authorization: Bearer <token>
/// Body: { "caption": "...", "image": "<media id>", "video": "<media id>", "category_id": "..." }
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<PostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let user_id = require_user(&headers, &state.jwt_secret)?;

    let post = state.create_post(
        payload.caption,
        payload.image,
        payload.video,
        payload.category_id,
    );

    info!("Post created: {} by user {}", post.id, user_id);

    Ok((StatusCode::CREATED, Json(post.into())))
}

/// PUT /posts/{id}
/// Headers: Authorization: Bearer <token>
pub async fn edit_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<PostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let user_id = require_user(&headers, &state.jwt_secret)?;

    let post = state.edit_post(
        id,
        payload.caption,
        payload.image,
        payload.video,
        payload.category_id,
    )?;

    info!("Post updated: {} by user {}", id, user_id);

    Ok(Json(post.into()))
}

/// DELETE /posts/{id}
/// Headers: Authorization: Bearer <token>
pub async fn delete_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let user_id = require_user(&headers, &state.jwt_secret)?;

    state.delete_post(id)?;

    info!("Post deleted: {} by user {}", id, user_id);

    Ok(StatusCode::NO_CONTENT)
}

/// POST /posts/{id}/like
/// Headers: Authorization: Bearer <token>
pub async fn toggle_like(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<PostResponse>, ApiError> {
    let user_id = require_user(&headers, &state.jwt_secret)?;

    let post = state.toggle_like(id, user_id)?;

    Ok(Json(post.into()))
}

/// POST /posts/{id}/favorite
/// Headers: Authorization: Bearer <token>
pub async fn toggle_favorite(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<PostResponse>, ApiError> {
    let user_id = require_user(&headers, &state.jwt_secret)?;

    let post = state.toggle_favorite(id, user_id)?;

    Ok(Json(post.into()))
}
