use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::info;
use uuid::Uuid;

use crate::{
    auth::require_user, dto::MediaUploadResponse, errors::ApiError, states::AppState,
};

/// POST /media
/// Headers: Authorization: Bearer <token>, Content-Type: <media type>
/// Body: raw payload bytes. Returns the handle posts reference.
pub async fn upload_media(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<MediaUploadResponse>), ApiError> {
    let user_id = require_user(&headers, &state.jwt_secret)?;

    if body.is_empty() {
        return Err(ApiError::ValidationError("Media payload is empty".into()));
    }

    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");

    let id = state.media.store(content_type, body.to_vec());

    info!("Media uploaded: {} by user {}", id, user_id);

    Ok((StatusCode::CREATED, Json(MediaUploadResponse { id })))
}

/// GET /media/{id}
pub async fn serve_media(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let media = state.media.get(id).ok_or(ApiError::NotFound)?;

    Ok(([(header::CONTENT_TYPE, media.content_type)], media.bytes).into_response())
}
