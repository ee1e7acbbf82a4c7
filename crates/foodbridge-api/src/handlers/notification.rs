//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};

use foodbridge_entity::notification::Notification;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, parse_uuid};
use crate::state::AppState;

/// GET /api/notifications/unread
pub async fn list_unread(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Notification>>>> {
    let notifications = state.notification_service.list_unread(&auth).await?;
    Ok(Json(ApiResponse::ok(notifications)))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Notification>>> {
    let notification = state
        .notification_service
        .mark_read(&auth, parse_uuid(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(notification)))
}
