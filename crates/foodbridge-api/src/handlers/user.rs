//! User self-service handlers.

use axum::Json;
use axum::extract::State;

use foodbridge_entity::user::UpdateProfile;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody};
use crate::state::AppState;

/// GET /api/users/me
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.get_profile(&auth).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(req): JsonBody<UpdateProfile>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = state.user_service.update_profile(&auth, req).await?;
    Ok(Json(ApiResponse::ok(user.into())))
}
