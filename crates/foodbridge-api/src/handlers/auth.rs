//! Account registration.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use foodbridge_service::user::RegisterRequest;

use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserResponse>>)> {
    let outcome = state.user_service.register(req).await?;
    Ok((
        StatusCode::CREATED,
        Json(outcome.map(UserResponse::from).into()),
    ))
}
