//! Admin user management handlers.

use axum::Json;
use axum::extract::{Path, State};

use foodbridge_core::error::AppError;
use foodbridge_service::user::admin::DeletedUser;

use crate::dto::request::{StatusRequest, UserQuery};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody, QueryParams, parse_uuid};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<UserQuery>,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    require_admin(&auth)?;
    let users = state
        .admin_user_service
        .list_users(&auth, query.role.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// POST /api/admin/users/{id}/verify
pub async fn verify_charity(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    require_admin(&auth)?;
    let outcome = state
        .admin_user_service
        .verify_charity(&auth, parse_uuid(&id)?)
        .await?;
    Ok(Json(outcome.map(UserResponse::from).into()))
}

/// PATCH /api/admin/users/{id}/status
pub async fn change_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<StatusRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    require_admin(&auth)?;
    let id = parse_uuid(&id)?;
    let status = req.status.ok_or_else(|| AppError::missing_field("status"))?;
    let user = state
        .admin_user_service
        .update_status(&auth, id, &status)
        .await?;
    Ok(Json(ApiResponse::ok(user.into())))
}

/// DELETE /api/admin/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<DeletedUser>>> {
    require_admin(&auth)?;
    let deleted = state
        .admin_user_service
        .delete_user(&auth, parse_uuid(&id)?)
        .await?;
    Ok(Json(ApiResponse::ok(deleted)))
}
