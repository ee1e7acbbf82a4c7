//! Admin dashboard handler.

use axum::Json;
use axum::extract::State;

use foodbridge_service::report::DashboardStats;

use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<DashboardStats>>> {
    require_admin(&auth)?;
    let stats = state.dashboard_service.stats(&auth).await?;
    Ok(Json(ApiResponse::ok(stats)))
}
