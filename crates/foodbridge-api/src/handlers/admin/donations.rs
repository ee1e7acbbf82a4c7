//! Admin donation listing.

use axum::Json;
use axum::extract::State;

use foodbridge_entity::donation::Donation;

use crate::dto::request::AdminDonationQuery;
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, QueryParams};
use crate::middleware::rbac::require_admin;
use crate::state::AppState;

/// GET /api/admin/donations
pub async fn list_donations(
    State(state): State<AppState>,
    auth: AuthUser,
    QueryParams(query): QueryParams<AdminDonationQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Donation>>>> {
    require_admin(&auth)?;
    let donations = state
        .donation_service
        .admin_list(&auth, query.status.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(donations)))
}
