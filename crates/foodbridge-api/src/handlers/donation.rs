//! Donation handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use foodbridge_core::error::AppError;
use foodbridge_entity::donation::{CreateDonation, Donation};

use crate::dto::request::{DonationQuery, StatusRequest};
use crate::dto::response::ApiResponse;
use crate::error::ApiResult;
use crate::extractors::{AuthUser, JsonBody, QueryParams, parse_uuid};
use crate::state::AppState;

/// POST /api/donations
pub async fn create_donation(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(req): JsonBody<CreateDonation>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Donation>>)> {
    let outcome = state.donation_service.create(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

/// GET /api/donations
pub async fn list_donations(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<DonationQuery>,
) -> ApiResult<Json<ApiResponse<Vec<Donation>>>> {
    let donations = state
        .donation_service
        .list(query.status.as_deref(), query.city.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(donations)))
}

/// GET /api/donations/donor
pub async fn list_donor_donations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Donation>>>> {
    let donations = state.donation_service.list_for_donor(&auth).await?;
    Ok(Json(ApiResponse::ok(donations)))
}

/// GET /api/donations/charity
pub async fn list_charity_donations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ApiResponse<Vec<Donation>>>> {
    let donations = state.donation_service.list_for_charity(&auth).await?;
    Ok(Json(ApiResponse::ok(donations)))
}

/// GET /api/donations/{id}
pub async fn get_donation(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Donation>>> {
    let donation = state.donation_service.get(parse_uuid(&id)?).await?;
    Ok(Json(ApiResponse::ok(donation)))
}

/// POST /api/donations/{id}/accept
pub async fn accept_donation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> ApiResult<Json<ApiResponse<Donation>>> {
    let outcome = state
        .donation_service
        .accept(&auth, parse_uuid(&id)?)
        .await?;
    Ok(Json(outcome.into()))
}

/// PUT /api/donations/{id}/status
pub async fn update_donation_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<StatusRequest>,
) -> ApiResult<Json<ApiResponse<Donation>>> {
    let id = parse_uuid(&id)?;
    let status = req.status.ok_or_else(|| AppError::missing_field("status"))?;
    let donation = state
        .donation_service
        .update_status(&auth, id, &status)
        .await?;
    Ok(Json(ApiResponse::ok(donation)))
}
