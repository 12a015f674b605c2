//! Front-desk HTTP handlers
//!
//! Thin adapters over `FrontDeskService`: each endpoint parses the
//! request, invokes the corresponding lifecycle operation, and maps the
//! domain error onto an HTTP status.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::application::services::FrontDeskService;
use crate::domain::{DomainError, StayAdjustmentKind};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::reservations::dto::ReservationDto;

use super::dto::*;

/// Application state for front-desk handlers.
#[derive(Clone)]
pub struct FrontDeskAppState {
    pub service: Arc<FrontDeskService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/front-desk/check-in",
    tag = "Front Desk",
    request_body = CheckInRequest,
    responses(
        (status = 200, description = "Guest checked in", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation or room not found"),
        (status = 409, description = "Requested room is not available for the stay"),
        (status = 422, description = "Reservation is not in a check-in-able status")
    )
)]
pub async fn check_in(
    State(state): State<FrontDeskAppState>,
    ValidatedJson(request): ValidatedJson<CheckInRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .service
        .check_in(&request.reservation_id, request.room_id.as_deref())
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/front-desk/check-out",
    tag = "Front Desk",
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Guest checked out", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found"),
        (status = 422, description = "Guest is not checked in")
    )
)]
pub async fn check_out(
    State(state): State<FrontDeskAppState>,
    ValidatedJson(request): ValidatedJson<CheckOutRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .service
        .check_out(&request.reservation_id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/front-desk/express-check-out",
    tag = "Front Desk",
    request_body = CheckOutRequest,
    responses(
        (status = 200, description = "Guest checked out", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found"),
        (status = 409, description = "Folio balance is not zero"),
        (status = 422, description = "Guest is not checked in")
    )
)]
pub async fn express_check_out(
    State(state): State<FrontDeskAppState>,
    ValidatedJson(request): ValidatedJson<CheckOutRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .service
        .express_check_out(&request.reservation_id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/front-desk/transfers",
    tag = "Front Desk",
    request_body = TransferRoomRequest,
    responses(
        (status = 200, description = "Guest transferred", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation or target room not found"),
        (status = 409, description = "Target room is not available for the stay"),
        (status = 422, description = "Guest is not checked in")
    )
)]
pub async fn transfer_room(
    State(state): State<FrontDeskAppState>,
    ValidatedJson(request): ValidatedJson<TransferRoomRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .service
        .transfer_room(
            &request.reservation_id,
            &request.target_room_id,
            request.reason.as_deref(),
        )
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/front-desk/stay-adjustments",
    tag = "Front Desk",
    request_body = StayAdjustmentRequest,
    responses(
        (status = 200, description = "Adjustment recorded", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Unknown adjustment type or negative charge"),
        (status = 404, description = "Reservation not found"),
        (status = 422, description = "Guest is not checked in")
    )
)]
pub async fn apply_stay_adjustment(
    State(state): State<FrontDeskAppState>,
    ValidatedJson(request): ValidatedJson<StayAdjustmentRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let kind = StayAdjustmentKind::parse(&request.adjustment_type).ok_or_else(|| {
        domain_error_response(DomainError::Validation(format!(
            "unknown adjustment type '{}'",
            request.adjustment_type
        )))
    })?;

    let reservation = state
        .service
        .apply_stay_adjustment(
            &request.reservation_id,
            kind,
            request.additional_charge,
            request.notes.as_deref(),
        )
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}
