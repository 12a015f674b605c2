//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::services::{BillingLedger, FrontDeskService};
use crate::domain::{DomainError, EntryKind, Reservation, RepositoryProvider, StayInterval};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub front_desk: Arc<FrontDeskService>,
    pub billing: Arc<BillingLedger>,
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 200, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid stay interval or unknown room type"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let stay = StayInterval::new(request.arrival_date, request.departure_date)
        .map_err(domain_error_response)?;

    let room_type = state
        .repos
        .rooms()
        .find_room_type(&request.room_type_id)
        .await
        .map_err(domain_error_response)?
        .ok_or_else(|| {
            domain_error_response(DomainError::not_found("RoomType", &request.room_type_id))
        })?;
    if room_type.property_id != request.property_id {
        return Err(domain_error_response(DomainError::Validation(format!(
            "room type '{}' does not belong to property '{}'",
            request.room_type_id, request.property_id
        ))));
    }

    let reservation = Reservation::new(
        request.guest_id,
        request.property_id,
        request.room_type_id,
        stay,
    );
    state
        .repos
        .reservations()
        .save(reservation.clone())
        .await
        .map_err(domain_error_response)?;

    tracing::info!(
        reservation_id = %reservation.id,
        confirmation = %reservation.confirmation_number,
        stay = %reservation.stay,
        "Reservation created"
    );
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ListReservationsParams),
    responses(
        (status = 200, description = "List of reservations", body = ApiResponse<Vec<ReservationDto>>)
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    Query(params): Query<ListReservationsParams>,
) -> Result<
    Json<ApiResponse<Vec<ReservationDto>>>,
    (StatusCode, Json<ApiResponse<Vec<ReservationDto>>>),
> {
    let reservations = match params.property_id {
        Some(property_id) => state
            .repos
            .reservations()
            .find_by_property(&property_id)
            .await,
        None => state.repos.reservations().find_all().await,
    }
    .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(
        reservations.into_iter().map(ReservationDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .repos
        .reservations()
        .find_by_id(&id)
        .await
        .map_err(domain_error_response)?
        .ok_or_else(|| domain_error_response(DomainError::not_found("Reservation", &id)))?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/by-confirmation/{number}",
    tag = "Reservations",
    params(("number" = String, Path, description = "Confirmation number, e.g. RSV-1A2B3C4D")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation_by_confirmation(
    State(state): State<ReservationAppState>,
    Path(number): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .repos
        .reservations()
        .find_by_confirmation(&number)
        .await
        .map_err(domain_error_response)?
        .ok_or_else(|| domain_error_response(DomainError::not_found("Reservation", &number)))?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/cancel",
    tag = "Reservations",
    params(("id" = String, Path, description = "Reservation ID")),
    request_body = CancelReservationRequest,
    responses(
        (status = 200, description = "Reservation cancelled", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Reservation not found"),
        (status = 422, description = "Reservation cannot be cancelled from its current status")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<CancelReservationRequest>,
) -> Result<Json<ApiResponse<ReservationDto>>, (StatusCode, Json<ApiResponse<ReservationDto>>)> {
    let reservation = state
        .front_desk
        .cancel(&id, request.reason.as_deref())
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(reservation.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}/ledger",
    tag = "Reservations",
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Ledger history and balance", body = ApiResponse<LedgerSummaryDto>),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_ledger(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<LedgerSummaryDto>>, (StatusCode, Json<ApiResponse<LedgerSummaryDto>>)> {
    // Unknown reservations are a 404, not an empty ledger
    let balance = state.billing.balance(&id).await.map_err(domain_error_response)?;
    let entries = state.billing.history(&id).await.map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(LedgerSummaryDto {
        balance,
        entries: entries.into_iter().map(LedgerEntryDto::from).collect(),
    })))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/ledger",
    tag = "Reservations",
    params(("id" = String, Path, description = "Reservation ID")),
    request_body = AppendLedgerEntryRequest,
    responses(
        (status = 200, description = "Entry appended", body = ApiResponse<LedgerEntryDto>),
        (status = 400, description = "Unknown entry kind or sign mismatch"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn append_ledger_entry(
    State(state): State<ReservationAppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AppendLedgerEntryRequest>,
) -> Result<Json<ApiResponse<LedgerEntryDto>>, (StatusCode, Json<ApiResponse<LedgerEntryDto>>)> {
    let kind = EntryKind::parse(&request.kind)
        .ok_or_else(|| {
            domain_error_response(DomainError::Validation(format!(
                "unknown ledger entry kind '{}'",
                request.kind
            )))
        })?;

    let entry = state
        .billing
        .append(&id, kind, request.amount, request.note)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(entry.into())))
}
