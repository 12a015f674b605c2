//! Room HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::services::FrontDeskService;
use crate::domain::{DomainError, Room, RoomStatus, RepositoryProvider, StayInterval};
use crate::interfaces::http::common::{domain_error_response, ApiResponse, ValidatedJson};

use super::dto::*;

/// Application state for room handlers.
#[derive(Clone)]
pub struct RoomAppState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub front_desk: Arc<FrontDeskService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms",
    tag = "Rooms",
    params(ListRoomsParams),
    responses(
        (status = 200, description = "Rooms in the property", body = ApiResponse<Vec<RoomDto>>)
    )
)]
pub async fn list_rooms(
    State(state): State<RoomAppState>,
    Query(params): Query<ListRoomsParams>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, (StatusCode, Json<ApiResponse<Vec<RoomDto>>>)> {
    let mut rooms = state
        .repos
        .rooms()
        .list_by_property(&params.property_id)
        .await
        .map_err(domain_error_response)?;
    rooms.sort_by_key(Room::number_sort_key);
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/rooms/available",
    tag = "Rooms",
    params(AvailableRoomsParams),
    responses(
        (status = 200, description = "Rooms free for the whole interval", body = ApiResponse<Vec<RoomDto>>),
        (status = 400, description = "Invalid stay interval")
    )
)]
pub async fn available_rooms(
    State(state): State<RoomAppState>,
    Query(params): Query<AvailableRoomsParams>,
) -> Result<Json<ApiResponse<Vec<RoomDto>>>, (StatusCode, Json<ApiResponse<Vec<RoomDto>>>)> {
    let interval = StayInterval::new(params.arrival_date, params.departure_date)
        .map_err(domain_error_response)?;
    let rooms = state
        .front_desk
        .available_rooms(&params.property_id, &params.room_type_id, interval)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(
        rooms.into_iter().map(RoomDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/rooms",
    tag = "Rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 200, description = "Room registered", body = ApiResponse<RoomDto>),
        (status = 404, description = "Room type not found"),
        (status = 409, description = "Room number already in use within the property")
    )
)]
pub async fn create_room(
    State(state): State<RoomAppState>,
    ValidatedJson(request): ValidatedJson<CreateRoomRequest>,
) -> Result<Json<ApiResponse<RoomDto>>, (StatusCode, Json<ApiResponse<RoomDto>>)> {
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

    let room = Room::new(request.property_id, request.room_number, request.room_type_id);
    state
        .repos
        .rooms()
        .save(room.clone())
        .await
        .map_err(domain_error_response)?;

    tracing::info!(room_id = %room.id, room_number = %room.room_number, "Room registered");
    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    patch,
    path = "/api/v1/rooms/{id}/status",
    tag = "Rooms",
    params(("id" = String, Path, description = "Room ID")),
    request_body = UpdateRoomStatusRequest,
    responses(
        (status = 200, description = "Room status updated", body = ApiResponse<RoomDto>),
        (status = 400, description = "Unknown status value"),
        (status = 404, description = "Room not found")
    )
)]
pub async fn update_room_status(
    State(state): State<RoomAppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateRoomStatusRequest>,
) -> Result<Json<ApiResponse<RoomDto>>, (StatusCode, Json<ApiResponse<RoomDto>>)> {
    let status = RoomStatus::parse(&request.status).ok_or_else(|| {
        domain_error_response(DomainError::Validation(format!(
            "unknown room status '{}'",
            request.status
        )))
    })?;

    let room = state
        .repos
        .rooms()
        .update_status(&id, status)
        .await
        .map_err(domain_error_response)?;
    tracing::info!(room_id = %room.id, status = %room.status, "Room status updated");
    Ok(Json(ApiResponse::success(room.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/room-types",
    tag = "Rooms",
    params(ListRoomsParams),
    responses(
        (status = 200, description = "Room types in the property", body = ApiResponse<Vec<RoomTypeDto>>)
    )
)]
pub async fn list_room_types(
    State(state): State<RoomAppState>,
    Query(params): Query<ListRoomsParams>,
) -> Result<Json<ApiResponse<Vec<RoomTypeDto>>>, (StatusCode, Json<ApiResponse<Vec<RoomTypeDto>>>)>
{
    let room_types = state
        .repos
        .rooms()
        .list_room_types(&params.property_id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(
        room_types.into_iter().map(RoomTypeDto::from).collect(),
    )))
}
