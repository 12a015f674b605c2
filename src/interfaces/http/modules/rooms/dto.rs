//! Room DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Room, RoomType};

/// Query parameters for listing rooms
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ListRoomsParams {
    pub property_id: String,
}

/// Query parameters for the availability search
#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct AvailableRoomsParams {
    pub property_id: String,
    pub room_type_id: String,
    /// Arrival date (inclusive)
    pub arrival_date: NaiveDate,
    /// Departure date (exclusive)
    pub departure_date: NaiveDate,
}

/// Request to register a new room
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRoomRequest {
    #[validate(length(min = 1))]
    pub property_id: String,
    #[validate(length(min = 1))]
    pub room_number: String,
    #[validate(length(min = 1))]
    pub room_type_id: String,
}

/// Request to flip a room's operational status
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateRoomStatusRequest {
    /// One of `available`, `out_of_service`
    #[validate(length(min = 1))]
    pub status: String,
}

/// Room details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomDto {
    pub id: String,
    pub property_id: String,
    pub room_number: String,
    pub room_type_id: String,
    pub status: String,
    pub created_at: String,
}

impl From<Room> for RoomDto {
    fn from(r: Room) -> Self {
        Self {
            id: r.id,
            property_id: r.property_id,
            room_number: r.room_number,
            room_type_id: r.room_type_id,
            status: r.status.as_str().to_string(),
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// Room type details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct RoomTypeDto {
    pub id: String,
    pub property_id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<RoomType> for RoomTypeDto {
    fn from(t: RoomType) -> Self {
        Self {
            id: t.id,
            property_id: t.property_id,
            name: t.name,
            description: t.description,
        }
    }
}
