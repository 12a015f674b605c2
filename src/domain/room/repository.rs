//! Room repository trait

use async_trait::async_trait;

use crate::domain::error::DomainResult;

use super::model::{Room, RoomStatus, RoomType};

/// Persistence seam for rooms and room-type reference data
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Insert a new room; `Conflict` if the room number is taken
    /// within the property
    async fn save(&self, room: Room) -> DomainResult<()>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Room>>;

    async fn list_by_property(&self, property_id: &str) -> DomainResult<Vec<Room>>;

    async fn list_by_room_type(
        &self,
        property_id: &str,
        room_type_id: &str,
    ) -> DomainResult<Vec<Room>>;

    async fn update_status(&self, id: &str, status: RoomStatus) -> DomainResult<Room>;

    // Room types are immutable reference data for this engine
    async fn save_room_type(&self, room_type: RoomType) -> DomainResult<()>;

    async fn find_room_type(&self, id: &str) -> DomainResult<Option<RoomType>>;

    async fn list_room_types(&self, property_id: &str) -> DomainResult<Vec<RoomType>>;
}
