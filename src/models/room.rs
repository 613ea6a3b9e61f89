use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Room {
    pub id: i64,
    pub hotel_id: i64,
    pub room_number: String,
    pub room_type: String,
    pub price_per_night: f64,
    pub max_guests: i64,
    pub is_available: bool,
    pub is_active: bool,
    pub is_featured: bool,
    pub description: Option<String>,
    pub size: Option<String>,
    pub amenities: Option<String>,
    pub room_image: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Validate)]
pub struct RoomInput {
    pub hotel_id: i64,
    #[validate(length(min = 1, max = 20))]
    pub room_number: String,
    #[validate(length(min = 1, max = 50))]
    pub room_type: String,
    #[validate(range(min = 0.0))]
    pub price_per_night: f64,
    #[validate(range(min = 1))]
    pub max_guests: i64,
    pub is_available: Option<bool>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[validate(length(max = 50))]
    pub size: Option<String>,
    #[validate(length(max = 255))]
    pub amenities: Option<String>,
}

/// Room row joined with its hotel's display fields.
#[derive(Debug, Serialize, FromRow)]
pub struct RoomWithHotel {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub room: Room,
    pub hotel_name: String,
    pub hotel_location: String,
    pub hotel_description: Option<String>,
}
