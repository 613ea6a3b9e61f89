use chrono::NaiveDateTime;
use serde::Serialize;
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub contact_number: Option<String>,
    pub email: Option<String>,
    pub hotel_image: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_by: i64,
    pub created_at: NaiveDateTime,
}

/// Validated hotel fields, shared by create and update. Image handling is
/// separate: handlers store the file and pass the resulting path down.
#[derive(Debug, Validate)]
pub struct HotelInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub location: String,
    pub description: Option<String>,
    #[validate(length(max = 15))]
    pub contact_number: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Hotel row joined with the creating admin's name, for admin listings.
#[derive(Debug, Serialize, FromRow)]
pub struct HotelWithCreator {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub hotel: Hotel,
    pub created_by_name: String,
}
