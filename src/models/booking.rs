use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Cancellation is one-way; there is no path back to `Confirmed` and
/// bookings are never physically deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub room_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct RoomSummary {
    pub room_type: String,
    pub price_per_night: f64,
    pub max_guests: i64,
}

#[derive(Debug, Serialize)]
pub struct HotelSummary {
    pub name: String,
    pub location: String,
    pub description: Option<String>,
}

/// Admission response: the persisted booking enriched with user, room and
/// hotel details for display.
#[derive(Debug, Serialize)]
pub struct BookingConfirmation {
    pub booking_id: i64,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: BookingStatus,
    pub user_name: String,
    pub room_id: i64,
    pub room_number: String,
    pub room: RoomSummary,
    pub hotel: HotelSummary,
}

/// History entry: booking joined with room and hotel display fields.
#[derive(Debug, Serialize, FromRow)]
pub struct BookingHistoryEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub booking: Booking,
    pub room_number: String,
    pub room_type: String,
    pub hotel_name: String,
    pub hotel_location: String,
}
