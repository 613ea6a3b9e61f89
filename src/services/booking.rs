use chrono::NaiveDate;

use crate::auth::AuthUser;
use crate::error::{field_error, ApiError};
use crate::models::booking::{
    Booking, BookingConfirmation, BookingHistoryEntry, BookingStatus, CreateBookingRequest,
    HotelSummary, RoomSummary,
};
use crate::services::availability;
use crate::store::Store;

const NOT_AVAILABLE: &str = "Room not available for selected dates";

/// Booking admission: validate, check availability, then commit through the
/// store's conditional insert. `today` is passed in explicitly so the rules
/// stay deterministic under test.
pub async fn create_booking(
    store: &Store,
    user: &AuthUser,
    input: &CreateBookingRequest,
    today: NaiveDate,
) -> Result<BookingConfirmation, ApiError> {
    let room = store
        .find_room_with_hotel(input.room_id)
        .await?
        .ok_or_else(|| {
            ApiError::Validation(field_error(
                "room_id",
                "exists",
                "The selected room does not exist",
            ))
        })?;

    if input.check_in_date < today {
        return Err(field_error(
            "check_in_date",
            "after_or_equal",
            "The check-in date must be today or later",
        )
        .into());
    }
    if input.check_out_date <= input.check_in_date {
        return Err(field_error(
            "check_out_date",
            "after",
            "The check-out date must be after the check-in date",
        )
        .into());
    }

    if !availability::is_room_available(store, room.room.id, input.check_in_date, input.check_out_date)
        .await?
    {
        return Err(ApiError::Conflict(NOT_AVAILABLE.to_string()));
    }

    // The availability check above can race a concurrent admission; the
    // conditional insert is the authoritative, store-serialized check.
    let booking: Booking = store
        .try_insert_booking(user.id, room.room.id, input.check_in_date, input.check_out_date)
        .await?
        .ok_or_else(|| ApiError::Conflict(NOT_AVAILABLE.to_string()))?;

    Ok(BookingConfirmation {
        booking_id: booking.id,
        check_in_date: booking.check_in_date,
        check_out_date: booking.check_out_date,
        status: booking.status,
        user_name: user.name.clone(),
        room_id: room.room.id,
        room_number: room.room.room_number.clone(),
        room: RoomSummary {
            room_type: room.room.room_type.clone(),
            price_per_night: room.room.price_per_night,
            max_guests: room.room.max_guests,
        },
        hotel: HotelSummary {
            name: room.hotel_name,
            location: room.hotel_location,
            description: room.hotel_description,
        },
    })
}

/// Every booking the user owns, any status, newest stay first.
pub async fn booking_history(
    store: &Store,
    user_id: i64,
) -> Result<Vec<BookingHistoryEntry>, ApiError> {
    Ok(store.bookings_for_user(user_id).await?)
}

/// Cancel a future booking. Lookup is scoped to the owner, so a foreign
/// booking id reads as not found. Cancelling frees the room's window.
pub async fn cancel_booking(
    store: &Store,
    user_id: i64,
    booking_id: i64,
    today: NaiveDate,
) -> Result<Booking, ApiError> {
    let mut booking = store
        .find_booking_for_user(booking_id, user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

    if booking.check_in_date <= today {
        return Err(ApiError::InvalidState(
            "Cannot cancel past or current bookings".to_string(),
        ));
    }

    store.cancel_booking(booking.id).await?;
    booking.status = BookingStatus::Cancelled;
    Ok(booking)
}
