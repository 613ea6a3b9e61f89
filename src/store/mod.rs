use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::booking::{Booking, BookingHistoryEntry};
use crate::models::hotel::{Hotel, HotelInput, HotelWithCreator};
use crate::models::room::{Room, RoomInput, RoomWithHotel};
use crate::models::user::{Role, User};

/// All persistence goes through here; entities stay plain data. Handlers and
/// services never touch the pool directly.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ---- users ----

    pub async fn insert_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> Result<User, sqlx::Error> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password_hash, role) VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    // ---- hotels ----

    pub async fn list_hotels(&self) -> Result<Vec<HotelWithCreator>, sqlx::Error> {
        sqlx::query_as::<_, HotelWithCreator>(
            "SELECT h.*, u.name AS created_by_name
             FROM hotels h
             JOIN users u ON u.id = h.created_by",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_hotel_by_id(&self, id: i64) -> Result<Option<Hotel>, sqlx::Error> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_hotel_with_creator(
        &self,
        id: i64,
    ) -> Result<Option<HotelWithCreator>, sqlx::Error> {
        sqlx::query_as::<_, HotelWithCreator>(
            "SELECT h.*, u.name AS created_by_name
             FROM hotels h
             JOIN users u ON u.id = h.created_by
             WHERE h.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_hotel_by_name(&self, name: &str) -> Result<Option<Hotel>, sqlx::Error> {
        sqlx::query_as::<_, Hotel>("SELECT * FROM hotels WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert_hotel(
        &self,
        created_by: i64,
        input: &HotelInput,
        image: Option<&str>,
    ) -> Result<Hotel, sqlx::Error> {
        sqlx::query_as::<_, Hotel>(
            "INSERT INTO hotels
                 (name, location, description, contact_number, email, hotel_image,
                  is_active, is_featured, created_by)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.location)
        .bind(&input.description)
        .bind(&input.contact_number)
        .bind(&input.email)
        .bind(image)
        .bind(input.is_active.unwrap_or(true))
        .bind(input.is_featured.unwrap_or(false))
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    /// `image = None` keeps the existing image path.
    pub async fn update_hotel(
        &self,
        id: i64,
        input: &HotelInput,
        image: Option<&str>,
    ) -> Result<Option<Hotel>, sqlx::Error> {
        sqlx::query_as::<_, Hotel>(
            "UPDATE hotels SET
                 name = ?,
                 location = ?,
                 description = ?,
                 contact_number = ?,
                 email = ?,
                 is_active = COALESCE(?, is_active),
                 is_featured = COALESCE(?, is_featured),
                 hotel_image = COALESCE(?, hotel_image)
             WHERE id = ?
             RETURNING *",
        )
        .bind(&input.name)
        .bind(&input.location)
        .bind(&input.description)
        .bind(&input.contact_number)
        .bind(&input.email)
        .bind(input.is_active)
        .bind(input.is_featured)
        .bind(image)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_hotel(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM hotels WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Hotels whose location contains `location` (case-insensitive);
    /// all hotels when no filter is given.
    pub async fn hotels_by_location(
        &self,
        location: Option<&str>,
    ) -> Result<Vec<Hotel>, sqlx::Error> {
        sqlx::query_as::<_, Hotel>(
            "SELECT * FROM hotels WHERE (? IS NULL OR location LIKE '%' || ? || '%')",
        )
        .bind(location)
        .bind(location)
        .fetch_all(&self.pool)
        .await
    }

    // ---- rooms ----

    pub async fn list_rooms(&self) -> Result<Vec<RoomWithHotel>, sqlx::Error> {
        sqlx::query_as::<_, RoomWithHotel>(
            "SELECT r.*, h.name AS hotel_name, h.location AS hotel_location,
                    h.description AS hotel_description
             FROM rooms r
             JOIN hotels h ON h.id = r.hotel_id",
        )
        .fetch_all(&self.pool)
        .await
    }

    pub async fn find_room_by_id(&self, id: i64) -> Result<Option<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn find_room_with_hotel(
        &self,
        id: i64,
    ) -> Result<Option<RoomWithHotel>, sqlx::Error> {
        sqlx::query_as::<_, RoomWithHotel>(
            "SELECT r.*, h.name AS hotel_name, h.location AS hotel_location,
                    h.description AS hotel_description
             FROM rooms r
             JOIN hotels h ON h.id = r.hotel_id
             WHERE r.id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// `band` is the inclusive (min, max) nightly price filter; `None`
    /// disables price filtering entirely.
    pub async fn rooms_for_hotel(
        &self,
        hotel_id: i64,
        band: Option<(f64, f64)>,
    ) -> Result<Vec<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms
             WHERE hotel_id = ?
               AND (? IS NULL OR price_per_night BETWEEN ? AND ?)",
        )
        .bind(hotel_id)
        .bind(band.map(|b| b.0))
        .bind(band.map(|b| b.0))
        .bind(band.map(|b| b.1))
        .fetch_all(&self.pool)
        .await
    }

    pub async fn insert_room(
        &self,
        input: &RoomInput,
        image: Option<&str>,
    ) -> Result<Room, sqlx::Error> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms
                 (hotel_id, room_number, room_type, price_per_night, max_guests,
                  is_available, is_active, is_featured, description, size, amenities, room_image)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
        .bind(input.hotel_id)
        .bind(&input.room_number)
        .bind(&input.room_type)
        .bind(input.price_per_night)
        .bind(input.max_guests)
        .bind(input.is_available.unwrap_or(true))
        .bind(input.is_active.unwrap_or(true))
        .bind(input.is_featured.unwrap_or(false))
        .bind(&input.description)
        .bind(&input.size)
        .bind(&input.amenities)
        .bind(image)
        .fetch_one(&self.pool)
        .await
    }

    pub async fn update_room(
        &self,
        id: i64,
        input: &RoomInput,
        image: Option<&str>,
    ) -> Result<Option<Room>, sqlx::Error> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET
                 hotel_id = ?,
                 room_number = ?,
                 room_type = ?,
                 price_per_night = ?,
                 max_guests = ?,
                 is_available = COALESCE(?, is_available),
                 is_active = COALESCE(?, is_active),
                 is_featured = COALESCE(?, is_featured),
                 description = ?,
                 size = ?,
                 amenities = ?,
                 room_image = COALESCE(?, room_image)
             WHERE id = ?
             RETURNING *",
        )
        .bind(input.hotel_id)
        .bind(&input.room_number)
        .bind(&input.room_type)
        .bind(input.price_per_night)
        .bind(input.max_guests)
        .bind(input.is_available)
        .bind(input.is_active)
        .bind(input.is_featured)
        .bind(&input.description)
        .bind(&input.size)
        .bind(&input.amenities)
        .bind(image)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn delete_room(&self, id: i64) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    // ---- bookings ----

    pub async fn confirmed_bookings_for_room(
        &self,
        room_id: i64,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings WHERE room_id = ? AND status = 'confirmed'",
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Check-then-create in a single statement: the insert only happens when
    /// no confirmed booking overlaps the requested window (inclusive on both
    /// boundary dates). Two concurrent admissions for the same window can
    /// therefore never both commit; the loser gets `None`.
    pub async fn try_insert_booking(
        &self,
        user_id: i64,
        room_id: i64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (user_id, room_id, check_in_date, check_out_date, status)
             SELECT ?, ?, ?, ?, 'confirmed'
             WHERE NOT EXISTS (
                 SELECT 1 FROM bookings
                 WHERE room_id = ?
                   AND status = 'confirmed'
                   AND (
                       check_in_date BETWEEN ? AND ?
                       OR check_out_date BETWEEN ? AND ?
                       OR ? BETWEEN check_in_date AND check_out_date
                       OR ? BETWEEN check_in_date AND check_out_date
                   )
             )
             RETURNING *",
        )
        .bind(user_id)
        .bind(room_id)
        .bind(check_in)
        .bind(check_out)
        .bind(room_id)
        .bind(check_in)
        .bind(check_out)
        .bind(check_in)
        .bind(check_out)
        .bind(check_in)
        .bind(check_out)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn bookings_for_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<BookingHistoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, BookingHistoryEntry>(
            "SELECT b.*, r.room_number, r.room_type,
                    h.name AS hotel_name, h.location AS hotel_location
             FROM bookings b
             JOIN rooms r ON r.id = b.room_id
             JOIN hotels h ON h.id = r.hotel_id
             WHERE b.user_id = ?
             ORDER BY b.check_in_date DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    /// Ownership scoped: a booking belonging to someone else is
    /// indistinguishable from a missing one.
    pub async fn find_booking_for_user(
        &self,
        id: i64,
        user_id: i64,
    ) -> Result<Option<Booking>, sqlx::Error> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn cancel_booking(&self, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE bookings SET status = 'cancelled' WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
