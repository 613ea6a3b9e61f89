use chrono::NaiveDate;
use sqlx::sqlite::SqlitePoolOptions;

use crate::auth::AuthUser;
use crate::config::Config;
use crate::db::MIGRATOR;
use crate::models::hotel::{Hotel, HotelInput};
use crate::models::room::{Room, RoomInput};
use crate::models::user::{Role, User};
use crate::store::Store;

pub async fn memory_store() -> Store {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    MIGRATOR.run(&pool).await.unwrap();
    Store::new(pool)
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        jwt_secret: "test-secret".to_string(),
        token_ttl_hours: 1,
        upload_dir: "upload".to_string(),
    }
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub async fn seed_user(store: &Store, name: &str, email: &str, role: Role) -> User {
    store
        .insert_user(name, email, "not-a-real-hash", role)
        .await
        .unwrap()
}

pub fn auth_user(user: &User) -> AuthUser {
    AuthUser {
        id: user.id,
        name: user.name.clone(),
        role: user.role,
    }
}

pub async fn seed_hotel(store: &Store, admin_id: i64, name: &str, location: &str) -> Hotel {
    let input = HotelInput {
        name: name.to_string(),
        location: location.to_string(),
        description: None,
        contact_number: None,
        email: None,
        is_active: None,
        is_featured: None,
    };
    store.insert_hotel(admin_id, &input, None).await.unwrap()
}

pub async fn seed_room(store: &Store, hotel_id: i64, room_number: &str, price: f64) -> Room {
    let input = RoomInput {
        hotel_id,
        room_number: room_number.to_string(),
        room_type: "double".to_string(),
        price_per_night: price,
        max_guests: 2,
        is_available: None,
        is_active: None,
        is_featured: None,
        description: None,
        size: None,
        amenities: None,
    };
    store.insert_room(&input, None).await.unwrap()
}
