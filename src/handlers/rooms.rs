use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};
use validator::Validate;

use super::store_image;
use crate::auth::AdminUser;
use crate::error::{field_error, ApiError};
use crate::models::room::RoomInput;
use crate::response::ApiResponse;
use crate::storage::ImageStore;
use crate::store::Store;

const IMAGE_SUBDIR: &str = "room_images";

#[derive(Debug, MultipartForm)]
pub struct RoomForm {
    pub hotel_id: Text<i64>,
    pub room_number: Text<String>,
    pub room_type: Text<String>,
    pub price_per_night: Text<f64>,
    pub max_guests: Text<i64>,
    pub is_available: Option<Text<bool>>,
    pub is_active: Option<Text<bool>>,
    pub is_featured: Option<Text<bool>>,
    pub description: Option<Text<String>>,
    pub size: Option<Text<String>>,
    pub amenities: Option<Text<String>>,
    pub room_image: Option<TempFile>,
}

impl RoomForm {
    fn into_parts(self) -> (RoomInput, Option<TempFile>) {
        (
            RoomInput {
                hotel_id: self.hotel_id.0,
                room_number: self.room_number.0,
                room_type: self.room_type.0,
                price_per_night: self.price_per_night.0,
                max_guests: self.max_guests.0,
                is_available: self.is_available.map(|t| t.0),
                is_active: self.is_active.map(|t| t.0),
                is_featured: self.is_featured.map(|t| t.0),
                description: self.description.map(|t| t.0),
                size: self.size.map(|t| t.0),
                amenities: self.amenities.map(|t| t.0),
            },
            self.room_image,
        )
    }
}

#[derive(Debug, MultipartForm)]
pub struct UpdateRoomForm {
    pub id: Text<i64>,
    pub hotel_id: Text<i64>,
    pub room_number: Text<String>,
    pub room_type: Text<String>,
    pub price_per_night: Text<f64>,
    pub max_guests: Text<i64>,
    pub is_available: Option<Text<bool>>,
    pub is_active: Option<Text<bool>>,
    pub is_featured: Option<Text<bool>>,
    pub description: Option<Text<String>>,
    pub size: Option<Text<String>>,
    pub amenities: Option<Text<String>>,
    pub room_image: Option<TempFile>,
}

impl UpdateRoomForm {
    fn into_parts(self) -> (i64, RoomInput, Option<TempFile>) {
        (
            self.id.0,
            RoomInput {
                hotel_id: self.hotel_id.0,
                room_number: self.room_number.0,
                room_type: self.room_type.0,
                price_per_night: self.price_per_night.0,
                max_guests: self.max_guests.0,
                is_available: self.is_available.map(|t| t.0),
                is_active: self.is_active.map(|t| t.0),
                is_featured: self.is_featured.map(|t| t.0),
                description: self.description.map(|t| t.0),
                size: self.size.map(|t| t.0),
                amenities: self.amenities.map(|t| t.0),
            },
            self.room_image,
        )
    }
}

async fn require_hotel(store: &Store, hotel_id: i64) -> Result<(), ApiError> {
    if store.find_hotel_by_id(hotel_id).await?.is_none() {
        return Err(field_error("hotel_id", "exists", "The selected hotel does not exist").into());
    }
    Ok(())
}

pub async fn list_rooms(
    store: web::Data<Store>,
    _admin: AdminUser,
) -> Result<HttpResponse, ApiError> {
    let rooms = store.list_rooms().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Rooms retrieved successfully", rooms)))
}

pub async fn create_room(
    store: web::Data<Store>,
    images: web::Data<dyn ImageStore>,
    _admin: AdminUser,
    MultipartForm(form): MultipartForm<RoomForm>,
) -> Result<HttpResponse, ApiError> {
    let (input, upload) = form.into_parts();
    input.validate()?;
    require_hotel(&store, input.hotel_id).await?;

    let image = match &upload {
        Some(file) => Some(store_image(images.get_ref(), file, "room_image", IMAGE_SUBDIR)?),
        None => None,
    };

    let room = store.insert_room(&input, image.as_deref()).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok("Room created successfully", room)))
}

pub async fn edit_room(
    store: web::Data<Store>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let room = store
        .find_room_with_hotel(path.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Room retrieved successfully", room)))
}

pub async fn update_room(
    store: web::Data<Store>,
    images: web::Data<dyn ImageStore>,
    _admin: AdminUser,
    MultipartForm(form): MultipartForm<UpdateRoomForm>,
) -> Result<HttpResponse, ApiError> {
    let (id, input, upload) = form.into_parts();
    input.validate()?;

    let room = store
        .find_room_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;
    require_hotel(&store, input.hotel_id).await?;

    let image = match &upload {
        Some(file) => Some(store_image(images.get_ref(), file, "room_image", IMAGE_SUBDIR)?),
        None => None,
    };

    let updated = store
        .update_room(room.id, &input, image.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;

    if image.is_some() {
        if let Some(old) = &room.room_image {
            images.delete(old);
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Room updated successfully", updated)))
}

pub async fn delete_room(
    store: web::Data<Store>,
    images: web::Data<dyn ImageStore>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let room = store
        .find_room_by_id(path.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;

    store.delete_room(room.id).await?;

    if let Some(image) = &room.room_image {
        images.delete(image);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("Room deleted successfully")))
}
