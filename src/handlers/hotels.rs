use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};
use serde_json::json;
use validator::Validate;

use super::store_image;
use crate::auth::AdminUser;
use crate::error::ApiError;
use crate::models::hotel::HotelInput;
use crate::response::ApiResponse;
use crate::storage::ImageStore;
use crate::store::Store;

const IMAGE_SUBDIR: &str = "hotel_images";

#[derive(Debug, MultipartForm)]
pub struct HotelForm {
    pub name: Text<String>,
    pub location: Text<String>,
    pub description: Option<Text<String>>,
    pub contact_number: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub is_active: Option<Text<bool>>,
    pub is_featured: Option<Text<bool>>,
    pub hotel_image: Option<TempFile>,
}

impl HotelForm {
    fn into_parts(self) -> (HotelInput, Option<TempFile>) {
        (
            HotelInput {
                name: self.name.0,
                location: self.location.0,
                description: self.description.map(|t| t.0),
                contact_number: self.contact_number.map(|t| t.0),
                email: self.email.map(|t| t.0),
                is_active: self.is_active.map(|t| t.0),
                is_featured: self.is_featured.map(|t| t.0),
            },
            self.hotel_image,
        )
    }
}

#[derive(Debug, MultipartForm)]
pub struct UpdateHotelForm {
    pub id: Text<i64>,
    pub name: Text<String>,
    pub location: Text<String>,
    pub description: Option<Text<String>>,
    pub contact_number: Option<Text<String>>,
    pub email: Option<Text<String>>,
    pub is_active: Option<Text<bool>>,
    pub is_featured: Option<Text<bool>>,
    pub hotel_image: Option<TempFile>,
}

impl UpdateHotelForm {
    fn into_parts(self) -> (i64, HotelInput, Option<TempFile>) {
        (
            self.id.0,
            HotelInput {
                name: self.name.0,
                location: self.location.0,
                description: self.description.map(|t| t.0),
                contact_number: self.contact_number.map(|t| t.0),
                email: self.email.map(|t| t.0),
                is_active: self.is_active.map(|t| t.0),
                is_featured: self.is_featured.map(|t| t.0),
            },
            self.hotel_image,
        )
    }
}

pub async fn list_hotels(
    store: web::Data<Store>,
    _admin: AdminUser,
) -> Result<HttpResponse, ApiError> {
    let hotels = store.list_hotels().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Hotels retrieved successfully", hotels)))
}

pub async fn create_hotel(
    store: web::Data<Store>,
    images: web::Data<dyn ImageStore>,
    admin: AdminUser,
    MultipartForm(form): MultipartForm<HotelForm>,
) -> Result<HttpResponse, ApiError> {
    let (input, upload) = form.into_parts();
    input.validate()?;

    if store.find_hotel_by_name(&input.name).await?.is_some() {
        return Err(ApiError::Conflict("Hotel already exists".to_string()));
    }

    let image = match &upload {
        Some(file) => Some(store_image(images.get_ref(), file, "hotel_image", IMAGE_SUBDIR)?),
        None => None,
    };

    let hotel = store
        .insert_hotel(admin.0.id, &input, image.as_deref())
        .await
        .map_err(|err| match &err {
            // Lost the create/create race on the name unique index.
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Conflict("Hotel already exists".to_string())
            }
            _ => ApiError::from(err),
        })?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(
        "Hotel created successfully",
        json!({
            "id": hotel.id,
            "name": hotel.name,
            "location": hotel.location,
            "description": hotel.description,
            "hotel_image": hotel.hotel_image,
            "created_by": admin.0.name,
        }),
    )))
}

pub async fn edit_hotel(
    store: web::Data<Store>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let hotel = store
        .find_hotel_with_creator(path.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Hotel retrieved successfully", hotel)))
}

pub async fn update_hotel(
    store: web::Data<Store>,
    images: web::Data<dyn ImageStore>,
    _admin: AdminUser,
    MultipartForm(form): MultipartForm<UpdateHotelForm>,
) -> Result<HttpResponse, ApiError> {
    let (id, input, upload) = form.into_parts();
    input.validate()?;

    let hotel = store
        .find_hotel_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;

    if let Some(existing) = store.find_hotel_by_name(&input.name).await? {
        if existing.id != hotel.id {
            return Err(ApiError::Conflict("Hotel already exists".to_string()));
        }
    }

    let image = match &upload {
        Some(file) => Some(store_image(images.get_ref(), file, "hotel_image", IMAGE_SUBDIR)?),
        None => None,
    };

    let updated = store
        .update_hotel(hotel.id, &input, image.as_deref())
        .await?
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;

    // The row now points at the new image; the old file is disposable.
    if image.is_some() {
        if let Some(old) = &hotel.hotel_image {
            images.delete(old);
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::ok("Hotel updated successfully", updated)))
}

pub async fn delete_hotel(
    store: web::Data<Store>,
    images: web::Data<dyn ImageStore>,
    _admin: AdminUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let hotel = store
        .find_hotel_by_id(path.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("Hotel not found".to_string()))?;

    store.delete_hotel(hotel.id).await?;

    if let Some(image) = &hotel.hotel_image {
        images.delete(image);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::message("Hotel deleted successfully")))
}
