use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::auth::MemberUser;
use crate::error::ApiError;
use crate::models::booking::CreateBookingRequest;
use crate::response::ApiResponse;
use crate::services;
use crate::services::search::SearchQuery;
use crate::store::Store;

pub async fn create_booking(
    store: web::Data<Store>,
    user: MemberUser,
    body: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, ApiError> {
    let today = Utc::now().date_naive();
    let confirmation = services::booking::create_booking(&store, &user.0, &body, today).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok("Booking confirmed", confirmation)))
}

pub async fn search_hotels(
    store: web::Data<Store>,
    _user: MemberUser,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let hotels = services::search::search_hotels(&store, &query).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Hotels found", hotels)))
}

pub async fn booking_history(
    store: web::Data<Store>,
    user: MemberUser,
) -> Result<HttpResponse, ApiError> {
    let bookings = services::booking::booking_history(&store, user.0.id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Booking history retrieved successfully",
        bookings,
    )))
}

pub async fn cancel_booking(
    store: web::Data<Store>,
    user: MemberUser,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    let today = Utc::now().date_naive();
    let booking =
        services::booking::cancel_booking(&store, user.0.id, path.into_inner(), today).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("Booking cancelled successfully", booking)))
}
