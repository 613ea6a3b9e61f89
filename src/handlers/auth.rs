use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::auth::AuthUser;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::user::{LoginRequest, RegisterRequest};
use crate::response::ApiResponse;
use crate::services;
use crate::store::Store;

pub async fn register(
    store: web::Data<Store>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let user = services::auth::register(&store, &body).await?;
    Ok(HttpResponse::Created().json(ApiResponse::ok(
        "User registered successfully",
        json!({ "user": user }),
    )))
}

pub async fn login(
    store: web::Data<Store>,
    config: web::Data<Config>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let (user, token) = services::auth::login(&store, &config, &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(
        "Login successful",
        json!({ "user": user, "token": token }),
    )))
}

/// The caller behind the presented token.
pub async fn me(store: web::Data<Store>, user: AuthUser) -> Result<HttpResponse, ApiError> {
    let user = store
        .find_user_by_id(user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok("User retrieved successfully", user)))
}
