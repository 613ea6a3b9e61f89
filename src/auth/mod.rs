use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::user::{Role, User};

/// Bearer token claims: user identity plus the role that gates route groups.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub name: String,
    pub role: Role,
    pub exp: i64,
}

pub fn issue_token(user: &User, config: &Config) -> Result<String, jsonwebtoken::errors::Error> {
    let exp = (Utc::now() + Duration::hours(config.token_ttl_hours)).timestamp();
    let claims = Claims {
        sub: user.id,
        name: user.name.clone(),
        role: user.role,
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
}

/// Authenticated caller identity, decoded from the bearer token. Services
/// take this explicitly instead of reading any ambient auth context.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub name: String,
    pub role: Role,
}

fn missing_credentials() -> ApiError {
    ApiError::Unauthorized("Unauthorized user access. Please log in.".to_string())
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(missing_credentials)?;

    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(missing_credentials)?;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => {
            ApiError::Unauthorized("Token has expired. Please log in again.".to_string())
        }
        _ => ApiError::Unauthorized("Invalid token.".to_string()),
    })?;

    Ok(AuthUser {
        id: data.claims.sub,
        name: data.claims.name,
        role: data.claims.role,
    })
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// Extractor for admin-gated routes.
#[derive(Debug)]
pub struct AdminUser(pub AuthUser);

impl FromRequest for AdminUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).and_then(|user| match user.role {
            Role::Admin => Ok(AdminUser(user)),
            Role::User => Err(ApiError::Forbidden("Admin access required".to_string())),
        }))
    }
}

/// Extractor for routes restricted to the `user` role (booking and search).
#[derive(Debug)]
pub struct MemberUser(pub AuthUser);

impl FromRequest for MemberUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).and_then(|user| match user.role {
            Role::User => Ok(MemberUser(user)),
            Role::Admin => Err(ApiError::Forbidden("User access required".to_string())),
        }))
    }
}
