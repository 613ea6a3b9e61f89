use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Error taxonomy shared by every service and handler. Each variant maps to
/// exactly one response code; unexpected store/IO failures collapse into the
/// 500 variants at the `From` boundary and are logged before being masked.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error")]
    Validation(#[from] ValidationErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidState(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("Internal server error")]
    Database(#[from] sqlx::Error),
    #[error("Internal server error")]
    Hash(#[from] bcrypt::BcryptError),
    #[error("Internal server error")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error("Internal server error")]
    Io(#[from] std::io::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidState(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Database(_) | ApiError::Hash(_) | ApiError::Token(_) | ApiError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(errors) => json!({
                "status": false,
                "message": "Validation error",
                "errors": errors,
            }),
            ApiError::Database(_) | ApiError::Hash(_) | ApiError::Token(_) | ApiError::Io(_) => {
                log::error!("request failed: {self:?}");
                json!({
                    "status": false,
                    "message": "Internal server error",
                })
            }
            other => json!({
                "status": false,
                "message": other.to_string(),
            }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Single-field validation failure, for rules that cannot be expressed as
/// derive attributes (date-vs-today checks, foreign key existence).
pub fn field_error(field: &'static str, code: &'static str, message: &'static str) -> ValidationErrors {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    let mut errors = ValidationErrors::new();
    errors.add(field, error);
    errors
}
