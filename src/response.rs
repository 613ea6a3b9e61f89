use serde::Serialize;

/// Uniform response envelope: `{status, message, data?}`.
/// Failure envelopes are produced by `ApiError::error_response`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: &str, data: T) -> Self {
        Self {
            status: true,
            message: message.to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        Self {
            status: true,
            message: message.to_string(),
            data: None,
        }
    }
}
