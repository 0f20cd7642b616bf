// HTTP API Error Types
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::{DatabaseError, UserStoreError};
use crate::filter::FilterError;
use crate::providers::ProviderError;

/// HTTP API error. The message doubles as the response `description` and
/// always starts with a stable kind tag such as `INVALID_FILTER_STRING`.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    pub fn title(&self) -> &'static str {
        self.status_code().canonical_reason().unwrap_or("Error")
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "title": self.title(),
            "description": self.message(),
            "code": self.status_code().as_u16()
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error() -> Self {
        ApiError::InternalServerError("INTERNAL_SERVER_ERROR: An error occurred while processing your request".to_string())
    }

    pub fn invalid_jwt(detail: impl std::fmt::Display) -> Self {
        ApiError::Unauthorized(format!("INVALID_JWT_TOKEN: {}", detail))
    }

    pub fn readonly_access(username: &str) -> Self {
        ApiError::BadRequest(format!(
            "READONLY_ACCESS_FOR_USER: user '{}' is not allowed to modify data",
            username
        ))
    }
}

// Convert other error types to ApiError
impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Log the real error but return generic message
        tracing::error!("Database error: {}", err);
        ApiError::internal_server_error()
    }
}

impl From<UserStoreError> for ApiError {
    fn from(err: UserStoreError) -> Self {
        tracing::error!("User store error: {}", err);
        ApiError::internal_server_error()
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Filter(e) => e.into(),
            e @ ProviderError::NotFound { .. } => ApiError::not_found(e.to_string()),
            ProviderError::Store(e) => e.into(),
        }
    }
}

// Extractor rejections keep the JSON error body and are always 400
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::bad_request(format!("INVALID_PATH_PARAMETER: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(format!("INVALID_QUERY_STRING: {}", rejection.body_text()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::bad_request(format!("INVALID_REQUEST_BODY: {}", rejection.body_text()))
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidToken(msg) => ApiError::invalid_jwt(msg),
            AuthError::InvalidCredentials => {
                ApiError::unauthorized(format!("INVALID_CREDENTIALS: {}", AuthError::InvalidCredentials))
            }
            e @ (AuthError::InvalidSecret | AuthError::TokenGeneration(_)) => {
                tracing::error!("Token signing error: {}", e);
                ApiError::internal_server_error()
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
