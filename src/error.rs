use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::Display;
use serde_json::json;
use tracing::error;

/// Domain error taxonomy. `ResponseError` below is the single place where
/// these are mapped onto HTTP statuses and client-visible messages.
#[derive(Debug, Display)]
pub enum ApiError {
    /// Required fields missing or empty; carries the offending field names.
    #[display(fmt = "validation failed")]
    Validation(Vec<String>),

    /// Request body could not be parsed (malformed multipart, bad encoding).
    #[display(fmt = "malformed request payload")]
    BadPayload,

    #[display(fmt = "missing bearer token")]
    MissingToken,

    #[display(fmt = "invalid credentials")]
    InvalidCredentials,

    #[display(fmt = "invalid token")]
    InvalidToken,

    #[display(fmt = "token expired")]
    TokenExpired,

    #[display(fmt = "record not found")]
    NotFound,

    #[display(fmt = "unsupported media type")]
    UnsupportedMediaType(String),

    /// Upload exceeded the configured byte limit.
    #[display(fmt = "payload too large")]
    PayloadTooLarge(usize),

    /// A generated upload filename already existed on disk.
    #[display(fmt = "storage conflict")]
    StorageConflict,

    /// Transient persistence failure; the client may retry.
    #[display(fmt = "storage unavailable")]
    StorageUnavailable,

    #[display(fmt = "internal error")]
    Unknown,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadPayload => StatusCode::BAD_REQUEST,
            ApiError::MissingToken | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken | ApiError::TokenExpired => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::UnsupportedMediaType(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::StorageConflict | ApiError::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::Validation(fields) => json!({
                "message": "Missing or empty required fields",
                "fields": fields,
            }),
            ApiError::BadPayload => json!({ "message": "Malformed request payload" }),
            ApiError::MissingToken => json!({ "message": "No token provided" }),
            ApiError::InvalidCredentials => json!({ "message": "Invalid credentials" }),
            ApiError::InvalidToken => json!({ "message": "Invalid token" }),
            ApiError::TokenExpired => json!({ "message": "Token expired" }),
            ApiError::NotFound => json!({ "message": "Employee not found" }),
            ApiError::UnsupportedMediaType(mime) => json!({
                "message": "Invalid file type. Only JPEG, PNG and GIF are allowed.",
                "received": mime,
            }),
            ApiError::PayloadTooLarge(limit) => json!({
                "message": "Uploaded file too large",
                "limit_bytes": limit,
            }),
            // Server-side faults: full detail stays in the logs, the client
            // only ever sees a generic message.
            ApiError::StorageConflict => {
                error!("upload filename collision");
                json!({ "message": "Something went wrong!" })
            }
            ApiError::StorageUnavailable => {
                json!({ "message": "Service temporarily unavailable, retry later" })
            }
            ApiError::Unknown => json!({ "message": "Something went wrong!" }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => ApiError::NotFound,
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed => {
                error!(error = %e, "database unreachable");
                ApiError::StorageUnavailable
            }
            other => {
                error!(error = %other, "database query failed");
                ApiError::Unknown
            }
        }
    }
}
