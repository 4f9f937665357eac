//! Backend error types.
//!
//! One error enum covers every failure a handler can produce. Validation
//! and authentication failures are recoverable, user-facing conditions;
//! authorization failures are terminal 403s; storage, database and hashing
//! failures surface as opaque 500s.

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::forms::ValidationErrors;

/// Errors produced by request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// One or more form fields failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Login failed. A single generic message covers both unknown email and
    /// wrong password so callers cannot probe which emails exist.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The acting user is authenticated but not allowed to do this.
    #[error("forbidden")]
    Forbidden,

    /// The addressed entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// The request body could not be read (e.g. malformed multipart).
    #[error("malformed request: {0}")]
    BadRequest(String),

    /// An uploaded image could not be decoded.
    #[error("unreadable image: {0}")]
    ImageDecode(image::ImageError),

    /// Filesystem failure in the media directory.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing/verification failure.
    #[error("password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Session token creation failure.
    #[error("token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ImageDecode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Storage(_)
            | Self::Database(_)
            | Self::PasswordHash(_)
            | Self::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error is the server's fault; these are logged and their
    /// details are not sent to the client.
    pub fn is_internal(&self) -> bool {
        self.status_code() == StatusCode::INTERNAL_SERVER_ERROR
    }
}
