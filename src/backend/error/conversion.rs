//! Error conversion.
//!
//! `AppError` implements `IntoResponse`, so handlers return it directly.
//! The body is JSON: `{"error": <message>, "status": <code>}`, plus a
//! `fields` array for validation failures. Internal errors are logged here
//! and rendered with an opaque message.

use axum::response::{IntoResponse, Json, Response};

use crate::backend::error::types::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_internal() {
            tracing::error!("request failed: {self}");
            let body = serde_json::json!({
                "error": "internal server error",
                "status": status.as_u16(),
            });
            return (status, Json(body)).into_response();
        }

        let body = match &self {
            AppError::Validation(errors) => serde_json::json!({
                "error": "validation failed",
                "status": status.as_u16(),
                "fields": errors.errors(),
            }),
            other => serde_json::json!({
                "error": other.to_string(),
                "status": status.as_u16(),
            }),
        };

        (status, Json(body)).into_response()
    }
}
