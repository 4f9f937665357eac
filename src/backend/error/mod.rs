//! Backend Error Module
//!
//! Defines the error type used by HTTP handlers and its conversion into
//! HTTP responses.
//!
//! - **`types`** - Error type definition and status mapping
//! - **`conversion`** - `IntoResponse` implementation

pub mod conversion;
pub mod types;

pub use types::AppError;
