//! Server initialization.
//!
//! Builds the application from configuration: database pool, media
//! directory, then the router. Tests skip this and assemble an `AppState`
//! over an in-memory pool themselves.

use axum::Router;

use crate::backend::error::AppError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, load_media_dir};
use crate::backend::server::state::AppState;

/// Create the configured application router.
pub async fn create_app() -> Result<Router, AppError> {
    tracing::info!("initializing comunidade backend");

    let pool = load_database().await?;
    let media_dir = load_media_dir()?;

    let state = AppState { pool, media_dir };
    Ok(create_router(state))
}
