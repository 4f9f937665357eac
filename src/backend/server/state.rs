//! Application state.
//!
//! `AppState` is the router's state container. `FromRef` implementations
//! let handlers extract just the part they need - most take the bare
//! `SqlitePool`.

use std::path::{Path, PathBuf};

use axum::extract::FromRef;
use sqlx::SqlitePool;

/// Directory that holds the profile photos.
#[derive(Clone, Debug)]
pub struct MediaDir(PathBuf);

impl MediaDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool.
    pub pool: SqlitePool,
    /// Profile photo directory.
    pub media_dir: MediaDir,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

impl FromRef<AppState> for MediaDir {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.media_dir.clone()
    }
}
