//! Server configuration.
//!
//! Everything comes from environment variables (with `.env` support in
//! `main`), with local-development defaults:
//!
//! - `DATABASE_URL` - SQLite database, default `sqlite://comunidade.db?mode=rwc`
//! - `MEDIA_DIR` - profile photo directory, default `static/fotos_perfil`
//! - `SERVER_PORT` - listen port, default 3000 (read in `main`)
//! - `JWT_SECRET` - session token secret (read in `auth::sessions`)

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::backend::server::state::MediaDir;

const DEFAULT_DATABASE_URL: &str = "sqlite://comunidade.db?mode=rwc";
const DEFAULT_MEDIA_DIR: &str = "static/fotos_perfil";

/// Connect to the database and bring the schema up to date.
///
/// Unlike most configuration, a broken database is fatal: every page except
/// the contact one needs the store.
pub async fn load_database() -> Result<SqlitePool, sqlx::Error> {
    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    tracing::info!("connecting to database");
    let pool = SqlitePoolOptions::new().connect(&database_url).await?;

    tracing::info!("running database migrations");
    sqlx::migrate!().run(&pool).await?;

    Ok(pool)
}

/// Resolve the media directory and make sure it exists.
pub fn load_media_dir() -> Result<MediaDir, std::io::Error> {
    let dir = std::env::var("MEDIA_DIR").unwrap_or_else(|_| DEFAULT_MEDIA_DIR.to_string());
    std::fs::create_dir_all(&dir)?;
    Ok(MediaDir::new(dir))
}

/// In-memory pool with the schema applied, for unit tests.
///
/// A single connection keeps every query on the same in-memory database.
#[cfg(test)]
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");
    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_pool_has_schema() {
        let pool = memory_pool().await;
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count.0, 0);
    }
}
