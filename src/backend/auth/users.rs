//! User model and database operations.
//!
//! The domain `User` carries the decoded course selection; the raw row type
//! keeps the string encoding and stays private to this module.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::shared::course::{self, Course};

/// A user of the community.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Display name, not unique
    pub username: String,
    /// Email address, unique by validation
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Profile photo filename inside the media directory
    pub profile_photo: String,
    /// Selected course offerings
    pub courses: Vec<Course>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Sentinel photo filename for users who never uploaded one.
    pub const DEFAULT_PHOTO: &'static str = "default.jpg";
}

/// Storage representation; courses are still the encoded string here.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    profile_photo: String,
    courses: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            profile_photo: row.profile_photo,
            courses: course::decode(&row.courses),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const USER_COLUMNS: &str =
    "id, username, email, password_hash, profile_photo, courses, created_at, updated_at";

/// Create a new user with the default photo and an empty course selection.
pub async fn create_user(
    pool: &SqlitePool,
    username: String,
    email: String,
    password_hash: String,
) -> Result<User, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let row = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users (id, username, email, password_hash, profile_photo, courses, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        RETURNING id, username, email, password_hash, profile_photo, courses, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&username)
    .bind(&email)
    .bind(&password_hash)
    .bind(User::DEFAULT_PHOTO)
    .bind(course::NOT_INFORMED)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// Get user by email, or None if not found.
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}

/// Get user by ID, or None if not found.
pub async fn get_user_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}

/// List every user, oldest first.
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>, sqlx::Error> {
    let rows = sqlx::query_as::<_, UserRow>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(User::from).collect())
}

/// Persist a profile edit in one commit.
///
/// `profile_photo` is only passed after the image pipeline has written the
/// new file; `None` leaves the stored filename untouched.
pub async fn update_profile(
    pool: &SqlitePool,
    id: Uuid,
    username: &str,
    email: &str,
    courses: &[Course],
    profile_photo: Option<&str>,
) -> Result<User, sqlx::Error> {
    let now = Utc::now();
    let encoded = course::encode(courses);

    let row = if let Some(photo) = profile_photo {
        sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = ?1, email = ?2, courses = ?3, profile_photo = ?4, updated_at = ?5
            WHERE id = ?6
            RETURNING id, username, email, password_hash, profile_photo, courses, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(&encoded)
        .bind(photo)
        .bind(now)
        .bind(id)
        .fetch_one(pool)
        .await?
    } else {
        sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users
            SET username = ?1, email = ?2, courses = ?3, updated_at = ?4
            WHERE id = ?5
            RETURNING id, username, email, password_hash, profile_photo, courses, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(email)
        .bind(&encoded)
        .bind(now)
        .bind(id)
        .fetch_one(pool)
        .await?
    };

    Ok(row.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::server::config::memory_pool;

    #[tokio::test]
    async fn test_create_user_defaults() {
        let pool = memory_pool().await;
        let user = create_user(
            &pool,
            "maria".to_string(),
            "maria@example.com".to_string(),
            "hash".to_string(),
        )
        .await
        .unwrap();

        assert_eq!(user.username, "maria");
        assert_eq!(user.profile_photo, User::DEFAULT_PHOTO);
        assert!(user.courses.is_empty());
    }

    #[tokio::test]
    async fn test_get_user_by_email() {
        let pool = memory_pool().await;
        let created = create_user(
            &pool,
            "maria".to_string(),
            "maria@example.com".to_string(),
            "hash".to_string(),
        )
        .await
        .unwrap();

        let found = get_user_by_email(&pool, "maria@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, created.id);

        let missing = get_user_by_email(&pool, "nobody@example.com").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_update_profile_encodes_courses() {
        let pool = memory_pool().await;
        let user = create_user(
            &pool,
            "maria".to_string(),
            "maria@example.com".to_string(),
            "hash".to_string(),
        )
        .await
        .unwrap();

        let updated = update_profile(
            &pool,
            user.id,
            "maria2",
            "maria2@example.com",
            &[Course::Excel, Course::Sql],
            None,
        )
        .await
        .unwrap();

        assert_eq!(updated.username, "maria2");
        assert_eq!(updated.email, "maria2@example.com");
        assert_eq!(updated.courses, vec![Course::Excel, Course::Sql]);
        // Photo untouched when the pipeline did not run.
        assert_eq!(updated.profile_photo, User::DEFAULT_PHOTO);

        let reloaded = get_user_by_id(&pool, user.id).await.unwrap().unwrap();
        assert_eq!(reloaded.courses, vec![Course::Excel, Course::Sql]);
    }

    #[tokio::test]
    async fn test_update_profile_sets_photo() {
        let pool = memory_pool().await;
        let user = create_user(
            &pool,
            "maria".to_string(),
            "maria@example.com".to_string(),
            "hash".to_string(),
        )
        .await
        .unwrap();

        let updated = update_profile(
            &pool,
            user.id,
            "maria",
            "maria@example.com",
            &[],
            Some("mariadeadbeefdeadbeef.png"),
        )
        .await
        .unwrap();

        assert_eq!(updated.profile_photo, "mariadeadbeefdeadbeef.png");
        assert!(updated.courses.is_empty());
    }
}
