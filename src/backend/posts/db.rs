//! Post model and database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// A blog post row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Post {
    /// Autoincrement id; descending id order is newest-first.
    pub id: i64,
    pub title: String,
    pub body: String,
    /// The author; immutable after creation.
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A post joined with its author's username, for display.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostWithAuthor {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author_id: Uuid,
    pub author_username: String,
    pub created_at: DateTime<Utc>,
}

/// Create a post owned by `author_id`.
pub async fn create_post(
    pool: &SqlitePool,
    title: &str,
    body: &str,
    author_id: Uuid,
) -> Result<Post, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO posts (title, body, author_id, created_at)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id, title, body, author_id, created_at
        "#,
    )
    .bind(title)
    .bind(body)
    .bind(author_id)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// All posts, newest first.
pub async fn list_posts(pool: &SqlitePool) -> Result<Vec<PostWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT p.id, p.title, p.body, p.author_id, u.username AS author_username, p.created_at
        FROM posts p
        JOIN users u ON u.id = p.author_id
        ORDER BY p.id DESC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// One post by id, or None.
pub async fn get_post(pool: &SqlitePool, id: i64) -> Result<Option<PostWithAuthor>, sqlx::Error> {
    sqlx::query_as::<_, PostWithAuthor>(
        r#"
        SELECT p.id, p.title, p.body, p.author_id, u.username AS author_username, p.created_at
        FROM posts p
        JOIN users u ON u.id = p.author_id
        WHERE p.id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Update a post's title and body. The author reference never changes.
pub async fn update_post(
    pool: &SqlitePool,
    id: i64,
    title: &str,
    body: &str,
) -> Result<Post, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        UPDATE posts
        SET title = ?1, body = ?2
        WHERE id = ?3
        RETURNING id, title, body, author_id, created_at
        "#,
    )
    .bind(title)
    .bind(body)
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Delete a post.
pub async fn delete_post(pool: &SqlitePool, id: i64) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM posts WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
