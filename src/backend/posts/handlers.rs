//! Post CRUD handlers.
//!
//! The home page is public; everything else runs behind the login guard.
//! Edit and delete additionally require the acting user to be the post's
//! author - a mismatch is a terminal 403, never a redirect.

use axum::{
    extract::{Path, State},
    response::{Json, Redirect},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::backend::error::AppError;
use crate::backend::middleware::CurrentUser;
use crate::backend::posts::db::{self, PostWithAuthor};
use crate::shared::forms::{validate_post, PostForm};

/// A post as rendered on the home page and the single-post view.
#[derive(Debug, Serialize)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

impl From<PostWithAuthor> for PostView {
    fn from(post: PostWithAuthor) -> Self {
        PostView {
            id: post.id,
            title: post.title,
            body: post.body,
            author: post.author_username,
            created_at: post.created_at,
        }
    }
}

/// Single-post view; the edit form prefill is only present for the author.
#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: PostView,
    pub editable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_form: Option<PostForm>,
}

/// `GET /` - all posts, newest first.
pub async fn home(State(pool): State<SqlitePool>) -> Result<Json<Vec<PostView>>, AppError> {
    let posts = db::list_posts(&pool).await?;
    Ok(Json(posts.into_iter().map(PostView::from).collect()))
}

/// `GET /post/criar` - empty form prefill.
pub async fn create_post_page() -> Json<PostForm> {
    Json(PostForm::default())
}

/// `POST /post/criar` - create a post authored by the current user.
pub async fn create_post_submit(
    State(pool): State<SqlitePool>,
    CurrentUser(user): CurrentUser,
    Json(form): Json<PostForm>,
) -> Result<Redirect, AppError> {
    validate_post(&form)?;

    let post = db::create_post(&pool, &form.title, &form.body, user.id).await?;
    tracing::info!("user {} created post {}", user.id, post.id);

    Ok(Redirect::to("/"))
}

/// `GET /post/{post_id}` - view a post; authors also get the edit prefill.
pub async fn show_post(
    State(pool): State<SqlitePool>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<i64>,
) -> Result<Json<PostDetail>, AppError> {
    let post = db::get_post(&pool, post_id)
        .await?
        .ok_or(AppError::NotFound("post"))?;

    let editable = post.author_id == user.id;
    let edit_form = editable.then(|| PostForm {
        title: post.title.clone(),
        body: post.body.clone(),
    });

    Ok(Json(PostDetail {
        post: post.into(),
        editable,
        edit_form,
    }))
}

/// `POST /post/{post_id}` - author-only edit.
pub async fn edit_post_submit(
    State(pool): State<SqlitePool>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<i64>,
    Json(form): Json<PostForm>,
) -> Result<Redirect, AppError> {
    let post = db::get_post(&pool, post_id)
        .await?
        .ok_or(AppError::NotFound("post"))?;

    if post.author_id != user.id {
        tracing::warn!("user {} tried to edit post {} owned by {}", user.id, post.id, post.author_id);
        return Err(AppError::Forbidden);
    }

    validate_post(&form)?;
    db::update_post(&pool, post_id, &form.title, &form.body).await?;
    tracing::info!("user {} updated post {}", user.id, post_id);

    Ok(Redirect::to("/"))
}

/// `GET|POST /post/{post_id}/excluir` - author-only delete.
pub async fn delete_post(
    State(pool): State<SqlitePool>,
    CurrentUser(user): CurrentUser,
    Path(post_id): Path<i64>,
) -> Result<Redirect, AppError> {
    let post = db::get_post(&pool, post_id)
        .await?
        .ok_or(AppError::NotFound("post"))?;

    if post.author_id != user.id {
        tracing::warn!("user {} tried to delete post {} owned by {}", user.id, post.id, post.author_id);
        return Err(AppError::Forbidden);
    }

    db::delete_post(&pool, post_id).await?;
    tracing::info!("user {} deleted post {}", user.id, post_id);

    Ok(Redirect::to("/"))
}
