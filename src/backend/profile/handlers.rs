//! Profile handlers.
//!
//! `GET /perfil` and `GET /perfil/editar` return the data the renderer
//! needs; `POST /perfil/editar` takes the multipart submission (username,
//! email, per-course booleans, optional photo) through the lookup ->
//! validate -> image pipeline -> single row update sequence. The user row
//! only ever receives a photo filename the pipeline has actually written.

use axum::{
    extract::{Multipart, State},
    response::{Json, Redirect},
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::backend::auth::users::{self, User};
use crate::backend::error::AppError;
use crate::backend::middleware::CurrentUser;
use crate::backend::profile::image::save_profile_image;
use crate::backend::server::state::AppState;
use crate::shared::course::Course;
use crate::shared::forms::{validate_profile_edit, ProfileEditForm};

/// URL path prefix under which profile photos are served.
const PHOTO_URL_PREFIX: &str = "/static/fotos_perfil";

/// A user's own profile page.
#[derive(Debug, Serialize)]
pub struct ProfileView {
    pub username: String,
    pub email: String,
    pub profile_photo: String,
    pub courses: Vec<&'static str>,
    pub course_count: usize,
}

impl ProfileView {
    fn for_user(user: &User) -> Self {
        ProfileView {
            username: user.username.clone(),
            email: user.email.clone(),
            profile_photo: photo_url(&user.profile_photo),
            courses: user.courses.iter().map(|c| c.label()).collect(),
            course_count: user.courses.len(),
        }
    }
}

/// One checkbox on the profile edit form.
#[derive(Debug, Serialize)]
pub struct CourseFlag {
    pub field: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// Prefill for the profile edit form.
#[derive(Debug, Serialize)]
pub struct ProfileEditPage {
    pub username: String,
    pub email: String,
    pub profile_photo: String,
    pub courses: Vec<CourseFlag>,
}

/// Row of the user directory.
#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub email: String,
    pub profile_photo: String,
    pub course_count: usize,
}

fn photo_url(filename: &str) -> String {
    format!("{PHOTO_URL_PREFIX}/{filename}")
}

/// `GET /perfil` - the current user's profile.
pub async fn perfil(CurrentUser(user): CurrentUser) -> Json<ProfileView> {
    Json(ProfileView::for_user(&user))
}

/// `GET /usuarios` - every registered user.
pub async fn list_users(
    State(pool): State<SqlitePool>,
) -> Result<Json<Vec<UserSummary>>, AppError> {
    let users = users::list_users(&pool).await?;
    Ok(Json(
        users
            .iter()
            .map(|user| UserSummary {
                username: user.username.clone(),
                email: user.email.clone(),
                profile_photo: photo_url(&user.profile_photo),
                course_count: user.courses.len(),
            })
            .collect(),
    ))
}

/// `GET /perfil/editar` - edit form prefill.
pub async fn edit_profile_page(CurrentUser(user): CurrentUser) -> Json<ProfileEditPage> {
    let courses = Course::ALL
        .into_iter()
        .map(|course| CourseFlag {
            field: course.field_name(),
            label: course.label(),
            checked: user.courses.contains(&course),
        })
        .collect();

    Json(ProfileEditPage {
        username: user.username.clone(),
        email: user.email.clone(),
        profile_photo: photo_url(&user.profile_photo),
        courses,
    })
}

/// `POST /perfil/editar` - apply a profile edit.
pub async fn edit_profile_submit(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    multipart: Multipart,
) -> Result<Redirect, AppError> {
    let (form, photo) = read_edit_form(multipart).await?;

    let email_owner = users::get_user_by_email(&state.pool, &form.email)
        .await?
        .map(|owner| owner.id);
    validate_profile_edit(&form, user.id, email_owner)?;

    // Run the image pipeline first; the row below only sees a filename that
    // is already on disk.
    let new_photo = match &photo {
        Some(upload) => Some(save_profile_image(
            state.media_dir.path(),
            &upload.filename,
            &upload.data,
            &user.profile_photo,
        )?),
        None => None,
    };

    users::update_profile(
        &state.pool,
        user.id,
        &form.username,
        &form.email,
        &form.courses,
        new_photo.as_deref(),
    )
    .await?;

    tracing::info!("user {} updated profile", user.id);

    Ok(Redirect::to("/perfil"))
}

/// An uploaded photo as it came off the wire.
struct PhotoUpload {
    filename: String,
    data: Vec<u8>,
}

/// Collect the multipart fields into the form struct plus the optional
/// photo. Unknown fields are ignored.
async fn read_edit_form(
    mut multipart: Multipart,
) -> Result<(ProfileEditForm, Option<PhotoUpload>), AppError> {
    let mut username = String::new();
    let mut email = String::new();
    let mut courses = Vec::new();
    let mut photo = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(|n| n.to_string()) else {
            continue;
        };

        match name.as_str() {
            "username" => {
                username = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "email" => {
                email = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            "foto_perfil" => {
                let filename = field.file_name().map(|f| f.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                // Browsers send an empty part when no file was chosen.
                if let Some(filename) = filename.filter(|f| !f.is_empty()) {
                    if !data.is_empty() {
                        photo = Some(PhotoUpload {
                            filename,
                            data: data.to_vec(),
                        });
                    }
                }
            }
            other => {
                if let Some(course) = Course::from_field_name(other) {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?;
                    if is_checked(&value) {
                        courses.push(course);
                    }
                }
            }
        }
    }

    let form = ProfileEditForm {
        username,
        email,
        courses,
        photo_filename: photo.as_ref().map(|p| p.filename.clone()),
    };

    Ok((form, photo))
}

/// Checkbox truthiness as browsers and form libraries send it.
fn is_checked(value: &str) -> bool {
    matches!(value, "on" | "true" | "1" | "y")
}
