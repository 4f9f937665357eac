//! Profile edit integration tests: course selection round-trips, email
//! uniqueness on edit, and photo upload/replacement on disk.

mod common;

use axum::http::StatusCode;
use common::{body_json, location_of, multipart_body, png_bytes, TestApp};
use image::GenericImageView as _;

const BOUNDARY: &str = "testboundary1234";

async fn logged_in_app() -> (TestApp, String) {
    let app = TestApp::new().await;
    app.seed_user("maria", "maria@example.com", "hunter22").await;
    let cookie = app.login("maria@example.com", "hunter22").await;
    (app, cookie)
}

#[tokio::test]
async fn test_edit_page_prefills_current_values() {
    let (app, cookie) = logged_in_app().await;
    let page = body_json(app.get("/perfil/editar", Some(&cookie)).await).await;
    assert_eq!(page["username"], "maria");
    assert_eq!(page["email"], "maria@example.com");
    assert_eq!(page["courses"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_course_selection_round_trip() {
    let (app, cookie) = logged_in_app().await;

    let body = multipart_body(
        BOUNDARY,
        &[
            ("username", "maria"),
            ("email", "maria@example.com"),
            ("curso_excel", "on"),
            ("curso_sql", "on"),
        ],
        None,
    );
    let response = app
        .post_multipart("/perfil/editar", Some(&cookie), BOUNDARY, body)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location_of(&response), "/perfil");

    let profile = body_json(app.get("/perfil", Some(&cookie)).await).await;
    assert_eq!(profile["courses"], serde_json::json!(["Excel", "SQL"]));
    assert_eq!(profile["course_count"], 2);

    // The stored row carries the delimited encoding.
    let (stored,): (String,) =
        sqlx::query_as("SELECT courses FROM users WHERE email = 'maria@example.com'")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(stored, "Excel;SQL");
}

#[tokio::test]
async fn test_no_courses_stores_sentinel() {
    let (app, cookie) = logged_in_app().await;

    let body = multipart_body(
        BOUNDARY,
        &[("username", "maria"), ("email", "maria@example.com")],
        None,
    );
    let response = app
        .post_multipart("/perfil/editar", Some(&cookie), BOUNDARY, body)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let profile = body_json(app.get("/perfil", Some(&cookie)).await).await;
    assert_eq!(profile["course_count"], 0);

    let (stored,): (String,) =
        sqlx::query_as("SELECT courses FROM users WHERE email = 'maria@example.com'")
            .fetch_one(&app.pool)
            .await
            .unwrap();
    assert_eq!(stored, "Not Informed");
}

#[tokio::test]
async fn test_edit_to_other_users_email_is_rejected() {
    let (app, cookie) = logged_in_app().await;
    app.seed_user("joao", "joao@example.com", "hunter22").await;

    let body = multipart_body(
        BOUNDARY,
        &[("username", "maria"), ("email", "joao@example.com")],
        None,
    );
    let response = app
        .post_multipart("/perfil/editar", Some(&cookie), BOUNDARY, body)
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body_json(response).await;
    assert_eq!(errors["fields"][0]["field"], "email");
}

#[tokio::test]
async fn test_edit_keeping_own_email_succeeds() {
    let (app, cookie) = logged_in_app().await;

    let body = multipart_body(
        BOUNDARY,
        &[("username", "maria renamed"), ("email", "maria@example.com")],
        None,
    );
    let response = app
        .post_multipart("/perfil/editar", Some(&cookie), BOUNDARY, body)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let profile = body_json(app.get("/perfil", Some(&cookie)).await).await;
    assert_eq!(profile["username"], "maria renamed");
}

#[tokio::test]
async fn test_photo_with_bad_extension_is_rejected() {
    let (app, cookie) = logged_in_app().await;

    let png = png_bytes(50, 50);
    let body = multipart_body(
        BOUNDARY,
        &[("username", "maria"), ("email", "maria@example.com")],
        Some(("foto_perfil", "avatar.gif", png.as_slice())),
    );
    let response = app
        .post_multipart("/perfil/editar", Some(&cookie), BOUNDARY, body)
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // Nothing was written to the media directory.
    assert_eq!(
        std::fs::read_dir(app.media_dir.path()).unwrap().count(),
        0
    );
}

#[tokio::test]
async fn test_photo_upload_and_replacement() {
    let (app, cookie) = logged_in_app().await;

    // First upload: default sentinel stays untouched (there is no file to
    // delete), a thumbnail lands in the media directory.
    let png = png_bytes(400, 400);
    let body = multipart_body(
        BOUNDARY,
        &[("username", "maria"), ("email", "maria@example.com")],
        Some(("foto_perfil", "avatar.png", png.as_slice())),
    );
    let response = app
        .post_multipart("/perfil/editar", Some(&cookie), BOUNDARY, body)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let profile = body_json(app.get("/perfil", Some(&cookie)).await).await;
    let first_url = profile["profile_photo"].as_str().unwrap().to_string();
    assert!(first_url.starts_with("/static/fotos_perfil/avatar"));
    assert!(first_url.ends_with(".png"));

    let first_file = first_url.rsplit('/').next().unwrap().to_string();
    assert!(app.media_dir.path().join(&first_file).exists());

    // The photo is reachable over the static route.
    let served = app.get(&first_url, None).await;
    assert_eq!(served.status(), StatusCode::OK);

    // Second upload replaces the first file on disk.
    let body = multipart_body(
        BOUNDARY,
        &[("username", "maria"), ("email", "maria@example.com")],
        Some(("foto_perfil", "avatar.png", png.as_slice())),
    );
    let response = app
        .post_multipart("/perfil/editar", Some(&cookie), BOUNDARY, body)
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let profile = body_json(app.get("/perfil", Some(&cookie)).await).await;
    let second_file = profile["profile_photo"]
        .as_str()
        .unwrap()
        .rsplit('/')
        .next()
        .unwrap()
        .to_string();

    assert_ne!(first_file, second_file);
    assert!(!app.media_dir.path().join(&first_file).exists());
    assert!(app.media_dir.path().join(&second_file).exists());
    assert_eq!(std::fs::read_dir(app.media_dir.path()).unwrap().count(), 1);

    // Thumbnail is bounded to 200x200.
    let saved = image::open(app.media_dir.path().join(&second_file)).unwrap();
    assert!(saved.width() <= 200 && saved.height() <= 200);
}

#[tokio::test]
async fn test_corrupt_photo_is_rejected_and_row_untouched() {
    let (app, cookie) = logged_in_app().await;

    let body = multipart_body(
        BOUNDARY,
        &[("username", "maria"), ("email", "maria@example.com")],
        Some(("foto_perfil", "avatar.png", b"definitely not a png".as_slice())),
    );
    let response = app
        .post_multipart("/perfil/editar", Some(&cookie), BOUNDARY, body)
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // The user still points at the default photo.
    let profile = body_json(app.get("/perfil", Some(&cookie)).await).await;
    assert_eq!(profile["profile_photo"], "/static/fotos_perfil/default.jpg");
}
