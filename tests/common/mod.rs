//! Shared fixtures for the integration tests.
//!
//! Each test builds the real router over an in-memory SQLite pool and a
//! temporary media directory, then drives it with `tower::ServiceExt`.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tempfile::TempDir;
use tower::ServiceExt;

use comunidade::backend::auth::users::{create_user, User};
use comunidade::backend::routes::router::create_router;
use comunidade::backend::server::state::{AppState, MediaDir};

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub media_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory database");
        sqlx::migrate!()
            .run(&pool)
            .await
            .expect("failed to run migrations");

        let media_dir = tempfile::tempdir().expect("failed to create media dir");
        let state = AppState {
            pool: pool.clone(),
            media_dir: MediaDir::new(media_dir.path()),
        };

        TestApp {
            router: create_router(state),
            pool,
            media_dir,
        }
    }

    /// Insert a user directly, with a cheap bcrypt cost to keep tests fast.
    pub async fn seed_user(&self, username: &str, email: &str, password: &str) -> User {
        let hash = bcrypt::hash(password, 4).unwrap();
        create_user(&self.pool, username.to_string(), email.to_string(), hash)
            .await
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(
        &self,
        path: &str,
        cookie: Option<&str>,
        body: &serde_json::Value,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(
            builder
                .body(Body::from(serde_json::to_vec(body).unwrap()))
                .unwrap(),
        )
        .await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        cookie: Option<&str>,
        boundary: &str,
        body: Vec<u8>,
    ) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            );
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    /// Log in through the HTTP endpoint and return the session cookie.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/login",
                None,
                &serde_json::json!({
                    "form": "login",
                    "email": email,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "login failed");
        session_cookie_of(&response)
    }
}

/// Extract the `session=...` pair from a response's Set-Cookie header.
pub fn session_cookie_of(response: &Response<Body>) -> String {
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("no Set-Cookie header")
        .to_str()
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

pub fn location_of(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("no Location header")
        .to_str()
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Encoded PNG of the given dimensions.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(width, height));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Hand-rolled multipart/form-data body.
pub fn multipart_body(
    boundary: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &str, &[u8])>,
) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, data)) = file {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
