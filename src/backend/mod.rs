//! Backend Server
//!
//! Server-side code: the axum HTTP server, route handlers, auth middleware,
//! repositories and the profile image pipeline.

pub mod auth;
pub mod error;
pub mod middleware;
pub mod posts;
pub mod profile;
pub mod routes;
pub mod server;
