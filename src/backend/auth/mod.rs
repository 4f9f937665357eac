//! Authentication
//!
//! Credential storage (bcrypt hashes on the user row), JWT session tokens
//! carried in an HttpOnly cookie, and the login/registration/logout
//! handlers.

pub mod handlers;
pub mod sessions;
pub mod users;

pub use handlers::{login_page, login_submit, logout};
