//! Login, registration and logout handlers.

pub mod login;
pub mod logout;
pub mod register;
pub mod types;

pub use login::{login_page, login_submit};
pub use logout::logout;
