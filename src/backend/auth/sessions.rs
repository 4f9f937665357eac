//! Session tokens and the session cookie.
//!
//! Sessions are JWTs carried in an HttpOnly `session` cookie. "Remember me"
//! is a persistence-duration contract: it selects a 30-day token and a
//! `Max-Age` cookie that survives browser restarts; without it the token
//! lasts one day and the cookie dies with the browser session.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Token lifetime for a plain login: 1 day.
const SESSION_TTL_SECS: u64 = 24 * 60 * 60;

/// Token lifetime with remember-me: 30 days.
const REMEMBER_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
}

/// Get JWT secret from environment
fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|err| {
        tracing::warn!("Missing JWT_SECRET ({err}), using development fallback");
        "your-secret-key-change-in-production".to_string()
    })
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Create a session token for a user.
///
/// `remember` extends the expiry from 1 to 30 days.
pub fn create_token(
    user_id: uuid::Uuid,
    email: String,
    remember: bool,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = unix_now();
    let ttl = if remember {
        REMEMBER_TTL_SECS
    } else {
        SESSION_TTL_SECS
    };

    let claims = Claims {
        sub: user_id.to_string(),
        email,
        exp: now + ttl,
        iat: now,
    };

    let secret = get_jwt_secret();
    let key = EncodingKey::from_secret(secret.as_ref());

    encode(&Header::default(), &claims, &key)
}

/// Verify and decode a session token.
pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = get_jwt_secret();
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    let token_data = decode::<Claims>(token, &key, &validation)?;
    Ok(token_data.claims)
}

/// `Set-Cookie` value establishing a session.
///
/// Remember-me adds `Max-Age` so the cookie persists across browser
/// restarts; otherwise the cookie is session-only.
pub fn session_cookie(token: &str, remember: bool) -> String {
    if remember {
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={REMEMBER_TTL_SECS}")
    } else {
        format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
    }
}

/// `Set-Cookie` value clearing the session.
pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}
