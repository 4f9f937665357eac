//! Router configuration.
//!
//! Public routes (home, contact, login) are registered first; every other
//! page sits behind the `require_login` guard, which redirects anonymous
//! visitors to `/login?next=...`. Profile photos are served as static files
//! from the media directory.

use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Router,
};
use tower_http::services::ServeDir;

use crate::backend::auth::handlers::{login_page, login_submit, logout};
use crate::backend::middleware::require_login;
use crate::backend::posts::handlers as posts;
use crate::backend::profile::handlers as profile;
use crate::backend::server::state::AppState;

/// Create the axum router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    let public = Router::new()
        .route("/", get(posts::home))
        .route("/contato", get(|| async { "Contato" }))
        .route("/login", get(login_page).post(login_submit));

    let protected = Router::new()
        .route("/usuarios", get(profile::list_users))
        .route("/sair", get(logout))
        .route("/perfil", get(profile::perfil))
        .route(
            "/perfil/editar",
            get(profile::edit_profile_page).post(profile::edit_profile_submit),
        )
        .route(
            "/post/criar",
            get(posts::create_post_page).post(posts::create_post_submit),
        )
        .route(
            "/post/{post_id}",
            get(posts::show_post).post(posts::edit_post_submit),
        )
        .route(
            "/post/{post_id}/excluir",
            get(posts::delete_post).post(posts::delete_post),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_login,
        ));

    public
        .merge(protected)
        .nest_service(
            "/static/fotos_perfil",
            ServeDir::new(state.media_dir.path()),
        )
        .fallback(|| async { (StatusCode::NOT_FOUND, "404 Not Found") })
        .with_state(state)
}
