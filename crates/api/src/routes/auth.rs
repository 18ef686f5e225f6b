//! Route definitions for registration and login.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Public routes merged at the `/api` root.
///
/// ```text
/// POST /register       -> register
/// POST /register-many  -> register_many
/// POST /login          -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/register-many", post(auth::register_many))
        .route("/login", post(auth::login))
}
