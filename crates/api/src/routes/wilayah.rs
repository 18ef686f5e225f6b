//! Route definitions for the `/wilayah` region directory.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::wilayah;
use crate::state::AppState;

/// Routes mounted at `/wilayah`.
///
/// ```text
/// GET    /penyuluh              -> list_own
/// POST   /penyuluh              -> add_own
/// DELETE /penyuluh/{wilayah}    -> remove_own
/// GET    /{wilayah}/konsultan   -> list_konsultan
/// GET    /{wilayah}/penyuluh    -> list_penyuluh
/// GET    /{wilayah}/gapoktan    -> list_gapoktan
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/penyuluh", get(wilayah::list_own).post(wilayah::add_own))
        .route("/penyuluh/{wilayah}", delete(wilayah::remove_own))
        .route("/{wilayah}/konsultan", get(wilayah::list_konsultan))
        .route("/{wilayah}/penyuluh", get(wilayah::list_penyuluh))
        .route("/{wilayah}/gapoktan", get(wilayah::list_gapoktan))
}
