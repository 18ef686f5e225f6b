//! Route definitions for the `/tugas` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{komentar, tugas};
use crate::state::AppState;

/// Routes mounted at `/tugas`.
///
/// ```text
/// GET    /                 -> list_for_caller
/// POST   /                 -> create_tugas
/// GET    /konsultan        -> list_assignable_konsultan
/// GET    /{id}             -> get_tugas
/// PUT    /{id}             -> update_tugas
/// DELETE /{id}             -> delete_tugas
/// PATCH  /{id}/status      -> update_status
/// PUT    /{id}/status      -> update_status
/// GET    /{id}/komentar    -> list_komentar
/// POST   /{id}/komentar    -> add_komentar
/// GET    /{id}/riwayat     -> list_riwayat
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tugas::list_for_caller).post(tugas::create_tugas))
        .route("/konsultan", get(tugas::list_assignable_konsultan))
        .route(
            "/{id}",
            get(tugas::get_tugas)
                .put(tugas::update_tugas)
                .delete(tugas::delete_tugas),
        )
        .route(
            "/{id}/status",
            axum::routing::patch(tugas::update_status).put(tugas::update_status),
        )
        .route(
            "/{id}/komentar",
            get(komentar::list_komentar).post(komentar::add_komentar),
        )
        .route("/{id}/riwayat", get(komentar::list_riwayat))
}
