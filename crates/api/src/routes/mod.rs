pub mod auth;
pub mod health;
pub mod tugas;
pub mod users;
pub mod wilayah;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /register                          register (public)
/// /register-many                     bulk register (public)
/// /login                             login (public)
///
/// /users                             list
/// /users/{id}                        get, update (self), delete (self)
///
/// /tugas                             list for caller, create
/// /tugas/konsultan                   consultants the caller can assign to
/// /tugas/{id}                        get, update (creator), delete (creator)
/// /tugas/{id}/status                 change status (assignee; PATCH or PUT)
/// /tugas/{id}/komentar               list, add
/// /tugas/{id}/riwayat                status history
///
/// /wilayah/penyuluh                  caller's regions: list, add
/// /wilayah/penyuluh/{wilayah}        remove a region from the caller
/// /wilayah/{wilayah}/konsultan       consultants in a region
/// /wilayah/{wilayah}/penyuluh        field officers covering a region
/// /wilayah/{wilayah}/gapoktan        farmer-group leaders in a region
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/users", users::router())
        .nest("/tugas", tugas::router())
        .nest("/wilayah", wilayah::router())
}
