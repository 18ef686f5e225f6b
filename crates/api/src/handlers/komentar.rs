//! Handlers for comments and status history under `/tugas/{id}`.
//!
//! Any authenticated caller may comment; there is no ownership rule.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tugas_core::tugas::normalize_komentar;
use tugas_core::types::DbId;
use tugas_db::models::komentar::{CreateKomentar, KomentarDetail};
use tugas_db::models::riwayat::Riwayat;

use crate::error::AppResult;
use crate::handlers::tugas::find_tugas;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /tugas/{id}/komentar`.
#[derive(Debug, Deserialize)]
pub struct CreateKomentarRequest {
    #[serde(default)]
    pub komentar: String,
}

/// GET /api/tugas/{id}/komentar -- oldest first.
pub async fn list_komentar(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(tugas_id): Path<DbId>,
) -> AppResult<Json<Vec<KomentarDetail>>> {
    find_tugas(&state, tugas_id).await?;
    Ok(Json(state.store.list_komentar(tugas_id).await?))
}

/// POST /api/tugas/{id}/komentar
pub async fn add_komentar(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(tugas_id): Path<DbId>,
    Json(input): Json<CreateKomentarRequest>,
) -> AppResult<(StatusCode, Json<KomentarDetail>)> {
    find_tugas(&state, tugas_id).await?;
    let komentar = normalize_komentar(&input.komentar)?;

    let created = state
        .store
        .create_komentar(&CreateKomentar {
            tugas_id,
            user_id: auth.user_id,
            komentar,
        })
        .await?;

    tracing::info!(tugas_id = %tugas_id, user_id = %auth.user_id, "Komentar added");
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/tugas/{id}/riwayat -- newest first.
pub async fn list_riwayat(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(tugas_id): Path<DbId>,
) -> AppResult<Json<Vec<Riwayat>>> {
    find_tugas(&state, tugas_id).await?;
    Ok(Json(state.store.list_riwayat(tugas_id).await?))
}
