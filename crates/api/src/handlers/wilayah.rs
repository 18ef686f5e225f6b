//! Handlers for the region directory under `/wilayah`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tugas_core::roles::{ROLE_GAPOKTAN, ROLE_KONSULTAN};
use tugas_core::wilayah::{ensure_can_cover_wilayah, normalize_wilayah};
use tugas_db::models::user::UserSummary;
use tugas_db::models::wilayah::{CreateWilayahPenyuluh, PenyuluhWilayah, WilayahPenyuluh};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Request body for `POST /wilayah/penyuluh`.
#[derive(Debug, Deserialize)]
pub struct AddWilayahRequest {
    #[serde(default)]
    pub wilayah: String,
}

#[derive(Debug, Serialize)]
pub struct AddWilayahResponse {
    pub message: String,
    pub wilayah: WilayahPenyuluh,
}

/// GET /api/wilayah/penyuluh -- regions recorded for the caller.
pub async fn list_own(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<WilayahPenyuluh>>> {
    Ok(Json(state.store.list_wilayah_for_penyuluh(auth.user_id).await?))
}

/// POST /api/wilayah/penyuluh
///
/// Field officers only.
pub async fn add_own(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<AddWilayahRequest>,
) -> AppResult<(StatusCode, Json<AddWilayahResponse>)> {
    let caller = auth.profile(&state).await?;
    ensure_can_cover_wilayah(&caller.role)?;
    let wilayah = normalize_wilayah(&input.wilayah)?;

    let created = state
        .store
        .add_wilayah(&CreateWilayahPenyuluh {
            penyuluh_id: caller.id,
            wilayah,
        })
        .await?;

    tracing::info!(penyuluh_id = %auth.user_id, wilayah = %created.wilayah, "Wilayah added");
    Ok((
        StatusCode::CREATED,
        Json(AddWilayahResponse {
            message: "Wilayah added successfully".into(),
            wilayah: created,
        }),
    ))
}

/// DELETE /api/wilayah/penyuluh/{wilayah}
///
/// Removing a region that is not recorded is not an error.
pub async fn remove_own(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(wilayah): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let removed = state.store.remove_wilayah(auth.user_id, &wilayah).await?;

    tracing::info!(penyuluh_id = %auth.user_id, wilayah = %wilayah, removed, "Wilayah removed");
    Ok(Json(MessageResponse::new("Wilayah removed successfully")))
}

/// GET /api/wilayah/{wilayah}/konsultan
pub async fn list_konsultan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(wilayah): Path<String>,
) -> AppResult<Json<Vec<UserSummary>>> {
    let users = state
        .store
        .list_users_by_role_and_wilayah(ROLE_KONSULTAN, &wilayah)
        .await?;
    Ok(Json(users))
}

/// GET /api/wilayah/{wilayah}/gapoktan
pub async fn list_gapoktan(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(wilayah): Path<String>,
) -> AppResult<Json<Vec<UserSummary>>> {
    let users = state
        .store
        .list_users_by_role_and_wilayah(ROLE_GAPOKTAN, &wilayah)
        .await?;
    Ok(Json(users))
}

/// GET /api/wilayah/{wilayah}/penyuluh
pub async fn list_penyuluh(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(wilayah): Path<String>,
) -> AppResult<Json<Vec<PenyuluhWilayah>>> {
    Ok(Json(state.store.list_penyuluh_for_wilayah(&wilayah).await?))
}
