//! Handlers for the `/tugas` resource.
//!
//! Authorization is an id match against the stored record: the creator
//! (`penyuluh_id`) edits and deletes, the assignee (`konsultan_id`) moves
//! the status. Existence is checked before permission, permission before
//! input.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tugas_core::error::CoreError;
use tugas_core::roles::{list_scope_for_role, ListScope, ROLE_KONSULTAN};
use tugas_core::tugas::{
    ensure_assignee, ensure_can_create, ensure_creator, require_fields, validate_status,
    DEFAULT_JENIS,
};
use tugas_core::types::{Date, DbId};
use tugas_db::models::tugas::{CreateTugas, Tugas, TugasDetail, UpdateTugas};
use tugas_db::models::user::UserSummary;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Request types
-------------------------------------------------------------------------- */

/// Request body for `POST /tugas`.
///
/// Server-owned fields (`status`, `penyuluh_id`, `tanggal_dibuat`) are not
/// part of the body; if a client sends them they are ignored.
#[derive(Debug, Deserialize)]
pub struct CreateTugasRequest {
    pub judul: Option<String>,
    pub deskripsi: Option<String>,
    pub jenis: Option<String>,
    pub konsultan_id: Option<DbId>,
    pub tanggal_mulai: Option<Date>,
    pub deadline: Option<Date>,
    pub lampiran_url: Option<String>,
}

/// Request body for `PATCH|PUT /tugas/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/* --------------------------------------------------------------------------
Handlers
-------------------------------------------------------------------------- */

/// GET /api/tugas
///
/// Field officers see what they created; consultants see what is assigned
/// to them. The role is read from the stored profile.
pub async fn list_for_caller(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<TugasDetail>>> {
    let caller = auth.profile(&state).await?;

    let items = match list_scope_for_role(&caller.role)? {
        ListScope::Creator => state.store.list_tugas_by_penyuluh(caller.id).await?,
        ListScope::Assignee => state.store.list_tugas_by_konsultan(caller.id).await?,
    };
    Ok(Json(items))
}

/// POST /api/tugas
pub async fn create_tugas(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateTugasRequest>,
) -> AppResult<(StatusCode, Json<Tugas>)> {
    let caller = auth.profile(&state).await?;
    ensure_can_create(&caller.role)?;

    let required = require_fields(input.judul.as_deref(), input.konsultan_id, input.deadline)?;
    ensure_konsultan(&state, required.konsultan_id).await?;

    let create = CreateTugas {
        judul: required.judul,
        deskripsi: input.deskripsi,
        jenis: input.jenis.unwrap_or_else(|| DEFAULT_JENIS.to_string()),
        penyuluh_id: caller.id,
        konsultan_id: required.konsultan_id,
        tanggal_dibuat: Utc::now().date_naive(),
        tanggal_mulai: input.tanggal_mulai,
        deadline: required.deadline,
        lampiran_url: input.lampiran_url,
    };

    let tugas = state.store.create_tugas(&create).await?;

    tracing::info!(
        tugas_id = %tugas.id,
        penyuluh_id = %tugas.penyuluh_id,
        konsultan_id = %tugas.konsultan_id,
        "Tugas created",
    );
    Ok((StatusCode::CREATED, Json(tugas)))
}

/// GET /api/tugas/konsultan
///
/// Consultants the caller can assign to: those in the caller's own region
/// or any region recorded for the caller.
pub async fn list_assignable_konsultan(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<Vec<UserSummary>>> {
    let konsultan = state.store.list_konsultan_for_penyuluh(auth.user_id).await?;
    Ok(Json(konsultan))
}

/// GET /api/tugas/{id}
pub async fn get_tugas(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TugasDetail>> {
    let tugas = state
        .store
        .find_tugas_detail(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tugas", id }))?;
    Ok(Json(tugas))
}

/// PUT /api/tugas/{id}
pub async fn update_tugas(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTugas>,
) -> AppResult<Json<Tugas>> {
    let existing = find_tugas(&state, id).await?;
    ensure_creator(existing.penyuluh_id, auth.user_id)?;

    if let Some(konsultan_id) = input.konsultan_id {
        if konsultan_id != existing.konsultan_id {
            ensure_konsultan(&state, konsultan_id).await?;
        }
    }

    let tugas = state
        .store
        .update_tugas(id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tugas", id }))?;

    tracing::info!(tugas_id = %id, user_id = %auth.user_id, "Tugas updated");
    Ok(Json(tugas))
}

/// PATCH|PUT /api/tugas/{id}/status
///
/// The status write and its history entry are stored together.
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<Tugas>> {
    let existing = find_tugas(&state, id).await?;
    ensure_assignee(existing.konsultan_id, auth.user_id)?;

    let status = input.status.unwrap_or_default();
    validate_status(&status)?;

    let tugas = state
        .store
        .update_tugas_status(id, &status, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tugas", id }))?;

    tracing::info!(
        tugas_id = %id,
        user_id = %auth.user_id,
        from = %existing.status,
        to = %tugas.status,
        "Tugas status changed",
    );
    Ok(Json(tugas))
}

/// DELETE /api/tugas/{id}
pub async fn delete_tugas(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let existing = find_tugas(&state, id).await?;
    ensure_creator(existing.penyuluh_id, auth.user_id)?;

    if !state.store.delete_tugas(id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Tugas", id }));
    }

    tracing::info!(tugas_id = %id, user_id = %auth.user_id, "Tugas deleted");
    Ok(Json(MessageResponse::new("Tugas deleted successfully")))
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Load a tugas or fail with `NotFound`.
pub(crate) async fn find_tugas(state: &AppState, id: DbId) -> AppResult<Tugas> {
    state
        .store
        .find_tugas(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Tugas", id }))
}

/// An assignee must be an existing consultant.
async fn ensure_konsultan(state: &AppState, konsultan_id: DbId) -> AppResult<()> {
    match state.store.find_user(konsultan_id).await? {
        Some(user) if user.role == ROLE_KONSULTAN => Ok(()),
        Some(_) => Err(AppError::Core(CoreError::Validation(format!(
            "User {konsultan_id} is not a {ROLE_KONSULTAN}"
        )))),
        None => Err(AppError::Core(CoreError::Validation(format!(
            "Assignee {konsultan_id} does not exist"
        )))),
    }
}
