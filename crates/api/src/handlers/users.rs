//! Handlers for the `/users` directory.
//!
//! Any authenticated caller may read the directory; a profile can only be
//! changed or deleted by its owner.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tugas_core::error::CoreError;
use tugas_core::roles::validate_role;
use tugas_core::types::DbId;
use tugas_core::wilayah::wilayah_for_registration;
use tugas_db::models::user::{UpdateUser, UserResponse};
use validator::Validate;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /users/{id}`. Only present fields are changed.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: Option<String>,
    pub role: Option<String>,
    pub wilayah: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub message: String,
    pub user: UserResponse,
}

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .store
        .find_user(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(UserResponse::from(&user)))
}

/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    ensure_self(&auth, id)?;
    input.validate()?;
    let existing = auth.profile(&state).await?;

    let name = non_blank("name", input.name.as_deref())?;
    let email = non_blank("email", input.email.as_deref())?;
    if let Some(role) = &input.role {
        validate_role(role)?;
    }

    // Region-bound roles always carry a region label.
    let wilayah = if input.role.is_some() || input.wilayah.is_some() {
        let role = input.role.as_deref().unwrap_or(&existing.role);
        let supplied = input
            .wilayah
            .as_deref()
            .filter(|w| !w.trim().is_empty())
            .or(existing.wilayah.as_deref());
        wilayah_for_registration(role, supplied)
    } else {
        None
    };

    let password_hash = match &input.password {
        Some(password) => Some(
            hash_password(password)
                .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
        ),
        None => None,
    };

    let patch = UpdateUser {
        name,
        email,
        password_hash,
        role: input.role.clone(),
        wilayah,
    };

    let user = state
        .store
        .update_user(id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = %id, "User updated");
    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DeleteUserResponse>> {
    ensure_self(&auth, id)?;

    let user = state
        .store
        .delete_user(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    tracing::info!(user_id = %id, "User deleted");
    Ok(Json(DeleteUserResponse {
        message: "User deleted successfully".into(),
        user: UserResponse::from(&user),
    }))
}

fn ensure_self(auth: &AuthUser, id: DbId) -> Result<(), AppError> {
    if auth.user_id == id {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "You may only modify your own profile".into(),
        )))
    }
}

/// Trim an optional patch field; present-but-blank is rejected.
fn non_blank(field: &str, value: Option<&str>) -> Result<Option<String>, AppError> {
    match value.map(str::trim) {
        Some("") => Err(AppError::Core(CoreError::Validation(format!(
            "{field} must not be empty"
        )))),
        other => Ok(other.map(str::to_string)),
    }
}
