//! Handlers for registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tugas_core::error::CoreError;
use tugas_core::roles::validate_role;
use tugas_core::wilayah::wilayah_for_registration;
use tugas_db::models::user::{CreateUser, User, UserResponse};
use tugas_db::StoreError;
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /register` (and each entry of `POST /register-many`).
///
/// Missing strings deserialize as empty so they surface as validation errors
/// rather than body rejections.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "Password must be at least 8 characters long"))]
    pub password: String,
    #[serde(default)]
    pub role: String,
    pub wilayah: Option<String>,
}

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Outcome of one entry in a bulk registration.
#[derive(Debug, Serialize)]
pub struct RegisterResult {
    pub email: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterManyResponse {
    pub message: String,
    pub results: Vec<RegisterResult>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/register
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let user = register_user(&state, &input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".into(),
            user: UserResponse::from(&user),
        }),
    ))
}

/// POST /api/register-many
///
/// Registers each entry independently; a failing entry is reported in its
/// result and does not stop the rest.
pub async fn register_many(
    State(state): State<AppState>,
    Json(inputs): Json<Vec<RegisterRequest>>,
) -> AppResult<Json<RegisterManyResponse>> {
    let mut results = Vec::with_capacity(inputs.len());

    for input in &inputs {
        let result = match register_user(&state, input).await {
            Ok(user) => RegisterResult {
                email: user.email.clone(),
                success: true,
                user: Some(UserResponse::from(&user)),
                error: None,
            },
            Err(err) => RegisterResult {
                email: input.email.trim().to_string(),
                success: false,
                user: None,
                error: Some(err.classify().2),
            },
        };
        results.push(result);
    }

    let registered = results.iter().filter(|r| r.success).count();
    tracing::info!(registered, total = results.len(), "Bulk registration finished");

    Ok(Json(RegisterManyResponse {
        message: format!("{registered} of {} users registered", results.len()),
        results,
    }))
}

/// POST /api/login
///
/// Unknown email and wrong password produce the same error.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let invalid = || AppError::Core(CoreError::Unauthorized("Invalid credentials".into()));

    let user = state
        .store
        .find_user_by_email(input.email.trim())
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(invalid());
    }

    let token = generate_access_token(user.id, &user.role, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    tracing::info!(user_id = %user.id, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        message: "Login successful".into(),
        user: UserResponse::from(&user),
        token,
        expires_in: state.config.jwt.expires_in_secs(),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate, hash, and insert one registration.
async fn register_user(state: &AppState, input: &RegisterRequest) -> AppResult<User> {
    let name = input.name.trim();
    let email = input.email.trim();
    if name.is_empty() || email.is_empty() || input.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name, email, and password are required".into(),
        )));
    }
    input.validate()?;
    validate_role(&input.role)?;

    let already_registered = || {
        AppError::Core(CoreError::Validation(format!(
            "Email '{email}' is already registered"
        )))
    };

    if state.store.find_user_by_email(email).await?.is_some() {
        return Err(already_registered());
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        name: name.to_string(),
        email: email.to_string(),
        password_hash,
        role: input.role.clone(),
        wilayah: wilayah_for_registration(&input.role, input.wilayah.as_deref()),
    };

    let user = match state.store.create_user(&create).await {
        Ok(user) => user,
        // Lost a race with a concurrent registration of the same email.
        Err(StoreError::Conflict(_)) => return Err(already_registered()),
        Err(StoreError::Database(sqlx::Error::Database(db_err)))
            if db_err.constraint() == Some("uq_users_email") =>
        {
            return Err(already_registered())
        }
        Err(err) => return Err(err.into()),
    };

    tracing::info!(user_id = %user.id, role = %user.role, "User registered");
    Ok(user)
}
