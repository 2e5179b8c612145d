//! Auth API handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::Role;
use crate::common::{ApiResponse, AppError, AppResult, ok_with_message};
use crate::core::AppState;
use crate::db::staff;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub role: Role,
}

/// POST /api/auth/login
///
/// Verifies credentials and returns a bearer token. Unknown usernames and
/// wrong passwords produce the same message.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    let staff = staff::find_by_username(&state.db.reader, &req.username)
        .await?
        .ok_or_else(|| AppError::validation("Invalid username or password"))?;

    let password_valid = staff
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !password_valid {
        tracing::warn!(target: "security", username = %req.username, "Failed login attempt");
        return Err(AppError::validation("Invalid username or password"));
    }

    let token = state
        .jwt
        .generate_token(staff.id, &staff.username, staff.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(username = %staff.username, role = %staff.role, "Staff logged in");

    Ok(ok_with_message(
        LoginResponse {
            token,
            username: staff.username,
            role: staff.role,
        },
        "Login successful.",
    ))
}

/// POST /api/auth/logout
///
/// Tokens are stateless; logout is an acknowledgement for client parity.
pub async fn logout() -> Json<ApiResponse<()>> {
    ok_with_message((), "Logged out successfully.")
}
