//! Admin authentication endpoint handlers.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use shared::validation::validate_new_passcode;

use crate::app::AppState;
use crate::error::ApiError;

/// Request body for admin login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub passcode: Option<String>,
}

/// Request body for changing the admin passcode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Acknowledgement body for auth operations.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Verify the admin passcode.
///
/// POST /auth/admin
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let passcode = request
        .passcode
        .ok_or_else(|| ApiError::Validation("Passcode is required".to_string()))?;

    if state.auth.verify(&passcode).await? {
        Ok(Json(AuthResponse {
            success: true,
            message: None,
        }))
    } else {
        warn!("Failed admin login attempt");
        Err(ApiError::Unauthorized("Invalid passcode".to_string()))
    }
}

/// Rotate the admin passcode.
///
/// POST /auth/admin/change-password
pub async fn change_password(
    State(state): State<AppState>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let (Some(current), Some(new_passcode)) = (request.current_password, request.new_password)
    else {
        return Err(ApiError::Validation(
            "Current password and new password are required".to_string(),
        ));
    };

    // Length check happens at the boundary; a too-short passcode never
    // reaches the service.
    validate_new_passcode(&new_passcode).map_err(|e| {
        ApiError::Validation(
            e.message
                .map(|m| m.to_string())
                .unwrap_or_else(|| "Invalid new password".to_string()),
        )
    })?;

    if state.auth.change_passcode(&current, &new_passcode).await? {
        Ok(Json(AuthResponse {
            success: true,
            message: Some("Password updated successfully".to_string()),
        }))
    } else {
        warn!("Admin passcode change rejected: current password mismatch");
        Err(ApiError::Unauthorized(
            "Current password is incorrect".to_string(),
        ))
    }
}
