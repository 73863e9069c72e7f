//! Authentication Handlers
//!
//! Handles login, registration, and the current-user endpoint.

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppError;
use crate::auth::{CurrentUser, password};
use crate::core::AppState;
use crate::db::models::Role;
use crate::utils::{AppResponse, AppResult, ok};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub role: Role,
}

/// Login handler
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AppResponse<LoginResponse>>> {
    req.validate()?;

    let employee = state.employees.find_by_username(&req.username).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent username enumeration
    let employee = match employee {
        Some(e) if e.verify_password(&req.password) => e,
        _ => {
            tracing::warn!(username = %req.username, "Login failed - invalid credentials");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .jwt_service
        .generate_token(&employee.id, &employee.username, employee.role.as_str())
        .map_err(|e| AppError::internal(format!("Token generation failed: {}", e)))?;

    tracing::info!(
        employee_id = %employee.id,
        username = %employee.username,
        "Login successful"
    );

    Ok(ok(LoginResponse {
        token,
        expires_in: state.jwt_service.config.expiration_minutes * 60,
        user: UserInfo {
            id: employee.id,
            username: employee.username,
            role: employee.role,
        },
    }))
}

/// GET /api/auth/me - 当前用户信息
pub async fn me(user: CurrentUser) -> Json<AppResponse<UserInfo>> {
    ok(UserInfo {
        id: user.id,
        username: user.username,
        role: user.role,
    })
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub role: Role,
}

/// POST /api/auth/register - 创建员工账号 (仅管理员)
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AppResponse<UserInfo>>)> {
    req.validate()?;

    let hash = password::hash_password(&req.password)?;
    let employee = state
        .employees
        .create(&req.username, &hash, req.role)
        .await?;

    tracing::info!(
        employee_id = %employee.id,
        username = %employee.username,
        role = %employee.role,
        "Employee account created"
    );

    Ok((
        StatusCode::CREATED,
        ok(UserInfo {
            id: employee.id,
            username: employee.username,
            role: employee.role,
        }),
    ))
}
