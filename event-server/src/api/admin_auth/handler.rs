//! Admin Authentication Handlers
//!
//! Handles admin panel login, logout, and session info

use std::time::Duration;

use axum::{Extension, Json, extract::State};

use crate::auth::{AdminSession, admin};
use crate::core::ServerState;
use crate::db::repository::SystemLogRepository;
use crate::utils::AppError;

// Re-use shared DTOs for API consistency
use shared::client::{AdminInfo, AdminLoginRequest, AdminLoginResponse};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login handler
///
/// Authenticates admin credentials against the built-in directory
/// and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Json<AdminLoginResponse>, AppError> {
    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent account enumeration
    let account = match admin::authenticate(&req.email, &req.password) {
        Some(account) => account,
        None => {
            tracing::warn!(email = %req.email, "Admin login failed - invalid credentials");
            return Err(AppError::invalid_credentials());
        }
    };

    let permissions: Vec<String> = account.permissions.iter().map(|p| p.to_string()).collect();

    let token = state
        .get_jwt_service()
        .generate_token(
            account.id,
            account.email,
            account.full_name,
            account.role,
            &permissions,
        )
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    // Audit trail, best effort
    let logs = SystemLogRepository::new(state.get_db());
    if let Err(e) = logs
        .log(
            account.email,
            "admin.login",
            account.id,
            serde_json::json!({"role": account.role}),
        )
        .await
    {
        tracing::warn!(error = %e, "Failed to write login audit entry");
    }

    tracing::info!(email = %account.email, role = %account.role, "Admin logged in");

    Ok(Json(AdminLoginResponse {
        token,
        user: AdminInfo {
            id: account.id.to_string(),
            email: account.email.to_string(),
            full_name: account.full_name.to_string(),
            role: account.role.to_string(),
            permissions,
        },
    }))
}

/// GET /api/admin/me - 当前管理员信息
pub async fn me(Extension(session): Extension<AdminSession>) -> Json<AdminInfo> {
    Json(AdminInfo {
        id: session.id,
        email: session.email,
        full_name: session.full_name,
        role: session.role,
        permissions: session.permissions,
    })
}

/// POST /api/admin/logout
///
/// 令牌是无状态 JWT，由客户端丢弃；这里只记审计
pub async fn logout(
    State(state): State<ServerState>,
    Extension(session): Extension<AdminSession>,
) -> Json<serde_json::Value> {
    let logs = SystemLogRepository::new(state.get_db());
    if let Err(e) = logs
        .log(
            session.email.clone(),
            "admin.logout",
            session.id.clone(),
            serde_json::Value::Null,
        )
        .await
    {
        tracing::warn!(error = %e, "Failed to write logout audit entry");
    }

    Json(serde_json::json!({ "status": "logged_out" }))
}
