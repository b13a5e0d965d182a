//! Admin Panel Handlers
//!
//! Payment review, user overview, dashboard statistics and audit logs

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;

use crate::auth::AdminSession;
use crate::core::ServerState;
use crate::db::models::{PaymentStatus, PaymentTransaction, SystemLog};
use crate::db::repository::{
    EventRepository, PaymentRepository, PostRepository, SystemLogRepository,
};
use crate::services::Principal;
use crate::utils::{AppError, AppResult};

use shared::client::{DashboardStats, PaymentRejectRequest};

/// 管理列表查询的行数上限
const LIST_LIMIT: usize = 100;

// =============================================================================
// Payments
// =============================================================================

/// GET /api/admin/payments - 付款列表 (最新在前)
pub async fn list_payments(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<PaymentTransaction>>> {
    let repo = PaymentRepository::new(state.get_db());
    let payments = repo.find_all(LIST_LIMIT).await?;
    Ok(Json(payments))
}

/// POST /api/admin/payments/:id/approve - 批准付款
pub async fn approve_payment(
    State(state): State<ServerState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
) -> AppResult<Json<PaymentTransaction>> {
    let repo = PaymentRepository::new(state.get_db());

    let payment = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Payment {}", id)))?;

    if payment.status != PaymentStatus::Pending {
        return Err(AppError::conflict(format!(
            "Payment {} has already been reviewed",
            id
        )));
    }

    let updated = repo.approve(&id).await?;

    audit(&state, &session, "payment.approved", &id).await;
    tracing::info!(payment = %id, admin = %session.email, "Payment approved");

    Ok(Json(updated))
}

/// POST /api/admin/payments/:id/reject - 拒绝付款并记录退款原因
pub async fn reject_payment(
    State(state): State<ServerState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<String>,
    Json(req): Json<PaymentRejectRequest>,
) -> AppResult<Json<PaymentTransaction>> {
    if req.reason.trim().is_empty() {
        return Err(AppError::validation("Rejection reason is required"));
    }

    let repo = PaymentRepository::new(state.get_db());

    let payment = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Payment {}", id)))?;

    if payment.status != PaymentStatus::Pending {
        return Err(AppError::conflict(format!(
            "Payment {} has already been reviewed",
            id
        )));
    }

    let updated = repo.reject(&id, req.reason.clone()).await?;

    audit(&state, &session, "payment.rejected", &id).await;
    tracing::info!(payment = %id, admin = %session.email, "Payment rejected");

    Ok(Json(updated))
}

// =============================================================================
// Users
// =============================================================================

/// GET /api/admin/users - 注册主办方列表 (身份服务透传)
pub async fn list_users(State(state): State<ServerState>) -> AppResult<Json<Vec<Principal>>> {
    let users = state.identity.list_users().await?;
    Ok(Json(users))
}

// =============================================================================
// Statistics
// =============================================================================

/// GET /api/admin/statistics - 仪表盘统计
///
/// 四路并发拉取；任何一路失败只告警并按空集计数，仪表盘永不 500
pub async fn statistics(State(state): State<ServerState>) -> Json<DashboardStats> {
    let db = state.get_db();
    let events_repo = EventRepository::new(db.clone());
    let posts_repo = PostRepository::new(db.clone());
    let payments_repo = PaymentRepository::new(db);

    let (users, events, posts, payments) = tokio::join!(
        state.identity.list_users(),
        events_repo.find_all(LIST_LIMIT),
        posts_repo.find_all(LIST_LIMIT),
        payments_repo.find_all(LIST_LIMIT),
    );

    let users = users.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch users for dashboard");
        Vec::new()
    });
    let events = events.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch events for dashboard");
        Vec::new()
    });
    let posts = posts.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch posts for dashboard");
        Vec::new()
    });
    let payments = payments.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to fetch payments for dashboard");
        Vec::new()
    });

    let total_revenue: Decimal = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Approved)
        .map(|p| p.amount)
        .sum();
    let pending_payments = payments
        .iter()
        .filter(|p| p.status == PaymentStatus::Pending)
        .count() as u64;

    Json(DashboardStats {
        total_users: users.len() as u64,
        total_events: events.len() as u64,
        total_media: posts.len() as u64,
        total_revenue,
        pending_payments,
    })
}

// =============================================================================
// Audit logs
// =============================================================================

/// GET /api/admin/logs - 最近审计日志
pub async fn list_logs(State(state): State<ServerState>) -> AppResult<Json<Vec<SystemLog>>> {
    let repo = SystemLogRepository::new(state.get_db());
    let entries = repo.find_recent(LIST_LIMIT).await?;
    Ok(Json(entries))
}

/// 写一条审计日志，失败只告警
async fn audit(state: &ServerState, session: &AdminSession, action: &str, target: &str) {
    let logs = SystemLogRepository::new(state.get_db());
    if let Err(e) = logs
        .log(
            session.email.clone(),
            action,
            target,
            serde_json::Value::Null,
        )
        .await
    {
        tracing::warn!(error = %e, action = %action, "Failed to write audit entry");
    }
}
