//! Payment Handlers
//!
//! 付款是线下银行转账：客户端提交转账凭据，记录进入 pending，
//! 由管理面板人工审核。审核接口在 admin 模块。

use axum::{Json, extract::State};
use chrono::Utc;
use rust_decimal::Decimal;

use crate::core::ServerState;
use crate::db::models::{PaymentStatus, PaymentTransaction};
use crate::db::repository::PaymentRepository;
use crate::services::EmailMessage;
use crate::utils::validation::{
    MAX_SHORT_TEXT_LEN, validate_email, validate_required_text,
};
use crate::utils::{AppError, AppResult};

use shared::client::PaymentCreateRequest;

/// POST /api/payments - 提交付款待审核
pub async fn create_payment(
    State(state): State<ServerState>,
    Json(req): Json<PaymentCreateRequest>,
) -> AppResult<Json<PaymentTransaction>> {
    validate_email(&req.user_email, "user_email")?;
    validate_required_text(&req.payment_method, "payment_method", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.transaction_id, "transaction_id", MAX_SHORT_TEXT_LEN)?;
    if req.amount <= Decimal::ZERO {
        return Err(AppError::validation("Amount must be positive"));
    }

    let repo = PaymentRepository::new(state.get_db());
    let created = repo
        .create(PaymentTransaction {
            id: None,
            user_email: req.user_email.trim().to_lowercase(),
            amount: req.amount,
            payment_method: req.payment_method.trim().to_string(),
            transaction_id: req.transaction_id.trim().to_string(),
            status: PaymentStatus::Pending,
            refund_data: None,
            created_date: Utc::now(),
        })
        .await?;

    tracing::info!(
        payer = %created.user_email,
        amount = %created.amount,
        "Payment submitted for review"
    );

    // Notify the reviewers off the request path
    let mailer = state.mailer.clone();
    let notify_to = state.config.admin_notify_email.clone();
    let payer = created.user_email.clone();
    let amount = created.amount;
    tokio::spawn(async move {
        mailer
            .send(EmailMessage {
                to: notify_to,
                subject: "New payment awaiting review".to_string(),
                body: format!("{} submitted a payment of {} for manual review.", payer, amount),
            })
            .await;
    });

    Ok(Json(created))
}
