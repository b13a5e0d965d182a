//! Payment Transaction Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Payment transaction ID type
pub type PaymentId = RecordId;

/// 付款状态
///
/// pending -> approved | rejected，只能由管理员审核流转。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Rejected,
}

/// 拒绝时记录的退款信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundData {
    pub refund_date: DateTime<Utc>,
    pub refund_reason: String,
}

/// Payment transaction model matching SurrealDB schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentTransaction {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<PaymentId>,
    pub user_email: String,
    pub amount: Decimal,
    pub payment_method: String,
    pub transaction_id: String,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refund_data: Option<RefundData>,
    pub created_date: DateTime<Utc>,
}
