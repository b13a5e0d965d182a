//! System Log Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// System log ID type
pub type SystemLogId = RecordId;

/// 管理操作审计日志
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemLog {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<SystemLogId>,
    /// 操作者 (管理员邮箱)
    pub actor: String,
    /// 动作 (如 "payment.approved")
    pub action: String,
    /// 操作对象 (记录 ID 或邮箱)
    pub target: String,
    #[serde(default)]
    pub details: serde_json::Value,
    pub created_date: DateTime<Utc>,
}
