//! User Plan Model

use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// User plan ID type
pub type UserPlanId = RecordId;

/// 套餐目录: (id, 一次性价格)
pub const PLAN_CATALOG: [(&str, i64); 3] = [("basic", 199), ("premium", 399), ("ultimate", 699)];

/// User plan model matching SurrealDB schema
///
/// 每个主办方邮箱最多一条记录，选择新套餐时覆盖更新。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlan {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserPlanId>,
    pub user_email: String,
    pub plan_type: String,
    pub status: String,
    pub created_date: DateTime<Utc>,
}
