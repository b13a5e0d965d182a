//! Guest User Model

use super::EventId;
use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Guest user ID type
pub type GuestUserId = RecordId;

/// 宾客头像配色 (客户端 CSS class)
pub const AVATAR_COLORS: [&str; 8] = [
    "bg-red-500",
    "bg-blue-500",
    "bg-green-500",
    "bg-purple-500",
    "bg-pink-500",
    "bg-indigo-500",
    "bg-yellow-500",
    "bg-teal-500",
];

/// Guest user model matching SurrealDB schema
///
/// `guest_id` 是加入时生成的客户端持有标识 (`guest_<ts>_<rand>`)，
/// 同一活动内用于识别回访宾客。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestUser {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<GuestUserId>,
    #[serde(with = "serde_helpers::record_id")]
    pub event_id: EventId,
    pub guest_id: String,
    pub name: String,
    pub avatar_color: String,
    pub created_date: DateTime<Utc>,
}
