//! Post Model

use super::EventId;
use super::serde_helpers;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Post ID type
pub type PostId = RecordId;

/// 帖子类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    Photo,
    Video,
    Text,
    Voice,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Video => "video",
            Self::Text => "text",
            Self::Voice => "voice",
        }
    }
}

/// Post model matching SurrealDB schema
///
/// `guest_id` / `guest_name` 记录发布者身份；photo/video/voice 帖必有
/// `media_url`，text 帖必有 `caption`。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<PostId>,
    #[serde(with = "serde_helpers::record_id")]
    pub event_id: EventId,
    #[serde(rename = "type")]
    pub post_type: PostType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    pub guest_name: String,
    pub guest_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    pub created_date: DateTime<Utc>,
}
