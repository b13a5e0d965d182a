//! Face Tag Model

use super::serde_helpers;
use super::{EventId, PostId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::client::BoundingBox;
use surrealdb::RecordId;

/// Face tag ID type
pub type FaceTagId = RecordId;

/// Face tag model matching SurrealDB schema
///
/// 一条记录 = 一张照片上确认过姓名的一张脸。
/// `face_id` 由识别服务分配，同一人在不同照片上共享同一 face_id。
/// `bounding_box` 为分数坐标 (0..=1)。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceTag {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<FaceTagId>,
    #[serde(with = "serde_helpers::record_id")]
    pub event_id: EventId,
    #[serde(with = "serde_helpers::record_id")]
    pub post_id: PostId,
    pub face_id: String,
    pub person_name: String,
    pub bounding_box: BoundingBox,
    pub created_date: DateTime<Utc>,
}
