//! Database Models
//!
//! SurrealDB 表对应的数据模型。ID 全栈统一使用 "table:id" 字符串格式，
//! 序列化细节见 [`serde_helpers`]。

pub mod serde_helpers;

pub mod event;
pub mod face_tag;
pub mod guest_user;
pub mod payment;
pub mod post;
pub mod system_log;
pub mod user_plan;

pub use event::{Event, EventCreate, EventId, EventType, EventUpdate};
pub use face_tag::{FaceTag, FaceTagId};
pub use guest_user::{AVATAR_COLORS, GuestUser, GuestUserId};
pub use payment::{PaymentId, PaymentStatus, PaymentTransaction, RefundData};
pub use post::{Post, PostId, PostType};
pub use system_log::{SystemLog, SystemLogId};
pub use user_plan::{PLAN_CATALOG, UserPlan, UserPlanId};
