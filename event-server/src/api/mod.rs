//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`admin_auth`] - 管理面板登录
//! - [`admin`] - 管理面板 (付款审核、用户、统计、日志)
//! - [`guests`] - 宾客加入和会话恢复
//! - [`feed`] - 活动共享信息流
//! - [`posts`] - 发帖、删帖和瞬态互动
//! - [`events`] - 活动生命周期 (主办方)
//! - [`face_tags`] - 人脸扫描和标注 (主办方)
//! - [`payments`] - 付款提交
//! - [`plans`] - 套餐目录和选择
//! - [`upload`] - 媒体上传和分发

pub mod admin;
pub mod admin_auth;
pub mod events;
pub mod face_tags;
pub mod feed;
pub mod guests;
pub mod health;
pub mod payments;
pub mod plans;
pub mod posts;
pub mod upload;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
