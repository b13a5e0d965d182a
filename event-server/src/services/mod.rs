//! 服务模块 - 核心业务服务
//!
//! # 内容
//!
//! - [`HttpService`] - HTTP 服务 (路由构建和启动)
//! - [`IdentityProvider`] - 主办方身份服务接口
//! - [`RecognitionClient`] - 人脸识别服务接口
//! - [`Mailer`] - 邮件通知接口
//! - [`InteractionStore`] - 瞬态互动状态
//! - [`media`] - 照片合成和音频校验
//! - [`face_scan`] - 活动级人脸扫描
//! - [`join_code`] - 加入码生成

pub mod face_scan;
pub mod http;
pub mod identity;
pub mod interactions;
pub mod join_code;
pub mod mailer;
pub mod media;
pub mod recognition;

pub use http::{HttpService, build_app};
pub use identity::{HttpIdentityProvider, IdentityProvider, Principal, StaticIdentityProvider};
pub use interactions::{Comment, InteractionSnapshot, InteractionStore};
pub use mailer::{EmailMessage, HttpMailer, LogMailer, Mailer};
pub use recognition::{DetectedFace, HttpRecognitionClient, RecognitionClient};
