//! 人脸标注 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/events/{id}/face-scan | POST | 扫描全部照片并分组 | Host (owner) |
//! | /api/events/{id}/face-tags | GET | 已确认的标注列表 | 无 |
//! | /api/face-tags/confirm | POST | 给人脸分组命名并落库 | Host (owner) |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/events/{id}/face-scan", post(handler::scan))
        .route("/api/events/{id}/face-tags", get(handler::list_tags))
        .route("/api/face-tags/confirm", post(handler::confirm))
}
