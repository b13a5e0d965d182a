//! 动态流 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/feed/{code} | GET | 活动动态流 (最新在前) | 无 |
//! | /api/events/{id}/posts | GET | 按标签/类型过滤的帖子列表 | 无 |
//! | /api/events/{id}/posts/moment-types | GET | 已出现的时刻标签 | 无 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/feed/{code}", get(handler::feed))
        .route("/api/events/{id}/posts", get(handler::event_posts))
        .route(
            "/api/events/{id}/posts/moment-types",
            get(handler::event_moment_types),
        )
}
