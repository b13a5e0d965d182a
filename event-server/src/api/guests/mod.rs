//! 宾客会话 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/guests/join | POST | 输名字加入活动 | 无 |
//! | /api/guests/session | GET | 回访会话恢复 | 无 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/guests", guest_routes())
}

fn guest_routes() -> Router<ServerState> {
    Router::new()
        .route("/join", post(handler::join))
        .route("/session", get(handler::session))
}
