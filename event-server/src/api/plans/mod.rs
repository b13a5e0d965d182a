//! 套餐 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/plans | GET | 套餐目录 | 无 |
//! | /api/plans | POST | 选择套餐 | Host |
//! | /api/plans/mine | GET | 当前主办方的套餐 | Host |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/plans", plan_routes())
}

fn plan_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::catalog).post(handler::select_plan))
        .route("/mine", get(handler::my_plan))
}
