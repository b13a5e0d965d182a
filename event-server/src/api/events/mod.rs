//! 活动 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/events | POST | 主办方建活动 | Host |
//! | /api/events/mine | GET | 我的活动列表 | Host |
//! | /api/events/by-code/{code} | GET | 按加入码查活动 | 无 |
//! | /api/events/{id} | GET | 活动详情 | 无 |
//! | /api/events/{id} | PUT | 更新活动 | Host (owner) |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/events", event_routes())
}

fn event_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create_event))
        .route("/mine", get(handler::my_events))
        .route("/by-code/{code}", get(handler::event_by_code))
        .route(
            "/{id}",
            get(handler::event_detail).put(handler::update_event),
        )
}
