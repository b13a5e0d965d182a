//! 帖子 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/posts | POST | 宾客发帖 | 无 |
//! | /api/posts/{id} | DELETE | 删帖 | Host (owner) |
//! | /api/posts/{id}/like | POST / DELETE | 点赞 / 取消点赞 | 无 |
//! | /api/posts/{id}/save | POST / DELETE | 收藏 / 取消收藏 | 无 |
//! | /api/posts/{id}/comments | POST / GET | 发评论 / 评论列表 | 无 |
//! | /api/posts/{id}/interactions | GET | 互动快照 | 无 |

mod handler;

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/posts", post_routes())
}

fn post_routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create_post))
        .route("/{id}", delete(handler::delete_post))
        .route("/{id}/like", post(handler::like).delete(handler::unlike))
        .route("/{id}/save", post(handler::save).delete(handler::unsave))
        .route(
            "/{id}/comments",
            post(handler::add_comment).get(handler::list_comments),
        )
        .route("/{id}/interactions", get(handler::interactions))
}
