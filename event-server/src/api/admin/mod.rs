//! 管理面板 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 权限 |
//! |------|------|------|------|
//! | /api/admin/payments | GET | 付款列表 | view_payments |
//! | /api/admin/payments/{id}/approve | POST | 批准付款 | manage_payments |
//! | /api/admin/payments/{id}/reject | POST | 拒绝付款 | manage_payments |
//! | /api/admin/users | GET | 注册主办方列表 | view_users |
//! | /api/admin/statistics | GET | 仪表盘统计 | JWT |
//! | /api/admin/logs | GET | 审计日志 | manage_settings |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/payments",
            get(handler::list_payments)
                .route_layer(middleware::from_fn(require_permission("view_payments"))),
        )
        .route(
            "/payments/{id}/approve",
            post(handler::approve_payment)
                .route_layer(middleware::from_fn(require_permission("manage_payments"))),
        )
        .route(
            "/payments/{id}/reject",
            post(handler::reject_payment)
                .route_layer(middleware::from_fn(require_permission("manage_payments"))),
        )
        .route(
            "/users",
            get(handler::list_users)
                .route_layer(middleware::from_fn(require_permission("view_users"))),
        )
        .route("/statistics", get(handler::statistics))
        .route(
            "/logs",
            get(handler::list_logs)
                .route_layer(middleware::from_fn(require_permission("manage_settings"))),
        )
}
