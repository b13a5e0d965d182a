//! 认证中间件
//!
//! 为管理面板 JWT 认证和授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{AdminSession, JwtService};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 管理面板认证中间件
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`AdminSession`] 注入请求扩展 (`req.extensions_mut().insert(session)`)。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/admin/` 路径 (公共接口和主办方接口另行鉴权)
/// - `/api/admin/login` (登录接口)
///
/// # 错误处理
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 | 401 Unauthorized |
/// | 令牌过期 | 401 TokenExpired |
/// | 无效令牌 | 401 InvalidToken |
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    // 允许 CORS 预检的 OPTIONS 请求 (跳过认证)
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    // 只保护管理面板路由
    if !path.starts_with("/api/admin/") {
        return Ok(next.run(req).await);
    }

    // 登录接口跳过认证
    if path == "/api/admin/login" {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "admin_auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::unauthorized());
        }
    };

    // 验证令牌
    match jwt_service.validate_token(token) {
        Ok(claims) => {
            let session = AdminSession::from(claims);
            req.extensions_mut().insert(session);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "admin_auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                crate::auth::JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// 权限检查中间件 - 要求特定权限
///
/// # 参数
///
/// - `permission`: 所需权限，如 `"manage_payments"`, `"view_users"`
///
/// # 用法
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/admin/payments", get(handler::list))
///     .layer(middleware::from_fn(require_permission("view_payments")));
/// ```
///
/// # 错误
///
/// 无权限返回 403 Forbidden
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let session = req
                .extensions()
                .get::<AdminSession>()
                .ok_or(AppError::unauthorized())?;

            if !session.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    admin_id = session.id.clone(),
                    email = session.email.clone(),
                    required_permission = permission
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    permission
                )));
            }

            Ok(next.run(req).await)
        })
    }
}

/// 从请求中提取 AdminSession 的扩展方法
pub trait AdminSessionExt {
    /// 从请求扩展中获取 AdminSession
    ///
    /// # 错误
    ///
    /// 未认证返回 401 Unauthorized
    fn admin_session(&self) -> Result<&AdminSession, AppError>;
}

impl AdminSessionExt for Request {
    fn admin_session(&self) -> Result<&AdminSession, AppError> {
        self.extensions()
            .get::<AdminSession>()
            .ok_or(AppError::unauthorized())
    }
}
