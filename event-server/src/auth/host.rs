//! Host Session Extractor
//!
//! 主办方身份不由本服务管理：请求携带身份服务签发的 Bearer token，
//! 提取器调用身份服务换取 [`HostSession`] 注入处理函数。

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::JwtService;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::AppError;

/// 主办方会话上下文
///
/// # 示例
///
/// ```ignore
/// async fn handler(host: HostSession) -> Json<()> {
///     println!("主办方: {}", host.email);
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HostSession {
    pub email: String,
    pub full_name: String,
}

impl FromRequestParts<ServerState> for HostSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted
        if let Some(session) = parts.extensions.get::<HostSession>() {
            return Ok(session.clone());
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let token = match auth_header {
            Some(header) => JwtService::extract_from_header(header)
                .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
            None => {
                security_log!("WARN", "host_auth_missing", uri = format!("{:?}", parts.uri));
                return Err(AppError::unauthorized());
            }
        };

        match state.identity.me(token).await {
            Ok(principal) => {
                let session = HostSession {
                    email: principal.email,
                    full_name: principal.full_name,
                };
                // Store in extensions for potential reuse
                parts.extensions.insert(session.clone());
                Ok(session)
            }
            Err(e) => {
                security_log!(
                    "WARN",
                    "host_auth_failed",
                    error = format!("{}", e),
                    uri = format!("{:?}", parts.uri)
                );
                Err(AppError::invalid_token("Invalid token"))
            }
        }
    }
}
