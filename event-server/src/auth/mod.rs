//! 认证授权模块
//!
//! 提供管理面板 JWT 认证和主办方会话提取：
//! - [`JwtService`] - JWT 令牌服务
//! - [`AdminSession`] - 管理员会话上下文
//! - [`HostSession`] - 主办方会话上下文 (身份服务校验)
//! - [`require_admin`] - 管理面板认证中间件

pub mod admin;
pub mod host;
pub mod jwt;
pub mod middleware;

pub use host::HostSession;
pub use jwt::{AdminSession, Claims, JwtConfig, JwtError, JwtService};
pub use middleware::{AdminSessionExt, require_admin, require_permission};
