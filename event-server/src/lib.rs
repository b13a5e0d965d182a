//! Festa Event Server - 活动照片墙服务端
//!
//! # 架构概述
//!
//! 本模块是活动服务器的主入口，提供以下核心功能：
//!
//! - **活动与信息流** (`api`): 主办方建活动，宾客凭码加入并分享照片/视频/文字/语音
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储
//! - **认证** (`auth`): 管理面板 JWT + 主办方身份服务透传
//! - **协作服务** (`services`): 人脸识别、邮件通知、媒体合成
//!
//! # 模块结构
//!
//! ```text
//! event-server/src/
//! ├── core/          # 配置、状态、启动
//! ├── auth/          # JWT 认证、管理员目录、权限
//! ├── services/      # HTTP、身份、识别、邮件、媒体、互动
//! ├── api/           # HTTP 路由和处理器
//! ├── utils/         # 错误、日志、校验
//! └── db/            # 数据库层 (模型 + 仓储)
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{AdminSession, HostSession, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ______          __
   / ____/__  _____/ /_____ _
  / /_  / _ \/ ___/ __/ __ `/
 / __/ /  __(__  ) /_/ /_/ /
/_/    \___/____/\__/\__,_/
    "#
    );
}

/// 设置运行环境 (dotenv + 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env if present, real env vars win
    let _ = dotenv::dotenv();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}
