use std::path::PathBuf;

use crate::auth::JwtConfig;

/// 服务器配置 - 活动分享平台的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/festa | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | IDENTITY_SERVER_URL | http://localhost:3001 | 主办方身份服务地址 |
/// | RECOGNITION_API_URL | http://localhost:3002/v1/vision | 人脸识别服务地址 |
/// | EMAIL_API_URL | (未设置则仅记录日志) | 邮件发送服务地址 |
/// | ADMIN_NOTIFY_EMAIL | admin@beventx.com | 付款通知收件人 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/festa HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、上传文件、日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,

    // === 外部协作服务 ===
    /// 主办方身份服务 URL (Bearer token 校验)
    pub identity_server_url: String,
    /// 人脸识别服务 URL
    pub recognition_api_url: String,
    /// 邮件发送服务 URL (未设置时仅写日志)
    pub email_api_url: Option<String>,
    /// 付款通知收件人
    pub admin_notify_email: String,

    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
    /// 关闭超时时间 (毫秒)
    pub shutdown_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/festa".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),

            identity_server_url: std::env::var("IDENTITY_SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:3001".into()),
            recognition_api_url: std::env::var("RECOGNITION_API_URL")
                .unwrap_or_else(|_| "http://localhost:3002/v1/vision".into()),
            email_api_url: std::env::var("EMAIL_API_URL").ok(),
            admin_notify_email: std::env::var("ADMIN_NOTIFY_EMAIL")
                .unwrap_or_else(|_| "admin@beventx.com".into()),

            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            shutdown_timeout_ms: std::env::var("SHUTDOWN_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10000),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    // === 目录结构 ===

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 图片上传目录 (work_dir/uploads/images)
    pub fn images_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads").join("images")
    }

    /// 音频上传目录 (work_dir/uploads/audio)
    pub fn audio_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads").join("audio")
    }

    /// 日志目录 (work_dir/logs)
    pub fn logs_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("logs")
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.images_dir())?;
        std::fs::create_dir_all(self.images_dir().join("by_hash"))?;
        std::fs::create_dir_all(self.audio_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
