//! 邮件通知服务
//!
//! 发送是 fire-and-forget：失败只告警，绝不影响业务流程。

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

/// 一封待发送的通知邮件
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// 邮件发送接口
#[async_trait]
pub trait Mailer: Send + Sync {
    /// 尝试发送一封邮件，失败不向上传播
    async fn send(&self, message: EmailMessage);
}

/// HTTP 邮件网关客户端
pub struct HttpMailer {
    client: reqwest::Client,
    api_url: String,
}

impl HttpMailer {
    pub fn new(api_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { client, api_url }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: EmailMessage) {
        let result = self.client.post(&self.api_url).json(&message).send().await;
        match result {
            Ok(resp) if resp.status().is_success() => {
                info!(to = %message.to, subject = %message.subject, "Notification email sent");
            }
            Ok(resp) => {
                warn!(to = %message.to, status = %resp.status(), "Email gateway rejected message");
            }
            Err(e) => {
                warn!(to = %message.to, error = %e, "Failed to reach email gateway");
            }
        }
    }
}

/// 仅记日志的邮件服务 (未配置 EMAIL_API_URL 时的默认实现)
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: EmailMessage) {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Email gateway not configured, logging notification only"
        );
    }
}
