//! 主办方身份服务客户端
//!
//! 主办方账号 (注册、密码、会话) 由独立的身份服务管理，
//! 本服务只持有它签发的 Bearer token 并换取身份信息。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::utils::{AppError, AppResult};

/// 身份服务返回的主办方信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub email: String,
    pub full_name: String,
    #[serde(default)]
    pub is_admin: bool,
}

/// 身份服务接口
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// 用 Bearer token 换取主办方身份
    async fn me(&self, token: &str) -> AppResult<Principal>;

    /// 列出全部注册主办方 (管理面板用)
    async fn list_users(&self) -> AppResult<Vec<Principal>>;
}

/// HTTP 身份服务客户端
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap_or_default();
        Self { client, base_url }
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn me(&self, token: &str) -> AppResult<Principal> {
        let url = format!("{}/api/auth/me", self.base_url);
        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Identity service unreachable: {e}")))?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::unauthorized());
        }
        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "Identity service returned {}",
                resp.status()
            )));
        }

        resp.json::<Principal>()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid identity response: {e}")))
    }

    async fn list_users(&self) -> AppResult<Vec<Principal>> {
        let url = format!("{}/api/users", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Identity service unreachable: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "Identity service returned {}",
                resp.status()
            )));
        }

        resp.json::<Vec<Principal>>()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid identity response: {e}")))
    }
}

/// 静态身份服务 (测试用)
///
/// token -> Principal 的固定映射，`list_users` 返回全部映射值。
#[derive(Default)]
pub struct StaticIdentityProvider {
    accounts: Vec<(String, Principal)>,
}

impl StaticIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(
        mut self,
        token: impl Into<String>,
        email: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        self.accounts.push((
            token.into(),
            Principal {
                email: email.into(),
                full_name: full_name.into(),
                is_admin: false,
            },
        ));
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn me(&self, token: &str) -> AppResult<Principal> {
        self.accounts
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, p)| p.clone())
            .ok_or(AppError::Unauthorized)
    }

    async fn list_users(&self) -> AppResult<Vec<Principal>> {
        Ok(self.accounts.iter().map(|(_, p)| p.clone()).collect())
    }
}
