//! Shared helpers for integration tests
//!
//! 内存数据库 + 替身协作服务，整条 HTTP 栈走 tower oneshot。

use std::sync::Arc;

use async_trait::async_trait;
use axum::{Router, body::Body, middleware};
use http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use event_server::ServerState;
use event_server::auth::{JwtService, require_admin};
use event_server::core::Config;
use event_server::db::DbService;
use event_server::services::{
    DetectedFace, LogMailer, RecognitionClient, StaticIdentityProvider, build_app,
};
use event_server::utils::AppResult;
use shared::client::BoundingBox;

/// 主办方替身 token (身份服务静态映射)
pub const HOST_TOKEN: &str = "token-dana";
pub const HOST_EMAIL: &str = "dana@example.com";

/// 第二个主办方，用于权限边界测试
pub const OTHER_TOKEN: &str = "token-noa";
pub const OTHER_EMAIL: &str = "noa@example.com";

/// 识别服务替身
///
/// 每张照片返回一张脸；URL 含 "pair" 的照片共享同一个 face_id，
/// 用来验证跨照片分组。
pub struct StubRecognition;

#[async_trait]
impl RecognitionClient for StubRecognition {
    async fn detect_faces(&self, image_url: &str) -> AppResult<Vec<DetectedFace>> {
        let face_id = if image_url.contains("pair") {
            "face-shared"
        } else {
            "face-solo"
        };
        Ok(vec![DetectedFace {
            face_id: face_id.to_string(),
            bounding_box: BoundingBox {
                x: 0.1,
                y: 0.1,
                width: 0.2,
                height: 0.3,
            },
        }])
    }
}

pub struct TestServer {
    pub app: Router,
    pub state: ServerState,
    _work_dir: tempfile::TempDir,
}

/// 组装一台测试服务器 (内存库、替身身份/识别/邮件)
pub async fn spawn() -> TestServer {
    let work_dir = tempfile::tempdir().expect("Failed to create temp work dir");
    let config = Config::with_overrides(work_dir.path().to_string_lossy(), 0);
    config
        .ensure_work_dir_structure()
        .expect("Failed to create work dir structure");

    let db = DbService::new_memory()
        .await
        .expect("Failed to start memory db")
        .db;

    let identity = Arc::new(
        StaticIdentityProvider::new()
            .with_user(HOST_TOKEN, HOST_EMAIL, "Dana Levi")
            .with_user(OTHER_TOKEN, OTHER_EMAIL, "Noa Cohen"),
    );

    let state = ServerState::new(
        config,
        db,
        Arc::new(JwtService::default()),
        identity,
        Arc::new(StubRecognition),
        Arc::new(LogMailer),
    );

    let app = build_app()
        .layer(middleware::from_fn_with_state(state.clone(), require_admin))
        .with_state(state.clone());

    TestServer {
        app,
        state,
        _work_dir: work_dir,
    }
}

impl TestServer {
    /// 发一个 JSON 请求，返回 (状态码, 响应 JSON)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, _, bytes) = self.raw(method, uri, token, None, body_bytes(body)).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    /// 发一个任意请求体的请求，返回 (状态码, 响应头, 响应字节)
    pub async fn raw(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        content_type: Option<&str>,
        body: Option<Vec<u8>>,
    ) -> (StatusCode, HeaderMap, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(ct) = content_type {
            builder = builder.header(header::CONTENT_TYPE, ct);
        } else if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }

        let request = builder
            .body(body.map(Body::from).unwrap_or_else(Body::empty))
            .expect("Failed to build request");

        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes()
            .to_vec();
        (status, headers, bytes)
    }

    /// 走真实登录接口换取管理员 JWT
    pub async fn admin_token(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .request(
                "POST",
                "/api/admin/login",
                None,
                Some(serde_json::json!({ "email": email, "password": password })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
        body["token"].as_str().expect("token in response").to_string()
    }
}

fn body_bytes(body: Option<Value>) -> Option<Vec<u8>> {
    body.map(|v| v.to_string().into_bytes())
}
