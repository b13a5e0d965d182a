//! 人脸识别服务客户端
//!
//! 把照片 URL 交给外部视觉服务，取回结构化的人脸列表。
//! 识别结果 (face_id、bounding_box) 直接透传给主办方确认，
//! 本服务不校验 face_id 的跨图一致性。

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use shared::client::BoundingBox;

use crate::utils::{AppError, AppResult};

/// 一张照片上识别到的一张脸
///
/// `face_id` 由识别服务分配；同一人在不同照片上应共享同一 face_id。
#[derive(Debug, Clone, Deserialize)]
pub struct DetectedFace {
    pub face_id: String,
    pub bounding_box: BoundingBox,
}

/// 人脸识别服务接口
#[async_trait]
pub trait RecognitionClient: Send + Sync {
    /// 识别一张照片上的全部人脸
    async fn detect_faces(&self, image_url: &str) -> AppResult<Vec<DetectedFace>>;
}

/// HTTP 识别服务客户端
///
/// 请求体携带提示词和期望的 JSON Schema，响应必须是
/// `{ "faces": [ { "face_id", "bounding_box": { x, y, width, height } } ] }`，
/// 坐标为 0..=1 的分数值。
pub struct HttpRecognitionClient {
    client: reqwest::Client,
    api_url: String,
}

impl HttpRecognitionClient {
    pub fn new(api_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .unwrap_or_default();
        Self { client, api_url }
    }

    fn prompt(image_url: &str) -> String {
        format!(
            "Identify the faces in the image at {image_url}. \
             For each face you detect, provide: \
             1. A unique identifier for the face. \
             2. Its position as (x, y, width, height) with values between 0 and 1. \
             If you see the same face in different images, use the same identifier. \
             Detect every face in the image, including profile and partially visible faces."
        )
    }

    fn response_schema() -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "faces": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "face_id": { "type": "string" },
                            "bounding_box": {
                                "type": "object",
                                "properties": {
                                    "x": { "type": "number" },
                                    "y": { "type": "number" },
                                    "width": { "type": "number" },
                                    "height": { "type": "number" }
                                }
                            }
                        }
                    }
                }
            }
        })
    }
}

#[derive(Debug, Deserialize)]
struct DetectionResponse {
    #[serde(default)]
    faces: Vec<DetectedFace>,
}

#[async_trait]
impl RecognitionClient for HttpRecognitionClient {
    async fn detect_faces(&self, image_url: &str) -> AppResult<Vec<DetectedFace>> {
        let body = json!({
            "prompt": Self::prompt(image_url),
            "add_context_from_internet": false,
            "response_json_schema": Self::response_schema(),
        });

        let resp = self
            .client
            .post(&self.api_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Recognition service unreachable: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::upstream(format!(
                "Recognition service returned {}",
                resp.status()
            )));
        }

        let detection: DetectionResponse = resp
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid recognition response: {e}")))?;

        Ok(detection.faces)
    }
}
