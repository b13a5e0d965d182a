//! 媒体上传 API 模块
//!
//! # 路由列表
//!
//! | 路径 | 方法 | 说明 | 认证 |
//! |------|------|------|------|
//! | /api/image/upload | POST | 上传照片 (服务端合成) | 无 |
//! | /api/audio/upload | POST | 上传语音 | 无 |
//! | /api/media/{filename} | GET | 读取媒体文件 | 无 |

mod handler;

use axum::{
    Router, body::Bytes, extract::{Path, State}, response::IntoResponse, routing::post,
};
use http::header;

use crate::core::ServerState;

/// Serve media file response
enum MediaFileResponse {
    Ok(Bytes, String),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for MediaFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            MediaFileResponse::Ok(content, content_type) => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                content,
            )
                .into_response(),
            MediaFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            MediaFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// Serve an uploaded media file (photos and voice clips share one namespace)
async fn serve_media_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> MediaFileResponse {
    // Security check: prevent path traversal
    if filename.is_empty()
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        return MediaFileResponse::BadRequest("Invalid filename");
    }

    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();

    // Photos live in images/, voice clips in audio/
    for dir in [state.config.images_dir(), state.config.audio_dir()] {
        match tokio::fs::read(dir.join(&filename)).await {
            Ok(content) => return MediaFileResponse::Ok(content.into(), content_type),
            Err(_) => continue,
        }
    }

    MediaFileResponse::NotFound
}

/// Build upload router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/image/upload", post(handler::upload_photo))
        .route("/api/audio/upload", post(handler::upload_audio))
        .route(
            "/api/media/{filename}",
            axum::routing::get(serve_media_file),
        )
}
