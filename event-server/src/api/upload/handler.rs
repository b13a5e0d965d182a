//! Media Upload Handlers
//!
//! 照片在服务端统一合成 (压长边/裁剪/前摄镜像) 后落盘为 JPEG，
//! 并按内容哈希去重；语音只做格式和大小校验后原样落盘。

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::{fs, str::FromStr};
use uuid::Uuid;

use crate::core::ServerState;
use crate::services::media::{self, FacingMode};
use crate::utils::{AppError, AppResult};

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub file_id: String,
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    pub width: u32,
    pub height: u32,
    pub url: String,
}

/// Audio upload response
#[derive(Debug, Serialize)]
pub struct AudioUploadResponse {
    pub file_id: String,
    pub filename: String,
    pub size: usize,
    pub url: String,
}

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Find existing file by content hash
fn find_file_by_hash(images_dir: &Path, hash: &str) -> Option<String> {
    let hash_dir = images_dir.join("by_hash");
    if !hash_dir.exists() {
        return None;
    }

    // Hash directory uses first 2 chars as subdir (e.g., "ab/abc123...")
    let prefix = &hash[..2];
    let hash_path = hash_dir.join(format!("{}/{}", prefix, hash));

    if hash_path.exists() {
        // Read the symlink to get original filename
        if let Ok(target) = fs::read_link(&hash_path) {
            return target.file_name().map(|s| s.to_string_lossy().to_string());
        }
    }
    None
}

/// Create hash-based symlink for deduplication
fn create_hash_symlink(images_dir: &Path, hash: &str, filename: &str) -> AppResult<()> {
    let hash_dir = images_dir.join("by_hash");
    fs::create_dir_all(&hash_dir)
        .map_err(|e| AppError::internal(format!("Failed to create hash dir: {}", e)))?;

    let prefix = &hash[..2];
    let hash_subdir = hash_dir.join(prefix);
    fs::create_dir_all(&hash_subdir)
        .map_err(|e| AppError::internal(format!("Failed to create hash subdir: {}", e)))?;

    let hash_path = hash_subdir.join(hash);
    let target_path = PathBuf::from("../").join(filename);

    symlink::symlink_auto(&target_path, &hash_path)
        .map_err(|e| AppError::internal(format!("Failed to create symlink: {}", e)))?;

    Ok(())
}

/// 照片上传表单的解析结果
#[derive(Default)]
struct PhotoForm {
    data: Option<Vec<u8>>,
    original_name: Option<String>,
    facing: FacingMode,
    aspect_ratio: Option<f32>,
}

async fn read_photo_form(mut multipart: Multipart) -> AppResult<PhotoForm> {
    let mut form = PhotoForm::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "file" | "" => {
                form.original_name = field.file_name().map(|s| s.to_string());
                form.data = Some(field.bytes().await?.to_vec());
            }
            "facing" => {
                form.facing = FacingMode::from_str(field.text().await?.trim())?;
            }
            "aspect_ratio" => {
                form.aspect_ratio = Some(media::parse_aspect_ratio(field.text().await?.trim())?);
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

/// POST /api/image/upload - 照片上传
pub async fn upload_photo(
    State(state): State<ServerState>,
    multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let images_dir = state.config.images_dir();
    fs::create_dir_all(&images_dir)
        .map_err(|e| AppError::internal(format!("Failed to create images directory: {}", e)))?;

    let form = read_photo_form(multipart).await?;
    let data = form.data.ok_or_else(|| {
        AppError::validation("No 'file' field found. Field name must be 'file'")
    })?;
    let original_name = form
        .original_name
        .ok_or_else(|| AppError::validation("No filename provided in file field"))?;

    let composed = media::compose_photo(&data, form.facing, form.aspect_ratio)?;

    // Calculate hash for deduplication
    let file_hash = calculate_hash(&composed.jpeg);

    // Check if file already exists by hash
    if let Some(existing_filename) = find_file_by_hash(&images_dir, &file_hash) {
        tracing::info!(
            original_name = %original_name,
            existing_file = %existing_filename,
            "Duplicate photo detected, returning existing file"
        );

        let file_id = existing_filename
            .strip_suffix(".jpg")
            .map(|s| s.to_string())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let url = format!("/api/media/{}", existing_filename);
        return Ok(Json(UploadResponse {
            file_id,
            filename: existing_filename,
            original_name,
            size: composed.jpeg.len(),
            width: composed.width,
            height: composed.height,
            url,
        }));
    }

    // Generate unique filename for new file
    let file_id = Uuid::new_v4().to_string();
    let new_filename = format!("{}.jpg", file_id);
    let file_path = images_dir.join(&new_filename);

    fs::write(&file_path, &composed.jpeg)
        .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

    // Create hash-based symlink for deduplication
    create_hash_symlink(&images_dir, &file_hash, &new_filename)?;

    tracing::info!(
        original_name = %original_name,
        size = %composed.jpeg.len(),
        hash = %file_hash,
        "Photo uploaded successfully"
    );

    let url = format!("/api/media/{}", new_filename);
    Ok(Json(UploadResponse {
        file_id,
        filename: new_filename,
        original_name,
        size: composed.jpeg.len(),
        width: composed.width,
        height: composed.height,
        url,
    }))
}

/// POST /api/audio/upload - 语音上传
pub async fn upload_audio(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<AudioUploadResponse>> {
    let audio_dir = state.config.audio_dir();
    fs::create_dir_all(&audio_dir)
        .map_err(|e| AppError::internal(format!("Failed to create audio directory: {}", e)))?;

    let mut field_data: Option<Vec<u8>> = None;
    let mut original_filename = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|s| s.to_string());
        if name.as_deref() == Some("file") || name.as_deref() == Some("") {
            original_filename = field.file_name().map(|s| s.to_string());
            field_data = Some(field.bytes().await?.to_vec());
            break;
        }
    }

    let data = field_data.ok_or_else(|| {
        AppError::validation("No 'file' field found. Field name must be 'file'")
    })?;
    let filename = original_filename
        .ok_or_else(|| AppError::validation("No filename provided in file field"))?;

    let ext = media::validate_audio(&data, &filename)?;

    let file_id = Uuid::new_v4().to_string();
    let new_filename = format!("{}.{}", file_id, ext);
    let file_path = audio_dir.join(&new_filename);

    fs::write(&file_path, &data)
        .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

    tracing::info!(
        original_name = %filename,
        size = %data.len(),
        format = %ext,
        "Voice clip uploaded successfully"
    );

    let url = format!("/api/media/{}", new_filename);
    Ok(Json(AudioUploadResponse {
        file_id,
        filename: new_filename,
        size: data.len(),
        url,
    }))
}
