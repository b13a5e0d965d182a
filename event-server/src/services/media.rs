//! 媒体合成处理
//!
//! 拍摄上传的照片在服务端统一合成：
//! 长边压到 1920px、按目标宽高比居中裁剪、前摄镜像翻转，
//! 最终统一转成 92% 质量的 JPEG。

use std::io::Cursor;

use image::DynamicImage;
use image::imageops::FilterType;

use crate::utils::{AppError, AppResult};

/// 长边上限 (px)
pub const MAX_LONG_EDGE: u32 = 1920;

/// JPEG 压缩质量
pub const JPEG_QUALITY: u8 = 92;

/// 照片上传字节上限 (20MB)
pub const MAX_PHOTO_BYTES: usize = 20 * 1024 * 1024;

/// 语音上传字节上限 (16MB，约覆盖 60 秒无压缩音频)
pub const MAX_AUDIO_BYTES: usize = 16 * 1024 * 1024;

/// 语音时长上限 (秒，客户端录制时截断)
pub const MAX_VOICE_SECONDS: u32 = 60;

/// 支持的音频扩展名
pub const SUPPORTED_AUDIO_FORMATS: &[&str] = &["wav", "webm", "ogg", "mp3", "m4a"];

/// 摄像头朝向
///
/// 只有前摄照片做镜像翻转，与取景时的预览保持一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FacingMode {
    Front,
    #[default]
    Back,
}

impl std::str::FromStr for FacingMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "front" => Ok(Self::Front),
            "back" => Ok(Self::Back),
            other => Err(AppError::validation(format!(
                "Unknown facing mode '{other}', expected 'front' or 'back'"
            ))),
        }
    }
}

/// 解析宽高比：预设名或数值
///
/// | 预设 | 比例 |
/// |------|------|
/// | square | 1.0 |
/// | portrait | 0.8 |
/// | landscape | 1.77 |
pub fn parse_aspect_ratio(s: &str) -> AppResult<f32> {
    let ratio = match s {
        "square" => 1.0,
        "portrait" => 0.8,
        "landscape" => 1.77,
        other => other
            .parse::<f32>()
            .map_err(|_| AppError::validation(format!("Invalid aspect ratio '{other}'")))?,
    };
    if ratio <= 0.0 || !ratio.is_finite() {
        return Err(AppError::validation(format!(
            "Aspect ratio must be positive, got {ratio}"
        )));
    }
    Ok(ratio)
}

/// 合成结果
#[derive(Debug)]
pub struct ComposedPhoto {
    pub jpeg: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// 合成一张照片
///
/// 处理顺序：解码 → 压长边 → 按比例裁剪 → 前摄镜像 → JPEG 编码。
pub fn compose_photo(
    data: &[u8],
    facing: FacingMode,
    aspect_ratio: Option<f32>,
) -> AppResult<ComposedPhoto> {
    if data.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }
    if data.len() > MAX_PHOTO_BYTES {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_PHOTO_BYTES / 1024 / 1024
        )));
    }

    let mut img = image::load_from_memory(data)
        .map_err(|e| AppError::validation(format!("Invalid image: {}", e)))?;

    // Clamp long edge to 1920, preserving ratio
    if img.width().max(img.height()) > MAX_LONG_EDGE {
        img = img.resize(MAX_LONG_EDGE, MAX_LONG_EDGE, FilterType::Triangle);
    }

    // Center-crop toward the requested ratio
    if let Some(ratio) = aspect_ratio {
        img = crop_to_ratio(img, ratio);
    }

    // Mirror front-camera captures only
    if facing == FacingMode::Front {
        img = img.fliph();
    }

    let (width, height) = (img.width(), img.height());

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to encode image: {}", e)))?;
    }

    Ok(ComposedPhoto {
        jpeg: buffer,
        width,
        height,
    })
}

/// 按目标宽高比居中裁剪
fn crop_to_ratio(img: DynamicImage, ratio: f32) -> DynamicImage {
    let (w, h) = (img.width(), img.height());
    let current = w as f32 / h as f32;

    if (current - ratio).abs() < 0.01 {
        return img;
    }

    if current > ratio {
        // Too wide, trim the sides
        let new_w = ((h as f32 * ratio).round() as u32).clamp(1, w);
        let x = (w - new_w) / 2;
        img.crop_imm(x, 0, new_w, h)
    } else {
        // Too tall, trim top and bottom
        let new_h = ((w as f32 / ratio).round() as u32).clamp(1, h);
        let y = (h - new_h) / 2;
        img.crop_imm(0, y, w, new_h)
    }
}

/// 校验语音上传，返回规范化的扩展名
pub fn validate_audio(data: &[u8], filename: &str) -> AppResult<String> {
    if data.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }
    if data.len() > MAX_AUDIO_BYTES {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_AUDIO_BYTES / 1024 / 1024
        )));
    }

    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .ok_or_else(|| AppError::validation(format!("Invalid file extension for: {filename}")))?;

    if !SUPPORTED_AUDIO_FORMATS.contains(&ext.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported audio format '{}'. Supported: {}",
            ext,
            SUPPORTED_AUDIO_FORMATS.join(", ")
        )));
    }

    Ok(ext)
}
