//! 端到端：照片/语音上传、内容去重、媒体分发

mod common;

use std::io::Cursor;

use http::StatusCode;
use image::{DynamicImage, Rgb, RgbImage};

const BOUNDARY: &str = "festa-test-boundary";

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 64])
    });
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match filename {
            Some(f) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{f}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

#[tokio::test]
async fn photo_upload_composes_and_serves_jpeg() {
    let server = common::spawn().await;
    let png = png_bytes(2400, 1200);

    let (content_type, body) = multipart_body(&[
        ("file", Some("shot.png"), &png),
        ("facing", None, b"back"),
        ("aspect_ratio", None, b"square"),
    ]);

    let (status, _, bytes) = server
        .raw("POST", "/api/image/upload", None, Some(&content_type), Some(body))
        .await;
    assert_eq!(status, StatusCode::OK);
    let upload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    let filename = upload["filename"].as_str().unwrap();
    assert!(filename.ends_with(".jpg"));
    // Long edge clamped to 1920, then square-cropped
    assert_eq!(upload["width"], 960);
    assert_eq!(upload["height"], 960);
    let url = upload["url"].as_str().unwrap().to_string();
    assert_eq!(url, format!("/api/media/{filename}"));

    // The composed JPEG is served back
    let (status, headers, served) = server.raw("GET", &url, None, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["content-type"], "image/jpeg");
    let decoded = image::load_from_memory(&served).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (960, 960));
}

#[tokio::test]
async fn duplicate_photo_upload_reuses_the_stored_file() {
    let server = common::spawn().await;
    let png = png_bytes(640, 480);

    let (content_type, body) = multipart_body(&[("file", Some("a.png"), &png)]);
    let (_, _, first) = server
        .raw(
            "POST",
            "/api/image/upload",
            None,
            Some(&content_type),
            Some(body.clone()),
        )
        .await;
    let first: serde_json::Value = serde_json::from_slice(&first).unwrap();

    let (_, _, second) = server
        .raw("POST", "/api/image/upload", None, Some(&content_type), Some(body))
        .await;
    let second: serde_json::Value = serde_json::from_slice(&second).unwrap();

    // Same content hashes to the same stored file
    assert_eq!(first["filename"], second["filename"]);
}

#[tokio::test]
async fn photo_upload_rejects_junk_and_missing_file() {
    let server = common::spawn().await;

    let (content_type, body) = multipart_body(&[("file", Some("x.png"), b"not an image")]);
    let (status, _, _) = server
        .raw("POST", "/api/image/upload", None, Some(&content_type), Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (content_type, body) = multipart_body(&[("facing", None, b"front")]);
    let (status, _, _) = server
        .raw("POST", "/api/image/upload", None, Some(&content_type), Some(body))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn voice_upload_round_trip() {
    let server = common::spawn().await;
    let clip = vec![0x52u8; 2048];

    let (content_type, body) = multipart_body(&[("file", Some("memo.mp3"), &clip)]);
    let (status, _, bytes) = server
        .raw(
            "POST",
            "/api/audio/upload",
            None,
            Some(&content_type),
            Some(body),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let upload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(upload["filename"].as_str().unwrap().ends_with(".mp3"));

    let url = upload["url"].as_str().unwrap().to_string();
    let (status, headers, served) = server.raw("GET", &url, None, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        headers["content-type"]
            .to_str()
            .unwrap()
            .starts_with("audio/")
    );
    assert_eq!(served, clip);

    // Unsupported extension is rejected
    let (content_type, body) = multipart_body(&[("file", Some("memo.exe"), &clip)]);
    let (status, _, _) = server
        .raw(
            "POST",
            "/api/audio/upload",
            None,
            Some(&content_type),
            Some(body),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn media_serving_blocks_path_traversal() {
    let server = common::spawn().await;

    let (status, _, _) = server
        .raw("GET", "/api/media/..%2Fsecrets.txt", None, None, None)
        .await;
    // Either rejected outright or simply not found, never served
    assert!(
        status == StatusCode::BAD_REQUEST || status == StatusCode::NOT_FOUND,
        "unexpected status {status}"
    );

    let (status, _, _) = server
        .raw("GET", "/api/media/missing.jpg", None, None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
