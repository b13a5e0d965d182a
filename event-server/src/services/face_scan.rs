//! 活动人脸扫描
//!
//! 扫描一个活动的全部照片帖，按识别服务分配的 face_id 聚合成分组，
//! 供主办方逐组命名确认。

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::{StreamExt, stream};
use shared::client::{FaceGroup, FaceInstance};
use tracing::warn;

use crate::db::repository::PostRepository;
use crate::services::RecognitionClient;
use crate::utils::AppResult;

/// 同时在途的识别请求上限
pub const SCAN_CONCURRENCY: usize = 4;

/// 扫描一个活动的全部照片并按 face_id 分组
///
/// - 只扫描 `type = photo` 的帖子
/// - 单张照片识别失败只告警跳过，不中断整个扫描
/// - 分组按 face_id 排序，结果稳定
pub async fn scan_event(
    posts: &PostRepository,
    recognition: Arc<dyn RecognitionClient>,
    event_id: &str,
) -> AppResult<Vec<FaceGroup>> {
    let photos = posts.find_photos_by_event(event_id).await?;

    let results: Vec<Option<(String, String, Vec<crate::services::DetectedFace>)>> =
        stream::iter(photos)
            .map(|post| {
                let recognition = recognition.clone();
                async move {
                    let post_id = post.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
                    let post_url = post.media_url.clone().unwrap_or_default();
                    if post_url.is_empty() {
                        return None;
                    }
                    match recognition.detect_faces(&post_url).await {
                        Ok(faces) => Some((post_id, post_url, faces)),
                        Err(e) => {
                            // Skip this photo, keep scanning the rest
                            warn!(post_id = %post_id, error = %e, "Face detection failed, skipping photo");
                            None
                        }
                    }
                }
            })
            .buffer_unordered(SCAN_CONCURRENCY)
            .collect()
            .await;

    // Group instances by face_id; BTreeMap keeps output order stable
    let mut groups: BTreeMap<String, FaceGroup> = BTreeMap::new();
    for (post_id, post_url, faces) in results.into_iter().flatten() {
        for face in faces {
            groups
                .entry(face.face_id.clone())
                .or_insert_with(|| FaceGroup {
                    face_id: face.face_id.clone(),
                    person_name: String::new(),
                    instances: Vec::new(),
                })
                .instances
                .push(FaceInstance {
                    post_id: post_id.clone(),
                    post_url: post_url.clone(),
                    bounding_box: face.bounding_box,
                });
        }
    }

    Ok(groups.into_values().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use crate::db::models::{Post, PostType};
    use crate::services::DetectedFace;
    use crate::utils::{AppError, AppResult};
    use async_trait::async_trait;
    use chrono::Utc;
    use shared::client::BoundingBox;
    use surrealdb::RecordId;

    struct StubRecognition;

    #[async_trait]
    impl RecognitionClient for StubRecognition {
        async fn detect_faces(&self, image_url: &str) -> AppResult<Vec<DetectedFace>> {
            if image_url.contains("broken") {
                return Err(AppError::upstream("detector offline"));
            }
            Ok(vec![DetectedFace {
                face_id: "face-1".to_string(),
                bounding_box: BoundingBox {
                    x: 0.1,
                    y: 0.2,
                    width: 0.3,
                    height: 0.4,
                },
            }])
        }
    }

    fn photo(event: &RecordId, url: &str) -> Post {
        Post {
            id: None,
            event_id: event.clone(),
            post_type: PostType::Photo,
            media_url: Some(url.to_string()),
            caption: None,
            guest_name: "Dana".to_string(),
            guest_id: "guest_1_abc".to_string(),
            moment_type: None,
            filter: None,
            created_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn scan_groups_by_face_id_and_skips_failures() {
        let db = DbService::new_memory().await.unwrap().db;
        let posts = PostRepository::new(db.clone());
        let event = RecordId::from_table_key("event", "e1");

        posts.create(photo(&event, "/api/media/a.jpg")).await.unwrap();
        posts.create(photo(&event, "/api/media/b.jpg")).await.unwrap();
        posts.create(photo(&event, "/api/media/broken.jpg")).await.unwrap();

        let groups = scan_event(&posts, Arc::new(StubRecognition), "event:e1")
            .await
            .unwrap();

        // One shared face_id across both readable photos, broken one skipped
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].face_id, "face-1");
        assert_eq!(groups[0].instances.len(), 2);
        assert!(groups[0].person_name.is_empty());
    }

    #[tokio::test]
    async fn scan_ignores_non_photo_posts() {
        let db = DbService::new_memory().await.unwrap().db;
        let posts = PostRepository::new(db.clone());
        let event = RecordId::from_table_key("event", "e2");

        let mut video = photo(&event, "/api/media/v.mp4");
        video.post_type = PostType::Video;
        posts.create(video).await.unwrap();

        let groups = scan_event(&posts, Arc::new(StubRecognition), "event:e2")
            .await
            .unwrap();
        assert!(groups.is_empty());
    }
}
