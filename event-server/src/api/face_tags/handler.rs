//! Face Tagging Handlers
//!
//! 扫描是只读操作：分组结果直接返回给主办方，不落库。
//! 只有主办方命名确认后才写 face_tag 表。

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Utc;

use crate::auth::HostSession;
use crate::core::ServerState;
use crate::db::models::FaceTag;
use crate::db::repository::{EventRepository, FaceTagRepository, PostRepository, parse_id};
use crate::services::face_scan;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

use shared::client::{FaceConfirmRequest, FaceGroup};

/// 取活动并校验请求者就是主办方
async fn owned_event(
    state: &ServerState,
    session: &HostSession,
    event_id: &str,
) -> AppResult<crate::db::models::Event> {
    let events = EventRepository::new(state.get_db());
    let event = events
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {}", event_id)))?;
    if event.owner_email != session.email {
        return Err(AppError::forbidden(
            "Only the event owner can manage face tags",
        ));
    }
    Ok(event)
}

/// POST /api/events/{id}/face-scan - 扫描活动照片并按人脸分组
pub async fn scan(
    State(state): State<ServerState>,
    session: HostSession,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<FaceGroup>>> {
    let event = owned_event(&state, &session, &id).await?;
    let event_id = event.id.as_ref().map(|rid| rid.to_string()).unwrap_or(id);

    let posts = PostRepository::new(state.get_db());
    let groups = face_scan::scan_event(&posts, state.recognition.clone(), &event_id).await?;

    tracing::info!(
        event = %event_id,
        groups = groups.len(),
        "Face scan completed"
    );

    Ok(Json(groups))
}

/// POST /api/face-tags/confirm - 确认一个分组的姓名
///
/// 每个 instance 落一条 face_tag 记录；指向已删帖子的 instance
/// 跳过并告警，不让整批确认失败。
pub async fn confirm(
    State(state): State<ServerState>,
    session: HostSession,
    Json(req): Json<FaceConfirmRequest>,
) -> AppResult<Json<Vec<FaceTag>>> {
    validate_required_text(&req.person_name, "person_name", MAX_NAME_LEN)?;
    if req.instances.is_empty() {
        return Err(AppError::validation("At least one face instance is required"));
    }

    let event = owned_event(&state, &session, &req.event_id).await?;
    let event_id = event
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Event record missing id"))?;

    let posts = PostRepository::new(state.get_db());
    let tags = FaceTagRepository::new(state.get_db());
    let person_name = req.person_name.trim().to_string();

    let mut created = Vec::with_capacity(req.instances.len());
    for instance in req.instances {
        if posts.find_by_id(&instance.post_id).await?.is_none() {
            tracing::warn!(post = %instance.post_id, "Skipping face tag for missing post");
            continue;
        }
        let tag = tags
            .create(FaceTag {
                id: None,
                event_id: event_id.clone(),
                post_id: parse_id("post", &instance.post_id),
                face_id: req.face_id.clone(),
                person_name: person_name.clone(),
                bounding_box: instance.bounding_box,
                created_date: Utc::now(),
            })
            .await?;
        created.push(tag);
    }

    tracing::info!(
        event = %event_id,
        face = %req.face_id,
        person = %person_name,
        tags = created.len(),
        "Face group confirmed"
    );

    Ok(Json(created))
}

/// GET /api/events/{id}/face-tags - 已确认的标注
pub async fn list_tags(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<FaceTag>>> {
    let events = EventRepository::new(state.get_db());
    if events.find_by_id(&id).await?.is_none() {
        return Err(AppError::not_found(format!("Event {}", id)));
    }

    let tags = FaceTagRepository::new(state.get_db());
    let tags = tags.find_by_event(&id).await?;
    Ok(Json(tags))
}
