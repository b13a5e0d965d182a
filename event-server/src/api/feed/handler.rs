//! Feed Handlers
//!
//! 按加入码拉整场活动的动态流。流里混着照片、视频、文字和语音，
//! 统一按创建时间倒序。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{Event, Post};
use crate::db::repository::{EventRepository, PostRepository};
use crate::utils::{AppError, AppResult};

/// Feed payload: the event header plus its posts
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub event: Event,
    pub posts: Vec<Post>,
    /// 本场已出现过的时刻标签 (首次出现顺序)，客户端用来做筛选栏
    pub moment_types: Vec<String>,
}

/// GET /api/feed/{code} - 活动动态流
pub async fn feed(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<FeedResponse>> {
    let events = EventRepository::new(state.get_db());
    let event = events
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event with code {}", code.trim())))?;

    let event_id = event.id.as_ref().map(|id| id.to_string()).unwrap_or_default();

    let posts = PostRepository::new(state.get_db());
    let posts = posts.find_by_event(&event_id).await?;

    let mut moment_types: Vec<String> = Vec::new();
    for post in &posts {
        if let Some(moment) = post.moment_type.as_deref() {
            if !moment.is_empty() && !moment_types.iter().any(|m| m == moment) {
                moment_types.push(moment.to_string());
            }
        }
    }

    Ok(Json(FeedResponse {
        event,
        posts,
        moment_types,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct PostFilter {
    /// 按时刻标签过滤
    pub moment_type: Option<String>,
    /// 按帖子类型过滤 (reel 模式传 "video")
    #[serde(rename = "type")]
    pub post_type: Option<String>,
}

/// GET /api/events/{id}/posts - 按标签/类型过滤的帖子列表 (最新在前)
pub async fn event_posts(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(filter): Query<PostFilter>,
) -> AppResult<Json<Vec<Post>>> {
    let events = EventRepository::new(state.get_db());
    if events.find_by_id(&id).await?.is_none() {
        return Err(AppError::not_found(format!("Event {}", id)));
    }

    let posts = PostRepository::new(state.get_db());
    let mut posts = posts.find_by_event(&id).await?;

    if let Some(moment) = filter.moment_type.as_deref() {
        posts.retain(|p| p.moment_type.as_deref() == Some(moment));
    }
    if let Some(kind) = filter.post_type.as_deref() {
        posts.retain(|p| p.post_type.as_str() == kind);
    }

    Ok(Json(posts))
}

/// GET /api/events/{id}/posts/moment-types - 已出现的时刻标签
pub async fn event_moment_types(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<String>>> {
    let events = EventRepository::new(state.get_db());
    if events.find_by_id(&id).await?.is_none() {
        return Err(AppError::not_found(format!("Event {}", id)));
    }

    let posts = PostRepository::new(state.get_db());
    let posts = posts.find_by_event(&id).await?;

    let mut moment_types: Vec<String> = Vec::new();
    for post in &posts {
        if let Some(moment) = post.moment_type.as_deref() {
            if !moment.is_empty() && !moment_types.iter().any(|m| m == moment) {
                moment_types.push(moment.to_string());
            }
        }
    }

    Ok(Json(moment_types))
}
