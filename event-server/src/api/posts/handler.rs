//! Post Handlers
//!
//! 宾客发帖走开放接口 (身份就是 join 时拿到的 guest_id)；
//! 删帖只有活动主办方能做。点赞/收藏/评论是瞬态的，重启清零。

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use serde::Deserialize;

use crate::auth::HostSession;
use crate::core::ServerState;
use crate::db::models::{Post, PostType};
use crate::db::repository::{EventRepository, GuestUserRepository, PostRepository};
use crate::services::interactions::{Comment, InteractionSnapshot};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

use shared::client::PostCreateRequest;

fn parse_post_type(raw: &str) -> AppResult<PostType> {
    match raw {
        "photo" => Ok(PostType::Photo),
        "video" => Ok(PostType::Video),
        "text" => Ok(PostType::Text),
        "voice" => Ok(PostType::Voice),
        other => Err(AppError::validation(format!(
            "Unknown post type: {}",
            other
        ))),
    }
}

/// POST /api/posts - 宾客发帖
///
/// photo/video/voice 必带 media_url，text 必带 caption。
/// 宾客名以 join 时登记的为准，请求里的名字只作兜底。
pub async fn create_post(
    State(state): State<ServerState>,
    Json(req): Json<PostCreateRequest>,
) -> AppResult<Json<Post>> {
    let post_type = parse_post_type(&req.post_type)?;

    validate_required_text(&req.guest_name, "guest_name", MAX_NAME_LEN)?;
    validate_optional_text(req.caption.as_deref(), "caption", MAX_NOTE_LEN)?;
    validate_optional_text(req.media_url.as_deref(), "media_url", MAX_URL_LEN)?;
    validate_optional_text(req.moment_type.as_deref(), "moment_type", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(req.filter.as_deref(), "filter", MAX_SHORT_TEXT_LEN)?;

    match post_type {
        PostType::Photo | PostType::Video | PostType::Voice => {
            if req.media_url.as_deref().map_or(true, |u| u.trim().is_empty()) {
                return Err(AppError::validation(format!(
                    "{} posts require media_url",
                    req.post_type
                )));
            }
        }
        PostType::Text => {
            if req.caption.as_deref().map_or(true, |c| c.trim().is_empty()) {
                return Err(AppError::validation("Text posts require a caption"));
            }
        }
    }

    let events = EventRepository::new(state.get_db());
    let event = events
        .find_by_id(&req.event_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {}", req.event_id)))?;
    let event_id = event
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Event record missing id"))?;

    // Registered guest name wins over whatever the client sent
    let guests = GuestUserRepository::new(state.get_db());
    let guest_name = match guests
        .find_one(&event_id.to_string(), &req.guest_id)
        .await?
    {
        Some(guest) => guest.name,
        None => req.guest_name.trim().to_string(),
    };

    let posts = PostRepository::new(state.get_db());
    let created = posts
        .create(Post {
            id: None,
            event_id,
            post_type,
            media_url: req.media_url,
            caption: req.caption,
            guest_name,
            guest_id: req.guest_id,
            moment_type: req.moment_type,
            filter: req.filter,
            created_date: Utc::now(),
        })
        .await?;

    tracing::info!(
        event = %req.event_id,
        post_type = %req.post_type,
        "Post created"
    );

    Ok(Json(created))
}

/// DELETE /api/posts/{id} - 删帖 (只限活动主办方)
pub async fn delete_post(
    State(state): State<ServerState>,
    session: HostSession,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let posts = PostRepository::new(state.get_db());
    let post = posts
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Post {}", id)))?;

    let events = EventRepository::new(state.get_db());
    let event = events
        .find_by_id(&post.event_id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found("Event for this post"))?;

    if event.owner_email != session.email {
        return Err(AppError::forbidden("Only the event owner can delete posts"));
    }

    posts.delete(&id).await?;
    if let Some(post_id) = post.id {
        state.interactions.remove_post(&post_id.to_string());
    }

    tracing::info!(post = %id, owner = %session.email, "Post deleted");

    Ok(Json(serde_json::json!({ "deleted": true })))
}

// =============================================================================
// Transient interactions
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct GuestRef {
    pub guest_id: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub guest_id: String,
    pub guest_name: String,
    pub text: String,
}

/// 互动接口共用：确认帖子存在并返回规范化的 "post:id" 键
async fn post_key(state: &ServerState, id: &str) -> AppResult<String> {
    let posts = PostRepository::new(state.get_db());
    let post = posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Post {}", id)))?;
    Ok(post
        .id
        .map(|rid| rid.to_string())
        .unwrap_or_else(|| id.to_string()))
}

/// POST /api/posts/{id}/like - 点赞 (幂等)
pub async fn like(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<GuestRef>,
) -> AppResult<Json<InteractionSnapshot>> {
    let key = post_key(&state, &id).await?;
    state.interactions.like(&key, &req.guest_id);
    Ok(Json(state.interactions.snapshot(&key, &req.guest_id)))
}

/// DELETE /api/posts/{id}/like - 取消点赞
pub async fn unlike(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<GuestRef>,
) -> AppResult<Json<InteractionSnapshot>> {
    let key = post_key(&state, &id).await?;
    state.interactions.unlike(&key, &req.guest_id);
    Ok(Json(state.interactions.snapshot(&key, &req.guest_id)))
}

/// POST /api/posts/{id}/save - 收藏 (幂等)
pub async fn save(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<GuestRef>,
) -> AppResult<Json<InteractionSnapshot>> {
    let key = post_key(&state, &id).await?;
    state.interactions.save(&key, &req.guest_id);
    Ok(Json(state.interactions.snapshot(&key, &req.guest_id)))
}

/// DELETE /api/posts/{id}/save - 取消收藏
pub async fn unsave(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<GuestRef>,
) -> AppResult<Json<InteractionSnapshot>> {
    let key = post_key(&state, &id).await?;
    state.interactions.unsave(&key, &req.guest_id);
    Ok(Json(state.interactions.snapshot(&key, &req.guest_id)))
}

/// POST /api/posts/{id}/comments - 发评论
pub async fn add_comment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> AppResult<Json<Comment>> {
    validate_required_text(&req.guest_name, "guest_name", MAX_NAME_LEN)?;
    validate_required_text(&req.text, "text", MAX_NOTE_LEN)?;

    let key = post_key(&state, &id).await?;
    let comment = state.interactions.add_comment(
        &key,
        req.guest_name.trim().to_string(),
        req.text.trim().to_string(),
    );
    Ok(Json(comment))
}

/// GET /api/posts/{id}/comments - 评论列表
pub async fn list_comments(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Comment>>> {
    let key = post_key(&state, &id).await?;
    Ok(Json(state.interactions.snapshot(&key, "").comments))
}

/// GET /api/posts/{id}/interactions?guest_id= - 互动快照
pub async fn interactions(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(req): Query<GuestRef>,
) -> AppResult<Json<InteractionSnapshot>> {
    let key = post_key(&state, &id).await?;
    Ok(Json(state.interactions.snapshot(&key, &req.guest_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_type_parsing_is_strict() {
        assert_eq!(parse_post_type("photo").unwrap(), PostType::Photo);
        assert_eq!(parse_post_type("voice").unwrap(), PostType::Voice);
        assert!(parse_post_type("Photo").is_err());
        assert!(parse_post_type("gif").is_err());
    }
}
