//! Event Handlers
//!
//! 主办方建活动并拿到加入码；活动详情对拿到码的宾客开放。

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::HostSession;
use crate::core::ServerState;
use crate::db::models::{Event, EventCreate, EventUpdate};
use crate::db::repository::EventRepository;
use crate::services::join_code;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

fn validate_payload(
    title: Option<&str>,
    description: Option<&str>,
    cover_image: Option<&str>,
) -> AppResult<()> {
    if let Some(title) = title {
        validate_required_text(title, "title", MAX_NAME_LEN)?;
    }
    validate_optional_text(description, "description", MAX_NOTE_LEN)?;
    validate_optional_text(cover_image, "cover_image", MAX_URL_LEN)?;
    Ok(())
}

/// POST /api/events - 主办方建活动
///
/// 当前方案是一个主办方一个活动；已有活动时返回冲突，
/// 客户端引导进入已有活动而不是再建一个。
pub async fn create_event(
    State(state): State<ServerState>,
    session: HostSession,
    Json(data): Json<EventCreate>,
) -> AppResult<Json<Event>> {
    validate_payload(
        Some(&data.title),
        data.description.as_deref(),
        data.cover_image.as_deref(),
    )?;

    let repo = EventRepository::new(state.get_db());

    let existing = repo.find_by_owner(&session.email).await?;
    if !existing.is_empty() {
        return Err(AppError::conflict("You already have an event"));
    }

    let code = join_code::generate_join_code(&repo).await?;
    let event = repo.create(data, code, session.email.clone()).await?;

    tracing::info!(
        owner = %session.email,
        code = %event.code,
        "Event created"
    );

    Ok(Json(event))
}

/// GET /api/events/mine - 主办方名下的活动
pub async fn my_events(
    State(state): State<ServerState>,
    session: HostSession,
) -> AppResult<Json<Vec<Event>>> {
    let repo = EventRepository::new(state.get_db());
    let events = repo.find_by_owner(&session.email).await?;
    Ok(Json(events))
}

/// GET /api/events/by-code/{code} - 按加入码查活动
pub async fn event_by_code(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<Event>> {
    let repo = EventRepository::new(state.get_db());
    let event = repo
        .find_by_code(&code)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event with code {}", code.trim())))?;
    Ok(Json(event))
}

/// GET /api/events/{id} - 活动详情
pub async fn event_detail(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Event>> {
    let repo = EventRepository::new(state.get_db());
    let event = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {}", id)))?;
    Ok(Json(event))
}

/// PUT /api/events/{id} - 更新活动 (只限所有者；加入码和所有者不可改)
pub async fn update_event(
    State(state): State<ServerState>,
    session: HostSession,
    Path(id): Path<String>,
    Json(data): Json<EventUpdate>,
) -> AppResult<Json<Event>> {
    validate_payload(
        data.title.as_deref(),
        data.description.as_deref(),
        data.cover_image.as_deref(),
    )?;

    let repo = EventRepository::new(state.get_db());

    let event = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event {}", id)))?;

    if event.owner_email != session.email {
        return Err(AppError::forbidden("Only the event owner can update it"));
    }

    let updated = repo.update(&id, data).await?;
    Ok(Json(updated))
}
