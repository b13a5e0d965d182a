//! Guest Session Handlers
//!
//! 宾客没有账号：第一次访问输入名字得到 guest_id，
//! 客户端按活动码保存，回访时凭 (code, guest_id) 恢复会话。

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use rand::Rng;
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{AVATAR_COLORS, GuestUser};
use crate::db::repository::{EventRepository, GuestUserRepository};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

use shared::client::{GuestIdentity, GuestJoinRequest};

/// 生成宾客标识: guest_<毫秒时间戳>_<9位随机小写字母数字>
fn generate_guest_id() -> String {
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();
    let suffix: String = (0..9)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("guest_{}_{}", Utc::now().timestamp_millis(), suffix)
}

/// 从调色板随机选一个头像颜色
fn pick_avatar_color() -> String {
    let mut rng = rand::thread_rng();
    AVATAR_COLORS[rng.gen_range(0..AVATAR_COLORS.len())].to_string()
}

/// POST /api/guests/join - 输名字加入活动
///
/// 活动码不存在返回 404。宾客记录写库失败只告警，
/// 身份照常发给客户端 (匿名分享的可用性优先)。
pub async fn join(
    State(state): State<ServerState>,
    Json(req): Json<GuestJoinRequest>,
) -> AppResult<Json<GuestIdentity>> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;

    let events = EventRepository::new(state.get_db());
    let event = events
        .find_by_code(&req.code)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event with code {}", req.code.trim())))?;

    let event_rid = event
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Event record missing id"))?;
    let event_id = event_rid.to_string();
    let guest_id = generate_guest_id();
    let avatar_color = pick_avatar_color();
    let name = req.name.trim().to_string();

    let guests = GuestUserRepository::new(state.get_db());
    let record = GuestUser {
        id: None,
        event_id: event_rid,
        guest_id: guest_id.clone(),
        name: name.clone(),
        avatar_color: avatar_color.clone(),
        created_date: Utc::now(),
    };
    if let Err(e) = guests.create(record).await {
        tracing::warn!(error = %e, code = %event.code, "Failed to persist guest record");
    }

    tracing::info!(code = %event.code, guest = %guest_id, "Guest joined event");

    Ok(Json(GuestIdentity {
        event_id,
        guest_id,
        name,
        avatar_color,
    }))
}

#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub code: String,
    pub guest_id: String,
}

/// GET /api/guests/session?code=&guest_id= - 回访会话恢复
///
/// 活动不存在或宾客记录不存在都返回 404；
/// 后者提示客户端重新走输名字流程。
pub async fn session(
    State(state): State<ServerState>,
    Query(query): Query<SessionQuery>,
) -> AppResult<Json<GuestIdentity>> {
    let events = EventRepository::new(state.get_db());
    let event = events
        .find_by_code(&query.code)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Event with code {}", query.code.trim())))?;

    let event_id = event.id.as_ref().map(|id| id.to_string()).unwrap_or_default();

    let guests = GuestUserRepository::new(state.get_db());
    let guest = guests
        .find_one(&event_id, &query.guest_id)
        .await?
        .ok_or_else(|| AppError::not_found("Guest session"))?;

    Ok(Json(GuestIdentity {
        event_id,
        guest_id: guest.guest_id,
        name: guest.name,
        avatar_color: guest.avatar_color,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guest_ids_have_expected_shape() {
        let id = generate_guest_id();
        let parts: Vec<&str> = id.splitn(3, '_').collect();
        assert_eq!(parts[0], "guest");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
        assert!(parts[2].chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn avatar_color_comes_from_palette() {
        for _ in 0..20 {
            let color = pick_avatar_color();
            assert!(AVATAR_COLORS.contains(&color.as_str()));
        }
    }
}
