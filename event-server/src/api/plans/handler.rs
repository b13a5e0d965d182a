//! Plan Handlers
//!
//! 套餐目录是内置常量；选择套餐直接置为 active，
//! 付款审核流程独立于套餐记录。

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::HostSession;
use crate::core::ServerState;
use crate::db::models::{PLAN_CATALOG, UserPlan};
use crate::db::repository::UserPlanRepository;
use crate::utils::{AppError, AppResult};

/// 目录里的一个套餐
#[derive(Debug, Clone, Serialize)]
pub struct PlanOffer {
    pub id: String,
    pub price: i64,
}

/// GET /api/plans - 套餐目录
pub async fn catalog() -> Json<Vec<PlanOffer>> {
    let offers = PLAN_CATALOG
        .iter()
        .map(|(id, price)| PlanOffer {
            id: id.to_string(),
            price: *price,
        })
        .collect();
    Json(offers)
}

/// GET /api/plans/mine - 当前主办方的套餐 (没有记录返回 null)
pub async fn my_plan(
    State(state): State<ServerState>,
    session: HostSession,
) -> AppResult<Json<Option<UserPlan>>> {
    let repo = UserPlanRepository::new(state.get_db());
    let plan = repo.find_by_email(&session.email).await?;
    Ok(Json(plan))
}

#[derive(Debug, Deserialize)]
pub struct SelectPlanRequest {
    pub plan_type: String,
}

/// POST /api/plans - 选择套餐
pub async fn select_plan(
    State(state): State<ServerState>,
    session: HostSession,
    Json(req): Json<SelectPlanRequest>,
) -> AppResult<Json<UserPlan>> {
    if !PLAN_CATALOG.iter().any(|(id, _)| *id == req.plan_type) {
        return Err(AppError::validation(format!(
            "Unknown plan: {}",
            req.plan_type
        )));
    }

    let repo = UserPlanRepository::new(state.get_db());
    let plan = repo
        .upsert(&session.email, req.plan_type.clone(), "active".to_string())
        .await?;

    tracing::info!(host = %session.email, plan = %req.plan_type, "Plan selected");

    Ok(Json(plan))
}
