//! User Plan Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::UserPlan;
use chrono::Utc;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "user_plan";

#[derive(Clone)]
pub struct UserPlanRepository {
    base: BaseRepository,
}

impl UserPlanRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find the plan of one host (at most one record per email)
    pub async fn find_by_email(&self, user_email: &str) -> RepoResult<Option<UserPlan>> {
        let email = user_email.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user_plan WHERE user_email = $email LIMIT 1")
            .bind(("email", email))
            .await?;
        let plans: Vec<UserPlan> = result.take(0)?;
        Ok(plans.into_iter().next())
    }

    /// Select a plan: update the existing record or create a fresh one
    pub async fn upsert(
        &self,
        user_email: &str,
        plan_type: String,
        status: String,
    ) -> RepoResult<UserPlan> {
        if let Some(existing) = self.find_by_email(user_email).await?
            && let Some(id) = existing.id
        {
            #[derive(Serialize)]
            struct PlanUpdate {
                plan_type: String,
                status: String,
            }

            let updated: Option<UserPlan> = self
                .base
                .db()
                .update(id)
                .merge(PlanUpdate { plan_type, status })
                .await?;
            return updated
                .ok_or_else(|| RepoError::Database("Failed to update plan".to_string()));
        }

        let plan = UserPlan {
            id: None,
            user_email: user_email.to_string(),
            plan_type,
            status,
            created_date: Utc::now(),
        };
        let created: Option<UserPlan> = self.base.db().create(TABLE).content(plan).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create plan".to_string()))
    }
}
