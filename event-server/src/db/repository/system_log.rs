//! System Log Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::SystemLog;
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "system_log";

#[derive(Clone)]
pub struct SystemLogRepository {
    base: BaseRepository,
}

impl SystemLogRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Append an audit entry
    pub async fn log(
        &self,
        actor: impl Into<String>,
        action: impl Into<String>,
        target: impl Into<String>,
        details: serde_json::Value,
    ) -> RepoResult<SystemLog> {
        let entry = SystemLog {
            id: None,
            actor: actor.into(),
            action: action.into(),
            target: target.into(),
            details,
            created_date: Utc::now(),
        };
        let created: Option<SystemLog> = self.base.db().create(TABLE).content(entry).await?;
        created.ok_or_else(|| RepoError::Database("Failed to write system log".to_string()))
    }

    /// Most recent audit entries
    pub async fn find_recent(&self, limit: usize) -> RepoResult<Vec<SystemLog>> {
        let entries: Vec<SystemLog> = self
            .base
            .db()
            .query("SELECT * FROM system_log ORDER BY created_date DESC LIMIT $limit")
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(entries)
    }
}
