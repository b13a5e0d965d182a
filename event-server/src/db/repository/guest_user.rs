//! Guest User Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::GuestUser;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "guest_user";

#[derive(Clone)]
pub struct GuestUserRepository {
    base: BaseRepository,
}

impl GuestUserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find one guest by (event, guest_id) pair
    pub async fn find_one(&self, event_id: &str, guest_id: &str) -> RepoResult<Option<GuestUser>> {
        let event = parse_id("event", event_id).to_string();
        let guest = guest_id.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM guest_user WHERE event_id = $event AND guest_id = $guest LIMIT 1")
            .bind(("event", event))
            .bind(("guest", guest))
            .await?;
        let guests: Vec<GuestUser> = result.take(0)?;
        Ok(guests.into_iter().next())
    }

    /// Find all guests of one event
    pub async fn find_by_event(&self, event_id: &str) -> RepoResult<Vec<GuestUser>> {
        let event = parse_id("event", event_id).to_string();
        let guests: Vec<GuestUser> = self
            .base
            .db()
            .query("SELECT * FROM guest_user WHERE event_id = $event ORDER BY created_date DESC")
            .bind(("event", event))
            .await?
            .take(0)?;
        Ok(guests)
    }

    /// Create a new guest record
    pub async fn create(&self, guest: GuestUser) -> RepoResult<GuestUser> {
        let created: Option<GuestUser> = self.base.db().create(TABLE).content(guest).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create guest".to_string()))
    }
}
