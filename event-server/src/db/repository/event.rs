//! Event Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::{Event, EventCreate, EventUpdate};
use chrono::Utc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "event";

#[derive(Clone)]
pub struct EventRepository {
    base: BaseRepository,
}

impl EventRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all events, newest first
    pub async fn find_all(&self, limit: usize) -> RepoResult<Vec<Event>> {
        let events: Vec<Event> = self
            .base
            .db()
            .query("SELECT * FROM event ORDER BY created_date DESC LIMIT $limit")
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(events)
    }

    /// Find event by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Event>> {
        let event: Option<Event> = self.base.db().select(parse_id(TABLE, id)).await?;
        Ok(event)
    }

    /// Find event by join code (codes are stored uppercase)
    pub async fn find_by_code(&self, code: &str) -> RepoResult<Option<Event>> {
        let code = code.trim().to_uppercase();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM event WHERE code = $code LIMIT 1")
            .bind(("code", code))
            .await?;
        let events: Vec<Event> = result.take(0)?;
        Ok(events.into_iter().next())
    }

    /// Whether any event already uses this join code
    pub async fn code_exists(&self, code: &str) -> RepoResult<bool> {
        Ok(self.find_by_code(code).await?.is_some())
    }

    /// Find events owned by a host, newest first
    pub async fn find_by_owner(&self, owner_email: &str) -> RepoResult<Vec<Event>> {
        let owner = owner_email.to_string();
        let events: Vec<Event> = self
            .base
            .db()
            .query("SELECT * FROM event WHERE owner_email = $owner ORDER BY created_date DESC")
            .bind(("owner", owner))
            .await?
            .take(0)?;
        Ok(events)
    }

    /// Create a new event with a pre-generated join code
    pub async fn create(
        &self,
        data: EventCreate,
        code: String,
        owner_email: String,
    ) -> RepoResult<Event> {
        let event = Event {
            id: None,
            title: data.title,
            event_type: data.event_type,
            date: data.date,
            description: data.description,
            cover_image: data.cover_image,
            code,
            owner_email,
            created_date: Utc::now(),
        };

        let created: Option<Event> = self.base.db().create(TABLE).content(event).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create event".to_string()))
    }

    /// Update an event (partial merge, code and owner are immutable)
    pub async fn update(&self, id: &str, data: EventUpdate) -> RepoResult<Event> {
        let rid = parse_id(TABLE, id);
        let updated: Option<Event> = self.base.db().update(rid).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Event {} not found", id)))
    }

    /// Hard delete an event
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Event> = self.base.db().delete(parse_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
