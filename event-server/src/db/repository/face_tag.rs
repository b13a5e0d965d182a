//! Face Tag Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::FaceTag;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "face_tag";

#[derive(Clone)]
pub struct FaceTagRepository {
    base: BaseRepository,
}

impl FaceTagRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all confirmed tags of one event
    pub async fn find_by_event(&self, event_id: &str) -> RepoResult<Vec<FaceTag>> {
        let event = parse_id("event", event_id).to_string();
        let tags: Vec<FaceTag> = self
            .base
            .db()
            .query("SELECT * FROM face_tag WHERE event_id = $event ORDER BY created_date DESC")
            .bind(("event", event))
            .await?
            .take(0)?;
        Ok(tags)
    }

    /// Find tags on one post
    pub async fn find_by_post(&self, post_id: &str) -> RepoResult<Vec<FaceTag>> {
        let post = parse_id("post", post_id).to_string();
        let tags: Vec<FaceTag> = self
            .base
            .db()
            .query("SELECT * FROM face_tag WHERE post_id = $post")
            .bind(("post", post))
            .await?
            .take(0)?;
        Ok(tags)
    }

    /// Create a confirmed face tag
    pub async fn create(&self, tag: FaceTag) -> RepoResult<FaceTag> {
        let created: Option<FaceTag> = self.base.db().create(TABLE).content(tag).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create face tag".to_string()))
    }
}
