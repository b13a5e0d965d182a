//! Post Repository

use super::{BaseRepository, RepoError, RepoResult, parse_id};
use crate::db::models::Post;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "post";

#[derive(Clone)]
pub struct PostRepository {
    base: BaseRepository,
}

impl PostRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all posts, newest first (admin overview)
    pub async fn find_all(&self, limit: usize) -> RepoResult<Vec<Post>> {
        let posts: Vec<Post> = self
            .base
            .db()
            .query("SELECT * FROM post ORDER BY created_date DESC LIMIT $limit")
            .bind(("limit", limit))
            .await?
            .take(0)?;
        Ok(posts)
    }

    /// Find all posts of one event, newest first
    pub async fn find_by_event(&self, event_id: &str) -> RepoResult<Vec<Post>> {
        let event = parse_id("event", event_id).to_string();
        let posts: Vec<Post> = self
            .base
            .db()
            .query("SELECT * FROM post WHERE event_id = $event ORDER BY created_date DESC")
            .bind(("event", event))
            .await?
            .take(0)?;
        Ok(posts)
    }

    /// Find photo posts of one event (face scan input)
    pub async fn find_photos_by_event(&self, event_id: &str) -> RepoResult<Vec<Post>> {
        let event = parse_id("event", event_id).to_string();
        let posts: Vec<Post> = self
            .base
            .db()
            .query("SELECT * FROM post WHERE event_id = $event AND type = 'photo' ORDER BY created_date DESC")
            .bind(("event", event))
            .await?
            .take(0)?;
        Ok(posts)
    }

    /// Find post by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Post>> {
        let post: Option<Post> = self.base.db().select(parse_id(TABLE, id)).await?;
        Ok(post)
    }

    /// Create a new post
    pub async fn create(&self, post: Post) -> RepoResult<Post> {
        let created: Option<Post> = self.base.db().create(TABLE).content(post).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create post".to_string()))
    }

    /// Hard delete a post
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let deleted: Option<Post> = self.base.db().delete(parse_id(TABLE, id)).await?;
        Ok(deleted.is_some())
    }
}
