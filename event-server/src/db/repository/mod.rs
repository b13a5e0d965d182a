//! Repository Module
//!
//! Provides CRUD operations for SurrealDB tables.

pub mod event;
pub mod face_tag;
pub mod guest_user;
pub mod payment;
pub mod post;
pub mod system_log;
pub mod user_plan;

// Re-exports
pub use event::EventRepository;
pub use face_tag::FaceTagRepository;
pub use guest_user::GuestUserRepository;
pub use payment::PaymentRepository;
pub use post::PostRepository;
pub use system_log::SystemLogRepository;
pub use user_plan::UserPlanRepository;

use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// 记录内的引用字段 (event_id, post_id) 序列化为 "table:id" 字符串存储，
// 查询时以字符串比较；寻址单条记录时用 RecordId：
//   - 解析: parse_id("event", "event:abc") / parse_id("event", "abc")
//   - CRUD: db.select(id) / db.update(id) / db.delete(id) 直接使用 RecordId

/// Parse an id that may or may not carry its table prefix
pub fn parse_id(table: &str, id: &str) -> RecordId {
    match id.split_once(':') {
        Some((tb, key)) if tb == table => RecordId::from_table_key(table, key),
        _ => RecordId::from_table_key(table, id),
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
