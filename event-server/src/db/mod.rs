//! 数据库模块 - 嵌入式 SurrealDB 存储
//!
//! # 结构
//!
//! - [`DbService`] - 数据库连接和表结构初始化
//! - [`models`] - 数据模型
//! - [`repository`] - 各表的 CRUD 仓库

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "festa";
const DATABASE: &str = "main";

/// 数据库服务
///
/// 持有嵌入式 SurrealDB 连接，负责命名空间选择和表结构初始化。
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// 打开 RocksDB 持久化数据库
    pub async fn new(path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::setup(db).await
    }

    /// 打开内存数据库 (测试用)
    pub async fn new_memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::setup(db).await
    }

    async fn setup(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        define_schema(&db).await?;

        Ok(Self { db })
    }
}

/// 初始化表结构和索引
///
/// 表为 schemaless，索引只用于加速查询。
/// 加入码不加唯一索引：唯一性由生成时的 generate-check-retry 循环保证。
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE TABLE IF NOT EXISTS event SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS event_code ON TABLE event COLUMNS code;
        DEFINE INDEX IF NOT EXISTS event_owner ON TABLE event COLUMNS owner_email;

        DEFINE TABLE IF NOT EXISTS post SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS post_event ON TABLE post COLUMNS event_id;

        DEFINE TABLE IF NOT EXISTS guest_user SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS guest_event ON TABLE guest_user COLUMNS event_id, guest_id;

        DEFINE TABLE IF NOT EXISTS face_tag SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS face_tag_event ON TABLE face_tag COLUMNS event_id;

        DEFINE TABLE IF NOT EXISTS payment_transaction SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS payment_status ON TABLE payment_transaction COLUMNS status;

        DEFINE TABLE IF NOT EXISTS user_plan SCHEMALESS;
        DEFINE INDEX IF NOT EXISTS plan_owner ON TABLE user_plan COLUMNS user_email;

        DEFINE TABLE IF NOT EXISTS system_log SCHEMALESS;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?;

    Ok(())
}
