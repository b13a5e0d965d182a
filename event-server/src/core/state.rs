use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::services::{
    HttpIdentityProvider, HttpMailer, HttpRecognitionClient, IdentityProvider, InteractionStore,
    LogMailer, Mailer, RecognitionClient,
};

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是活动服务器的核心数据结构，持有所有服务的共享引用。
/// 使用 Arc 实现浅拷贝，所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 |
/// | jwt_service | Arc<JwtService> | 管理员 JWT 认证服务 |
/// | identity | Arc<dyn IdentityProvider> | 主办方身份服务 |
/// | recognition | Arc<dyn RecognitionClient> | 人脸识别服务 |
/// | mailer | Arc<dyn Mailer> | 邮件通知服务 |
/// | interactions | Arc<InteractionStore> | 瞬态互动状态 (点赞/评论) |
///
/// # 使用示例
///
/// ```ignore
/// // 获取数据库连接
/// let db = state.get_db();
///
/// // 调用身份服务
/// let principal = state.identity.me(bearer).await?;
/// ```
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// 管理员 JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// 主办方身份服务
    pub identity: Arc<dyn IdentityProvider>,
    /// 人脸识别服务
    pub recognition: Arc<dyn RecognitionClient>,
    /// 邮件通知服务
    pub mailer: Arc<dyn Mailer>,
    /// 瞬态互动状态 (点赞/收藏/评论，不落库)
    pub interactions: Arc<InteractionStore>,
}

impl ServerState {
    /// 创建服务器状态 (手动构造)
    ///
    /// 通常使用 [`initialize()`] 方法代替；测试中用于注入替身协作服务
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        identity: Arc<dyn IdentityProvider>,
        recognition: Arc<dyn RecognitionClient>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            identity,
            recognition,
            mailer,
            interactions: Arc::new(InteractionStore::new()),
        }
    }

    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库 (work_dir/database/festa.db)
    /// 3. 协作服务 (Identity, Recognition, Mailer, JWT)
    ///
    /// # Panics
    ///
    /// 数据库初始化失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        // 1. Initialize DB
        // Use work_dir/database/festa.db for database path
        let db_path = config.database_dir().join("festa.db");
        let db_path_str = db_path.to_string_lossy();

        let db_service = DbService::new(&db_path_str)
            .await
            .expect("Failed to initialize database");
        let db = db_service.db;

        // 2. Initialize collaborator services
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(HttpIdentityProvider::new(config.identity_server_url.clone()));
        let recognition: Arc<dyn RecognitionClient> =
            Arc::new(HttpRecognitionClient::new(config.recognition_api_url.clone()));
        let mailer: Arc<dyn Mailer> = match &config.email_api_url {
            Some(url) => Arc::new(HttpMailer::new(url.clone())),
            None => Arc::new(LogMailer),
        };
        let jwt_service = Arc::new(JwtService::default());

        Self::new(config.clone(), db, jwt_service, identity, recognition, mailer)
    }

    /// 获取数据库实例
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 获取 JWT 服务
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
