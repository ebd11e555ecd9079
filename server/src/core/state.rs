use std::sync::Arc;

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::membership::{Clock, SystemClock};
use crate::utils::AppError;

/// 服务器状态 - 持有所有共享资源的引用
///
/// 使用 Arc / 连接池实现浅拷贝，所有权成本极低。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | clock | 业务日期源（可注入，测试中固定日期） |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 业务日期源
    pub clock: Arc<dyn Clock>,
}

impl ServerState {
    pub fn new(config: Config, pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            pool,
            clock,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 确保工作目录结构存在
    /// 2. 打开数据库 (work_dir/database/gym.db) 并应用迁移
    /// 3. 构造业务时钟（配置的时区）
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("gym.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock::new(config.timezone));

        Ok(Self::new(config.clone(), db_service.pool, clock))
    }

    /// 当前业务日期
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}
