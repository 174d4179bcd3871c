use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use staffing_core::{DatabaseConfig, StaffingError, StaffingResult};
use staffing_domain::repositories::{
    AssignmentRepository, OfferRepository, ShiftRepository, WorkOrderRepository, WorkerDirectory,
};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::sqlite::{
    SqliteAssignmentRepository, SqliteOfferRepository, SqliteShiftRepository,
    SqliteWorkOrderRepository, SqliteWorkerRepository,
};

/// 文件库的目录不会被 SQLite 自动创建
fn ensure_parent_dir(url: &str) -> StaffingResult<()> {
    let path = url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or(path);

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                StaffingError::Database(format!("创建数据库目录失败 {}: {}", parent.display(), e))
            })?;
        }
    }
    Ok(())
}

/// SQLite 连接池与仓储工厂
pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    pub async fn new(config: &DatabaseConfig) -> StaffingResult<Self> {
        let in_memory = config.url.contains(":memory:");
        if !in_memory {
            ensure_parent_dir(&config.url)?;
        }

        let mut options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(config.busy_timeout_seconds));
        if !in_memory {
            options = options.journal_mode(SqliteJournalMode::Wal);
        }

        // 内存库每个连接都是独立的数据库
        let max_connections = if in_memory { 1 } else { config.max_connections };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(config.min_connections.min(max_connections))
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
            .idle_timeout(if in_memory {
                None
            } else {
                Some(Duration::from_secs(config.idle_timeout_seconds))
            })
            .max_lifetime(if in_memory {
                None
            } else {
                Some(Duration::from_secs(1800))
            })
            .connect_with(options)
            .await?;

        info!(
            "数据库连接池已建立: {} (最大连接数 {})",
            config.url, max_connections
        );

        Ok(Self { pool })
    }

    /// 已完成迁移的单连接内存库
    pub async fn in_memory() -> StaffingResult<Self> {
        let config = DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            ..DatabaseConfig::default()
        };
        let manager = Self::new(&config).await?;
        manager.migrate().await?;
        Ok(manager)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> StaffingResult<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        info!("数据库迁移完成");
        Ok(())
    }

    pub async fn health_check(&self) -> StaffingResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn work_order_repository(&self) -> Arc<dyn WorkOrderRepository> {
        Arc::new(SqliteWorkOrderRepository::new(self.pool.clone()))
    }

    pub fn worker_directory(&self) -> Arc<dyn WorkerDirectory> {
        Arc::new(SqliteWorkerRepository::new(self.pool.clone()))
    }

    pub fn offer_repository(&self) -> Arc<dyn OfferRepository> {
        Arc::new(SqliteOfferRepository::new(self.pool.clone()))
    }

    pub fn assignment_repository(&self) -> Arc<dyn AssignmentRepository> {
        Arc::new(SqliteAssignmentRepository::new(self.pool.clone()))
    }

    pub fn shift_repository(&self) -> Arc<dyn ShiftRepository> {
        Arc::new(SqliteShiftRepository::new(self.pool.clone()))
    }
}
