use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use staffing_api::{create_app, AppState};
use staffing_core::AppConfig;
use staffing_domain::services::{
    IdentityResolver, MatchingService, OfferService, ShiftService, WorkOrderService, WorkerService,
};
use staffing_infrastructure::{seed_demo, DatabaseManager};
use tokio::net::TcpListener;
use tracing::info;

/// 主应用程序
pub struct Application {
    config: AppConfig,
    db: DatabaseManager,
}

impl Application {
    /// 连接数据库并执行迁移
    pub async fn new(config: AppConfig) -> Result<Self> {
        let db = DatabaseManager::new(&config.database)
            .await
            .with_context(|| format!("连接数据库失败: {}", config.database.url))?;
        db.migrate().await.context("执行数据库迁移失败")?;
        db.health_check().await.context("数据库健康检查失败")?;

        Ok(Self { config, db })
    }

    /// 写入演示数据，工单表非空时跳过
    pub async fn seed_demo(&self) -> Result<bool> {
        seed_demo(self.db.pool()).await.context("写入演示数据失败")
    }

    pub fn router(&self) -> Router {
        let db = &self.db;
        let state = AppState {
            work_orders: Arc::new(WorkOrderService::new(db.work_order_repository())),
            workers: Arc::new(WorkerService::new(db.worker_directory())),
            matching: Arc::new(MatchingService::new(
                db.work_order_repository(),
                db.worker_directory(),
                self.config.matching.clone(),
            )),
            offers: Arc::new(OfferService::new(
                db.offer_repository(),
                db.work_order_repository(),
                db.worker_directory(),
                self.config.offers.clone(),
            )),
            shifts: Arc::new(ShiftService::new(db.shift_repository())),
            assignments: db.assignment_repository(),
            identity: Arc::new(IdentityResolver::new(db.worker_directory())),
        };

        create_app(state, &self.config.api)
    }

    /// 启动HTTP服务，`shutdown` 完成后停止接收新连接并关闭连接池
    pub async fn run<F>(self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let bind_address = self.config.api.bind_address.clone();
        let listener = TcpListener::bind(&bind_address)
            .await
            .with_context(|| format!("绑定地址失败: {bind_address}"))?;
        info!("API服务器监听地址: {}", bind_address);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("API服务器运行失败")?;

        self.db.close().await;
        info!("数据库连接池已关闭");
        Ok(())
    }
}
