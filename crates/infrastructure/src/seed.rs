//! 演示数据

use chrono::Utc;
use sqlx::SqlitePool;
use staffing_core::StaffingResult;
use staffing_domain::entities::{NewSite, NewWorkOrder, NewWorker, RateUnit, WorkOrderStatus};
use staffing_domain::repositories::{WorkOrderRepository, WorkerDirectory};
use tracing::info;

use crate::database::{SqliteWorkOrderRepository, SqliteWorkerRepository};

/// 演示工人关联的登录身份
pub const DEMO_USER_ID: i64 = 1;

const DEMO_ORG_ID: i64 = 1;

/// 工单表为空时写入一个场地、一名保洁工人和一张开放的保洁工单
///
/// 返回是否实际写入了数据。
pub async fn seed_demo(pool: &SqlitePool) -> StaffingResult<bool> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM work_orders")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        info!("已存在 {} 张工单，跳过演示数据", existing);
        return Ok(false);
    }

    let work_orders = SqliteWorkOrderRepository::new(pool.clone());
    let workers = SqliteWorkerRepository::new(pool.clone());

    let site = work_orders
        .create_site(&NewSite {
            org_id: DEMO_ORG_ID,
            name: "Powai Residency".to_string(),
            address: "Hiranandani Gardens, Powai, Mumbai".to_string(),
            lat: Some(19.1176),
            lng: Some(72.9060),
        })
        .await?;

    let worker = match workers.find_by_user(DEMO_USER_ID).await? {
        Some(worker) => worker,
        None => {
            workers
                .create(&NewWorker {
                    user_id: Some(DEMO_USER_ID),
                    name: "Sunita Devi".to_string(),
                    skills: vec!["maid".to_string()],
                    languages: vec!["Hindi".to_string(), "English".to_string()],
                    base_rate: 150.0,
                    rate_unit: RateUnit::Hour,
                    radius_km: 5.0,
                    rating: 4.8,
                    strikes: 0,
                })
                .await?
        }
    };

    let work_order = work_orders
        .create(&NewWorkOrder {
            org_id: DEMO_ORG_ID,
            site_id: Some(site.id),
            role_name: "maid".to_string(),
            headcount: 1,
            start: Utc::now(),
            duration_mins: 480,
            recurring_rule: None,
            budget: 1200.0,
            status: WorkOrderStatus::Open,
        })
        .await?;

    info!(
        "演示数据已写入: 场地 {} 工人 {} 工单 {}",
        site.id, worker.id, work_order.id
    );
    Ok(true)
}
