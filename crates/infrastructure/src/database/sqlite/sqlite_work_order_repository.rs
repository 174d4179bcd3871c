use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use staffing_core::{StaffingError, StaffingResult};
use staffing_domain::entities::{NewSite, NewWorkOrder, Site, WorkOrder, WorkOrderStatus};
use staffing_domain::repositories::WorkOrderRepository;
use tracing::debug;

use crate::database::mapping::{MappingHelpers, SITE_COLUMNS, WORK_ORDER_COLUMNS};

pub struct SqliteWorkOrderRepository {
    pool: SqlitePool,
}

impl SqliteWorkOrderRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkOrderRepository for SqliteWorkOrderRepository {
    async fn create(&self, work_order: &NewWorkOrder) -> StaffingResult<WorkOrder> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO work_orders
                (org_id, site_id, role_name, headcount, start, duration_mins,
                 recurring_rule, budget, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {WORK_ORDER_COLUMNS}
            "#
        ))
        .bind(work_order.org_id)
        .bind(work_order.site_id)
        .bind(&work_order.role_name)
        .bind(work_order.headcount)
        .bind(work_order.start)
        .bind(work_order.duration_mins)
        .bind(&work_order.recurring_rule)
        .bind(work_order.budget)
        .bind(work_order.status)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        let created = MappingHelpers::row_to_work_order(&row)?;
        debug!("创建工单成功: {} (角色: {})", created.id, created.role_name);
        Ok(created)
    }

    async fn get(&self, id: i64) -> StaffingResult<Option<WorkOrder>> {
        let row = sqlx::query(&format!(
            "SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(MappingHelpers::row_to_work_order).transpose()
    }

    async fn list(&self) -> StaffingResult<Vec<WorkOrder>> {
        let rows = sqlx::query(&format!(
            "SELECT {WORK_ORDER_COLUMNS} FROM work_orders ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(MappingHelpers::row_to_work_order).collect()
    }

    async fn list_by_status(&self, status: WorkOrderStatus) -> StaffingResult<Vec<WorkOrder>> {
        let rows = sqlx::query(&format!(
            "SELECT {WORK_ORDER_COLUMNS} FROM work_orders WHERE status = $1 ORDER BY start ASC, id ASC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(MappingHelpers::row_to_work_order).collect()
    }

    async fn update_status(
        &self,
        id: i64,
        status: WorkOrderStatus,
    ) -> StaffingResult<WorkOrder> {
        let row = sqlx::query(&format!(
            "UPDATE work_orders SET status = $1 WHERE id = $2 RETURNING {WORK_ORDER_COLUMNS}"
        ))
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StaffingError::WorkOrderNotFound { id })?;

        debug!("工单 {} 状态更新为 {}", id, status);
        MappingHelpers::row_to_work_order(&row)
    }

    async fn create_site(&self, site: &NewSite) -> StaffingResult<Site> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO sites (org_id, name, address, lat, lng, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {SITE_COLUMNS}
            "#
        ))
        .bind(site.org_id)
        .bind(&site.name)
        .bind(&site.address)
        .bind(site.lat)
        .bind(site.lng)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        let created = MappingHelpers::row_to_site(&row)?;
        debug!("创建场地成功: {} ({})", created.id, created.name);
        Ok(created)
    }

    async fn get_site(&self, id: i64) -> StaffingResult<Option<Site>> {
        let row = sqlx::query(&format!("SELECT {SITE_COLUMNS} FROM sites WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(MappingHelpers::row_to_site).transpose()
    }
}
