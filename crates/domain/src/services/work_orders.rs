use staffing_core::{StaffingError, StaffingResult};
use std::sync::Arc;
use tracing::info;

use crate::entities::{NewWorkOrder, WorkOrder, WorkOrderStatus};
use crate::repositories::WorkOrderRepository;

/// 工单记录的查询、创建与满员标记
pub struct WorkOrderService {
    work_orders: Arc<dyn WorkOrderRepository>,
}

impl WorkOrderService {
    pub fn new(work_orders: Arc<dyn WorkOrderRepository>) -> Self {
        Self { work_orders }
    }

    pub async fn list(&self) -> StaffingResult<Vec<WorkOrder>> {
        self.work_orders.list().await
    }

    /// OPEN 状态的工单，按开始时间升序
    pub async fn list_open(&self) -> StaffingResult<Vec<WorkOrder>> {
        self.work_orders.list_by_status(WorkOrderStatus::Open).await
    }

    pub async fn get(&self, id: i64) -> StaffingResult<WorkOrder> {
        self.work_orders
            .get(id)
            .await?
            .ok_or(StaffingError::WorkOrderNotFound { id })
    }

    /// 指定场地时，`org_id` 以场地所属组织为准
    pub async fn create(&self, mut work_order: NewWorkOrder) -> StaffingResult<WorkOrder> {
        work_order.role_name = work_order.role_name.trim().to_string();
        if work_order.role_name.is_empty() {
            return Err(StaffingError::invalid_argument("roleName 不能为空"));
        }
        if work_order.headcount < 1 {
            return Err(StaffingError::invalid_argument("headcount 必须大于0"));
        }
        if work_order.duration_mins < 1 {
            return Err(StaffingError::invalid_argument("durationMins 必须大于0"));
        }
        if !work_order.budget.is_finite() || work_order.budget < 0.0 {
            return Err(StaffingError::invalid_argument("budget 不能为负数"));
        }

        match work_order.site_id {
            Some(site_id) => {
                let site = self.work_orders.get_site(site_id).await?.ok_or_else(|| {
                    StaffingError::invalid_argument(format!("siteId {site_id} 不存在"))
                })?;
                work_order.org_id = site.org_id;
            }
            None if work_order.org_id <= 0 => {
                return Err(StaffingError::invalid_argument(
                    "未指定 siteId 时必须提供 orgId",
                ));
            }
            None => {}
        }

        let created = self.work_orders.create(&work_order).await?;
        info!(
            "创建工单 {}: 角色 {}，人数 {}",
            created.id, created.role_name, created.headcount
        );
        Ok(created)
    }

    pub async fn mark_filled(&self, id: i64) -> StaffingResult<WorkOrder> {
        let updated = self
            .work_orders
            .update_status(id, WorkOrderStatus::Filled)
            .await?;
        info!("工单 {} 已标记为满员", id);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::NewSite;
    use crate::testing::{sample_work_order, InMemoryStore};
    use chrono::Utc;

    fn new_work_order(role: &str) -> NewWorkOrder {
        NewWorkOrder {
            org_id: 3,
            site_id: None,
            role_name: role.to_string(),
            headcount: 2,
            start: Utc::now(),
            duration_mins: 240,
            recurring_rule: None,
            budget: 800.0,
            status: WorkOrderStatus::Open,
        }
    }

    #[tokio::test]
    async fn test_create_aligns_org_with_site() {
        let store = Arc::new(InMemoryStore::default());
        let site = store
            .create_site(&NewSite {
                org_id: 9,
                name: "Powai".to_string(),
                address: "Hiranandani".to_string(),
                lat: None,
                lng: None,
            })
            .await
            .unwrap();
        let service = WorkOrderService::new(store);

        let mut input = new_work_order(" driver ");
        input.site_id = Some(site.id);
        let created = service.create(input).await.unwrap();
        assert_eq!(created.org_id, 9);
        assert_eq!(created.role_name, "driver");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let store = Arc::new(InMemoryStore::default());
        let service = WorkOrderService::new(store);

        let mut missing_site = new_work_order("maid");
        missing_site.site_id = Some(404);
        let mut no_org = new_work_order("maid");
        no_org.org_id = 0;
        let mut no_headcount = new_work_order("maid");
        no_headcount.headcount = 0;

        for input in [new_work_order("  "), missing_site, no_org, no_headcount] {
            let err = service.create(input).await.unwrap_err();
            assert!(matches!(err, StaffingError::InvalidArgument(_)));
        }
    }

    #[tokio::test]
    async fn test_open_listing_and_filled() {
        let store = Arc::new(InMemoryStore::default());
        store.put_work_order(sample_work_order(1, "maid"));
        let mut draft = sample_work_order(2, "maid");
        draft.status = WorkOrderStatus::Draft;
        store.put_work_order(draft);
        let service = WorkOrderService::new(store);

        let open: Vec<i64> = service.list_open().await.unwrap().iter().map(|w| w.id).collect();
        assert_eq!(open, vec![1]);

        let filled = service.mark_filled(1).await.unwrap();
        assert_eq!(filled.status, WorkOrderStatus::Filled);
        assert!(service.list_open().await.unwrap().is_empty());

        let err = service.mark_filled(99).await.unwrap_err();
        assert!(matches!(err, StaffingError::WorkOrderNotFound { id: 99 }));
        let err = service.get(99).await.unwrap_err();
        assert!(matches!(err, StaffingError::WorkOrderNotFound { id: 99 }));
    }
}
