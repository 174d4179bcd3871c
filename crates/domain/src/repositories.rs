//! 领域仓储抽象
//!
//! 生命周期中的多步操作（批量发送、接受、拒绝、签到、签退）各自作为一个
//! 原子单元由实现方保证，服务层只负责参数校验与归属检查。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use staffing_core::StaffingResult;

use crate::entities::{
    AcceptedOffer, Assignment, NewSite, NewWorkOrder, NewWorker, Offer, OfferBatch,
    SendOutcome, Shift, ShiftCheckpoint, Site, WorkOrder, WorkOrderStatus, Worker, WorkerOffer,
    WorkerShift,
};
use crate::value_objects::GeoPoint;

/// 工单存储
#[async_trait]
pub trait WorkOrderRepository: Send + Sync {
    async fn create(&self, work_order: &NewWorkOrder) -> StaffingResult<WorkOrder>;
    async fn get(&self, id: i64) -> StaffingResult<Option<WorkOrder>>;
    async fn list(&self) -> StaffingResult<Vec<WorkOrder>>;
    async fn list_by_status(&self, status: WorkOrderStatus) -> StaffingResult<Vec<WorkOrder>>;
    async fn update_status(&self, id: i64, status: WorkOrderStatus)
        -> StaffingResult<WorkOrder>;
    async fn create_site(&self, site: &NewSite) -> StaffingResult<Site>;
    async fn get_site(&self, id: i64) -> StaffingResult<Option<Site>>;
}

/// 工人档案目录
#[async_trait]
pub trait WorkerDirectory: Send + Sync {
    /// `user_id` 已被其他工人占用时返回 `WorkerAlreadyLinked`
    async fn create(&self, worker: &NewWorker) -> StaffingResult<Worker>;
    async fn get(&self, id: i64) -> StaffingResult<Option<Worker>>;
    async fn list(&self) -> StaffingResult<Vec<Worker>>;
    /// 按自然顺序（id 升序）返回具备该角色标签的工人
    async fn list_by_role(&self, role: &str) -> StaffingResult<Vec<Worker>>;
    /// 返回 `ids` 中实际存在的工人 id，顺序不保证
    async fn existing_ids(&self, ids: &[i64]) -> StaffingResult<Vec<i64>>;
    /// 登录身份到工人档案的映射，一个身份至多对应一个工人
    async fn find_by_user(&self, user_id: i64) -> StaffingResult<Option<Worker>>;
}

#[async_trait]
pub trait OfferRepository: Send + Sync {
    async fn list(&self) -> StaffingResult<Vec<Offer>>;
    async fn get(&self, id: i64) -> StaffingResult<Option<Offer>>;

    /// 在一个事务内为批次中的每个工人按条件插入 SENT 邀约
    async fn send_batch(&self, batch: &OfferBatch) -> StaffingResult<SendOutcome>;

    /// 原子地完成 SENT → ACCEPTED，并查找或创建唯一的派工与自动班次
    async fn accept(
        &self,
        id: i64,
        now: DateTime<Utc>,
        enforce_expiry: bool,
    ) -> StaffingResult<AcceptedOffer>;

    /// `strict` 为 false 时无条件置为 REJECTED
    async fn reject(&self, id: i64, strict: bool) -> StaffingResult<Offer>;

    async fn delete(&self, id: i64) -> StaffingResult<Offer>;

    /// 该工人的邀约，按创建时间倒序
    async fn list_for_worker(&self, worker_id: i64) -> StaffingResult<Vec<WorkerOffer>>;
}

#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn list(&self) -> StaffingResult<Vec<Assignment>>;
    async fn find_by_pair(
        &self,
        work_order_id: i64,
        worker_id: i64,
    ) -> StaffingResult<Option<Assignment>>;
}

#[async_trait]
pub trait ShiftRepository: Send + Sync {
    async fn list(&self) -> StaffingResult<Vec<Shift>>;
    async fn get(&self, id: i64) -> StaffingResult<Option<Shift>>;
    async fn list_for_assignment(&self, assignment_id: i64) -> StaffingResult<Vec<Shift>>;

    /// 尚未开始的班次 → IN_PROGRESS；签到坐标仅在为空时写入
    async fn check_in(
        &self,
        id: i64,
        now: DateTime<Utc>,
        point: Option<GeoPoint>,
    ) -> StaffingResult<ShiftCheckpoint>;

    /// → COMPLETED；签退坐标总是覆盖
    async fn check_out(
        &self,
        id: i64,
        now: DateTime<Utc>,
        point: Option<GeoPoint>,
    ) -> StaffingResult<ShiftCheckpoint>;

    /// 该工人所有派工下的班次，按计划开始时间升序
    async fn list_for_worker(&self, worker_id: i64) -> StaffingResult<Vec<WorkerShift>>;
}
