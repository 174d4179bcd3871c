use chrono::{Duration, Utc};
use staffing_core::{OfferPolicyConfig, StaffingError, StaffingResult};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{info, warn};

use crate::entities::{AcceptedOffer, Offer, OfferBatch, SendOutcome, Worker, WorkerOffer};
use crate::repositories::{OfferRepository, WorkOrderRepository, WorkerDirectory};

/// 批量发送邀约的输入
#[derive(Debug, Clone, PartialEq)]
pub struct SendOffers {
    pub work_order_id: i64,
    pub worker_ids: Vec<i64>,
    pub expires_in_minutes: Option<u32>,
}

/// 邀约生命周期：发送、接受、拒绝、删除以及工人视角的操作
pub struct OfferService {
    offers: Arc<dyn OfferRepository>,
    work_orders: Arc<dyn WorkOrderRepository>,
    workers: Arc<dyn WorkerDirectory>,
    policy: OfferPolicyConfig,
}

impl OfferService {
    pub fn new(
        offers: Arc<dyn OfferRepository>,
        work_orders: Arc<dyn WorkOrderRepository>,
        workers: Arc<dyn WorkerDirectory>,
        policy: OfferPolicyConfig,
    ) -> Self {
        Self {
            offers,
            work_orders,
            workers,
            policy,
        }
    }

    pub async fn list(&self) -> StaffingResult<Vec<Offer>> {
        self.offers.list().await
    }

    /// 为工单批量创建 SENT 邀约
    ///
    /// 同批次重复的工人 id 只保留第一次出现；不存在的工人被忽略；
    /// 已持有该工单邀约的工人计入 `skipped`。
    pub async fn send(&self, request: SendOffers) -> StaffingResult<SendOutcome> {
        if request.worker_ids.is_empty() {
            return Err(StaffingError::invalid_argument("workerIds 不能为空"));
        }

        let expires_in = request
            .expires_in_minutes
            .unwrap_or(self.policy.default_expires_in_minutes);
        if expires_in == 0 || expires_in > self.policy.max_expires_in_minutes {
            return Err(StaffingError::invalid_argument(format!(
                "expiresInMinutes 必须位于 1..={}",
                self.policy.max_expires_in_minutes
            )));
        }

        if self.work_orders.get(request.work_order_id).await?.is_none() {
            return Err(StaffingError::WorkOrderNotFound {
                id: request.work_order_id,
            });
        }

        let mut seen = HashSet::new();
        let requested: Vec<i64> = request
            .worker_ids
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect();

        let existing: HashSet<i64> = self
            .workers
            .existing_ids(&requested)
            .await?
            .into_iter()
            .collect();
        let worker_ids: Vec<i64> = requested
            .into_iter()
            .filter(|id| existing.contains(id))
            .collect();

        if worker_ids.is_empty() {
            return Err(StaffingError::invalid_argument("没有可发送邀约的有效工人"));
        }

        let batch = OfferBatch {
            work_order_id: request.work_order_id,
            worker_ids,
            expires_at: Utc::now() + Duration::minutes(i64::from(expires_in)),
            resend_after_terminal: self.policy.resend_after_terminal,
        };

        let outcome = self.offers.send_batch(&batch).await?;
        info!(
            "工单 {} 发送邀约: 新建 {}，跳过 {}",
            batch.work_order_id, outcome.created, outcome.skipped
        );

        Ok(outcome)
    }

    pub async fn accept(&self, offer_id: i64) -> StaffingResult<AcceptedOffer> {
        let accepted = self
            .offers
            .accept(offer_id, Utc::now(), self.policy.enforce_expiry_on_accept)
            .await
            .inspect_err(|e| warn!("接受邀约 {} 失败: {}", offer_id, e))?;

        info!(
            "邀约 {} 已接受: 工单 {} 工人 {} → 派工 {} 班次 {}",
            offer_id,
            accepted.work_order.id,
            accepted.worker.id,
            accepted.assignment.id,
            accepted.shift.id
        );

        Ok(accepted)
    }

    pub async fn reject(&self, offer_id: i64) -> StaffingResult<Offer> {
        let offer = self
            .offers
            .reject(offer_id, self.policy.strict_reject)
            .await
            .inspect_err(|e| warn!("拒绝邀约 {} 失败: {}", offer_id, e))?;

        info!("邀约 {} 已拒绝", offer_id);
        Ok(offer)
    }

    pub async fn remove(&self, offer_id: i64) -> StaffingResult<Offer> {
        let offer = self.offers.delete(offer_id).await?;
        info!("邀约 {} 已删除", offer_id);
        Ok(offer)
    }

    /// 未关联工人档案的调用方得到空列表
    pub async fn list_for_worker(
        &self,
        caller: Option<&Worker>,
    ) -> StaffingResult<Vec<WorkerOffer>> {
        match caller {
            Some(worker) => self.offers.list_for_worker(worker.id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn accept_for_worker(
        &self,
        caller: Option<&Worker>,
        offer_id: i64,
    ) -> StaffingResult<AcceptedOffer> {
        self.ensure_owner(caller, offer_id).await?;
        self.accept(offer_id).await
    }

    pub async fn reject_for_worker(
        &self,
        caller: Option<&Worker>,
        offer_id: i64,
    ) -> StaffingResult<Offer> {
        self.ensure_owner(caller, offer_id).await?;
        self.reject(offer_id).await
    }

    // 邀约的 worker_id 创建后不再变化，归属检查无需与状态变更同处一个事务
    async fn ensure_owner(&self, caller: Option<&Worker>, offer_id: i64) -> StaffingResult<()> {
        let worker = caller.ok_or(StaffingError::WorkerProfileMissing)?;

        let offer = self
            .offers
            .get(offer_id)
            .await?
            .ok_or(StaffingError::OfferNotFound { id: offer_id })?;

        if offer.worker_id != worker.id {
            warn!(
                "工人 {} 试图操作不属于自己的邀约 {}",
                worker.id, offer_id
            );
            return Err(StaffingError::NotYourOffer { offer_id });
        }

        Ok(())
    }
}
