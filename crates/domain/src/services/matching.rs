use rand::Rng;
use staffing_core::{MatchingConfig, StaffingResult};
use std::sync::Arc;
use tracing::debug;

use crate::entities::{Candidate, WorkOrder, Worker};
use crate::repositories::{WorkOrderRepository, WorkerDirectory};

/// 工单与工人之间的距离估算
pub trait DistanceEstimator: Send + Sync {
    fn estimate_km(&self, work_order: &WorkOrder, worker: &Worker) -> f64;
}

/// 尚无真实地理计算时使用的占位距离，在 `[min, max)` 内均匀随机
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderDistance {
    min_km: f64,
    max_km: f64,
}

impl PlaceholderDistance {
    pub fn new((min_km, max_km): (f64, f64)) -> Self {
        Self { min_km, max_km }
    }
}

impl DistanceEstimator for PlaceholderDistance {
    fn estimate_km(&self, _work_order: &WorkOrder, _worker: &Worker) -> f64 {
        // TODO: 接入场地坐标与工人服务半径后改为真实地理距离
        rand::rng().random_range(self.min_km..self.max_km)
    }
}

/// 为工单挑选并排序候选工人
pub struct MatchingService {
    work_orders: Arc<dyn WorkOrderRepository>,
    workers: Arc<dyn WorkerDirectory>,
    distance: Arc<dyn DistanceEstimator>,
    config: MatchingConfig,
}

impl MatchingService {
    pub fn new(
        work_orders: Arc<dyn WorkOrderRepository>,
        workers: Arc<dyn WorkerDirectory>,
        config: MatchingConfig,
    ) -> Self {
        let distance = Arc::new(PlaceholderDistance::new(config.placeholder_distance_km));
        Self {
            work_orders,
            workers,
            distance,
            config,
        }
    }

    pub fn with_distance_estimator(mut self, distance: Arc<dyn DistanceEstimator>) -> Self {
        self.distance = distance;
        self
    }

    /// 加权得分，满分为权重之和（默认100）
    pub fn score(&self, worker: &Worker) -> f64 {
        let weights = &self.config.weights;
        let factors = &self.config.factors;

        let rating_fit = (worker.rating / self.config.rating_scale).clamp(0.0, 1.0);
        let strikes = f64::from(worker.strikes.max(0));
        let reliability = 1.0 - (strikes / f64::from(self.config.strike_cap)).min(1.0);

        weights.distance * factors.distance_fit
            + weights.availability * factors.availability
            + weights.rating * rating_fit
            + weights.price * factors.price_fit
            + weights.utilization * factors.utilization
            + weights.reliability * reliability
    }

    /// 工单不存在或无合格工人时返回空列表
    pub async fn recommend(&self, work_order_id: i64) -> StaffingResult<Vec<Candidate>> {
        let Some(work_order) = self.work_orders.get(work_order_id).await? else {
            debug!("匹配跳过，工单不存在: {}", work_order_id);
            return Ok(Vec::new());
        };

        let workers = self.workers.list_by_role(&work_order.role_name).await?;

        let mut candidates: Vec<Candidate> = workers
            .into_iter()
            .filter(|worker| worker.has_skill(&work_order.role_name))
            .map(|worker| Candidate {
                score: self.score(&worker),
                distance_km: self.distance.estimate_km(&work_order, &worker),
                worker,
            })
            .collect();

        // sort_by 为稳定排序，同分保持目录自然顺序
        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates.truncate(self.config.max_candidates);

        debug!(
            "工单 {} 匹配到 {} 名候选人 (角色: {})",
            work_order_id,
            candidates.len(),
            work_order.role_name
        );

        Ok(candidates)
    }
}
