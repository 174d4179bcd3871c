use staffing_core::{StaffingError, StaffingResult};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::entities::{NewWorker, Worker};
use crate::repositories::WorkerDirectory;

/// 工人档案的查询与登记
pub struct WorkerService {
    workers: Arc<dyn WorkerDirectory>,
}

impl WorkerService {
    pub fn new(workers: Arc<dyn WorkerDirectory>) -> Self {
        Self { workers }
    }

    pub async fn list(&self) -> StaffingResult<Vec<Worker>> {
        self.workers.list().await
    }

    pub async fn get(&self, id: i64) -> StaffingResult<Worker> {
        self.workers
            .get(id)
            .await?
            .ok_or(StaffingError::WorkerNotFound { id })
    }

    /// 登记工人档案，技能与语言标签去重后保持原有顺序
    pub async fn create(&self, mut worker: NewWorker) -> StaffingResult<Worker> {
        worker.name = worker.name.trim().to_string();
        if worker.name.is_empty() {
            return Err(StaffingError::invalid_argument("name 不能为空"));
        }
        if !(0.0..=5.0).contains(&worker.rating) {
            return Err(StaffingError::invalid_argument("rating 必须在 0 到 5 之间"));
        }
        if worker.strikes < 0 {
            return Err(StaffingError::invalid_argument("strikes 不能为负数"));
        }
        if !worker.base_rate.is_finite() || worker.base_rate < 0.0 {
            return Err(StaffingError::invalid_argument("baseRate 不能为负数"));
        }
        if !worker.radius_km.is_finite() || worker.radius_km < 0.0 {
            return Err(StaffingError::invalid_argument("radiusKm 不能为负数"));
        }

        worker.skills = normalize_tags(worker.skills);
        worker.languages = normalize_tags(worker.languages);

        let created = self.workers.create(&worker).await?;
        info!("登记工人 {} ({})，技能 {:?}", created.id, created.name, created.skills);
        Ok(created)
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty() && seen.insert(tag.clone()))
        .collect()
}
