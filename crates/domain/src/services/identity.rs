use staffing_core::StaffingResult;
use std::sync::Arc;
use tracing::debug;

use crate::entities::Worker;
use crate::repositories::WorkerDirectory;

/// 将已认证的登录身份解析为至多一个工人档案
pub struct IdentityResolver {
    workers: Arc<dyn WorkerDirectory>,
}

impl IdentityResolver {
    pub fn new(workers: Arc<dyn WorkerDirectory>) -> Self {
        Self { workers }
    }

    pub async fn resolve(&self, user_id: i64) -> StaffingResult<Option<Worker>> {
        let worker = self.workers.find_by_user(user_id).await?;
        if worker.is_none() {
            debug!("登录身份 {} 未关联工人档案", user_id);
        }
        Ok(worker)
    }
}
