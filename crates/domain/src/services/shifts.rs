use chrono::Utc;
use staffing_core::StaffingResult;
use std::sync::Arc;
use tracing::{debug, info};

use crate::entities::{Shift, ShiftCheckpoint, Worker, WorkerShift};
use crate::repositories::ShiftRepository;
use crate::value_objects::GeoPoint;

/// 班次生命周期与考勤记录
///
/// `PLANNED --签到--> IN_PROGRESS --签退--> COMPLETED`，两次转换都允许重复调用：
/// 重复签到只补齐为空的签到坐标，重复签退总是以最新坐标覆盖签退坐标。
/// 未签到直接签退是允许的，之后补签到会把班次转为 IN_PROGRESS 并记录开始时间。
pub struct ShiftService {
    shifts: Arc<dyn ShiftRepository>,
}

impl ShiftService {
    pub fn new(shifts: Arc<dyn ShiftRepository>) -> Self {
        Self { shifts }
    }

    pub async fn list(&self) -> StaffingResult<Vec<Shift>> {
        self.shifts.list().await
    }

    pub async fn check_in(
        &self,
        shift_id: i64,
        point: Option<GeoPoint>,
    ) -> StaffingResult<ShiftCheckpoint> {
        let checkpoint = self.shifts.check_in(shift_id, Utc::now(), point).await?;

        if checkpoint.transitioned {
            info!("班次 {} 已签到", shift_id);
        } else {
            debug!(
                "班次 {} 重复签到，当前状态 {}",
                shift_id, checkpoint.shift.status
            );
        }

        Ok(checkpoint)
    }

    pub async fn check_out(
        &self,
        shift_id: i64,
        point: Option<GeoPoint>,
    ) -> StaffingResult<ShiftCheckpoint> {
        let checkpoint = self.shifts.check_out(shift_id, Utc::now(), point).await?;

        if checkpoint.transitioned {
            info!("班次 {} 已签退", shift_id);
        } else {
            debug!("班次 {} 重复签退", shift_id);
        }

        Ok(checkpoint)
    }

    /// 未关联工人档案的调用方得到空列表
    pub async fn list_for_worker(
        &self,
        caller: Option<&Worker>,
    ) -> StaffingResult<Vec<WorkerShift>> {
        match caller {
            Some(worker) => self.shifts.list_for_worker(worker.id).await,
            None => Ok(Vec::new()),
        }
    }
}
