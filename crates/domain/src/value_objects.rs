use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use staffing_core::{StaffingError, StaffingResult};

/// 签到/签退时上报的坐标
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> StaffingResult<Self> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(StaffingError::invalid_argument(format!(
                "纬度超出范围: {lat}"
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(StaffingError::invalid_argument(format!(
                "经度超出范围: {lng}"
            )));
        }
        Ok(Self { lat, lng })
    }

    /// 经纬度必须同时提供或同时缺省
    pub fn from_parts(lat: Option<f64>, lng: Option<f64>) -> StaffingResult<Option<Self>> {
        match (lat, lng) {
            (Some(lat), Some(lng)) => Self::new(lat, lng).map(Some),
            (None, None) => Ok(None),
            _ => Err(StaffingError::invalid_argument(
                "lat 与 lng 必须同时提供",
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShiftWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ShiftWindow {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}
