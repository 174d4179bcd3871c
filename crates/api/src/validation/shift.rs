use serde::Deserialize;
use staffing_core::StaffingResult;
use staffing_domain::value_objects::GeoPoint;
use validator::{Validate, ValidationError};

/// 签到/签退请求体，坐标可省略
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
#[validate(schema(function = "validate_coordinates_pair"))]
pub struct CheckpointRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "lat 必须位于 -90 到 90 之间"))]
    pub lat: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0, message = "lng 必须位于 -180 到 180 之间"))]
    pub lng: Option<f64>,
}

fn validate_coordinates_pair(request: &CheckpointRequest) -> Result<(), ValidationError> {
    if request.lat.is_some() != request.lng.is_some() {
        return Err(ValidationError::new("coordinates").with_message("lat 与 lng 必须同时提供".into()));
    }
    Ok(())
}

impl CheckpointRequest {
    pub fn point(&self) -> StaffingResult<Option<GeoPoint>> {
        GeoPoint::from_parts(self.lat, self.lng)
    }
}
