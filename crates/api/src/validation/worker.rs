use serde::Deserialize;
use staffing_domain::entities::{NewWorker, RateUnit};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateWorkerRequest {
    #[validate(range(min = 1, message = "userId 必须为正整数"))]
    pub user_id: Option<i64>,

    #[validate(length(min = 1, max = 100, message = "name 长度必须在 1 到 100 之间"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 20, message = "skills 最多 20 项"))]
    pub skills: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 20, message = "languages 最多 20 项"))]
    pub languages: Vec<String>,

    #[validate(range(min = 0.0, message = "baseRate 不能为负数"))]
    pub base_rate: f64,

    pub rate_unit: Option<RateUnit>,

    #[validate(range(min = 0.0, max = 500.0, message = "radiusKm 必须在 0 到 500 之间"))]
    pub radius_km: f64,

    #[validate(range(min = 0.0, max = 5.0, message = "rating 必须在 0 到 5 之间"))]
    pub rating: Option<f64>,

    #[validate(range(min = 0, message = "strikes 不能为负数"))]
    pub strikes: Option<i32>,
}

impl From<CreateWorkerRequest> for NewWorker {
    fn from(request: CreateWorkerRequest) -> Self {
        NewWorker {
            user_id: request.user_id,
            name: request.name,
            skills: request.skills,
            languages: request.languages,
            base_rate: request.base_rate,
            rate_unit: request.rate_unit.unwrap_or(RateUnit::Hour),
            radius_km: request.radius_km,
            rating: request.rating.unwrap_or_default(),
            strikes: request.strikes.unwrap_or_default(),
        }
    }
}
