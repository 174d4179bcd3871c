use chrono::{DateTime, Utc};
use serde::Deserialize;
use staffing_domain::entities::{NewWorkOrder, WorkOrderStatus};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateWorkOrderRequest {
    #[validate(range(min = 1, message = "orgId 必须为正整数"))]
    pub org_id: Option<i64>,

    #[validate(range(min = 1, message = "siteId 必须为正整数"))]
    pub site_id: Option<i64>,

    #[validate(length(min = 1, max = 64, message = "roleName 长度必须在 1 到 64 之间"))]
    pub role_name: String,

    #[validate(range(min = 1, max = 1000, message = "headcount 必须在 1 到 1000 之间"))]
    pub headcount: i32,

    pub start: DateTime<Utc>,

    #[validate(range(min = 1, max = 10080, message = "durationMins 必须在 1 到 10080 之间"))]
    pub duration_mins: i32,

    #[validate(length(max = 255, message = "recurringRule 不能超过 255 个字符"))]
    pub recurring_rule: Option<String>,

    #[validate(range(min = 0.0, message = "budget 不能为负数"))]
    pub budget: f64,

    pub status: Option<WorkOrderStatus>,
}

impl From<CreateWorkOrderRequest> for NewWorkOrder {
    fn from(request: CreateWorkOrderRequest) -> Self {
        NewWorkOrder {
            org_id: request.org_id.unwrap_or_default(),
            site_id: request.site_id,
            role_name: request.role_name,
            headcount: request.headcount,
            start: request.start,
            duration_mins: request.duration_mins,
            recurring_rule: request.recurring_rule,
            budget: request.budget,
            status: request.status.unwrap_or(WorkOrderStatus::Open),
        }
    }
}
