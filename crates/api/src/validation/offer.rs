use serde::Deserialize;
use staffing_domain::services::SendOffers;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SendOffersRequest {
    #[validate(range(min = 1, message = "workOrderId 必须为正整数"))]
    pub work_order_id: i64,

    #[validate(
        length(min = 1, max = 500, message = "workerIds 数量必须在 1 到 500 之间"),
        custom(function = "validate_worker_ids")
    )]
    pub worker_ids: Vec<i64>,

    #[validate(range(min = 1, message = "expiresInMinutes 必须大于0"))]
    pub expires_in_minutes: Option<u32>,
}

fn validate_worker_ids(ids: &[i64]) -> Result<(), ValidationError> {
    if ids.iter().any(|id| *id <= 0) {
        return Err(ValidationError::new("worker_id").with_message("workerIds 只能包含正整数".into()));
    }
    Ok(())
}

impl From<SendOffersRequest> for SendOffers {
    fn from(request: SendOffersRequest) -> Self {
        SendOffers {
            work_order_id: request.work_order_id,
            worker_ids: request.worker_ids,
            expires_in_minutes: request.expires_in_minutes,
        }
    }
}
