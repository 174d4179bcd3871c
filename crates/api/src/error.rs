use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use staffing_core::{ErrorKind, StaffingError};
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("业务错误: {0}")]
    Staffing(#[from] StaffingError),

    #[error("验证错误: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("请求参数错误: {0}")]
    BadRequest(String),

    #[error("未认证: {0}")]
    Unauthorized(String),

    #[error("内部服务器错误: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Staffing(err) => match err.kind() {
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
                ErrorKind::Forbidden => StatusCode::FORBIDDEN,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Validation(_) | ApiError::Serialization(_) | ApiError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn staffing_error_parts(err: &StaffingError) -> (String, &'static str, Vec<String>) {
    match err {
        StaffingError::WorkOrderNotFound { id } => (
            format!("工单 ID {} 不存在", id),
            "WORK_ORDER_NOT_FOUND",
            vec!["请检查工单ID是否正确".to_string()],
        ),
        StaffingError::WorkerNotFound { id } => (
            format!("工人 ID {} 不存在", id),
            "WORKER_NOT_FOUND",
            vec!["请检查工人ID是否正确".to_string()],
        ),
        StaffingError::OfferNotFound { id } => (
            format!("邀约 ID {} 不存在", id),
            "OFFER_NOT_FOUND",
            vec![
                "请检查邀约ID是否正确".to_string(),
                "使用 GET /api/offers 查看所有邀约".to_string(),
            ],
        ),
        StaffingError::ShiftNotFound { id } => (
            format!("班次 ID {} 不存在", id),
            "SHIFT_NOT_FOUND",
            vec![
                "请检查班次ID是否正确".to_string(),
                "使用 GET /api/shifts 查看所有班次".to_string(),
            ],
        ),
        StaffingError::OfferNotSent { .. } => (
            err.to_string(),
            "OFFER_NOT_SENT",
            vec!["只有 SENT 状态的邀约可以被接受或拒绝".to_string()],
        ),
        StaffingError::OfferExpired { .. } => (
            err.to_string(),
            "OFFER_EXPIRED",
            vec!["请联系发单方重新发送邀约".to_string()],
        ),
        StaffingError::InvalidArgument(msg) => (
            msg.clone(),
            "INVALID_ARGUMENT",
            vec!["请检查请求参数".to_string()],
        ),
        StaffingError::WorkerProfileMissing => (
            err.to_string(),
            "WORKER_PROFILE_MISSING",
            vec!["请先为当前账号创建工人档案".to_string()],
        ),
        StaffingError::NotYourOffer { .. } => (
            err.to_string(),
            "NOT_YOUR_OFFER",
            vec!["使用 GET /api/offers/mine 查看自己的邀约".to_string()],
        ),
        StaffingError::WorkerAlreadyLinked { .. } => (
            err.to_string(),
            "WORKER_ALREADY_LINKED",
            vec!["一个登录身份只能关联一个工人档案".to_string()],
        ),
        _ => (
            "系统内部错误".to_string(),
            "INTERNAL_ERROR",
            vec![
                "系统遇到内部错误，请稍后重试".to_string(),
                "查看 GET /health 检查系统状态".to_string(),
            ],
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_message, error_type, suggestions) = match &self {
            ApiError::Staffing(err) => staffing_error_parts(err),
            ApiError::Validation(errors) => {
                let mut details: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .map(|(field, errs)| {
                        let messages: Vec<String> = errs
                            .iter()
                            .map(|e| {
                                e.message
                                    .as_ref()
                                    .map(|m| m.to_string())
                                    .unwrap_or_else(|| e.code.to_string())
                            })
                            .collect();
                        format!("{}: {}", field, messages.join(", "))
                    })
                    .collect();
                details.sort();
                (
                    format!("请求参数验证失败: {}", details.join("; ")),
                    "VALIDATION_ERROR",
                    vec!["请检查请求参数是否符合要求".to_string()],
                )
            }
            ApiError::Serialization(err) => (
                "请求数据格式错误".to_string(),
                "SERIALIZATION_ERROR",
                vec![
                    "请检查JSON格式是否正确".to_string(),
                    format!("详细错误: {}", err),
                ],
            ),
            ApiError::BadRequest(msg) => (
                format!("请求参数错误: {}", msg),
                "BAD_REQUEST",
                vec!["请检查请求格式和参数".to_string()],
            ),
            ApiError::Unauthorized(msg) => (
                msg.clone(),
                "UNAUTHORIZED",
                vec!["请求必须携带 X-User-Id 请求头".to_string()],
            ),
            ApiError::Internal(_) => (
                "系统内部错误".to_string(),
                "INTERNAL_ERROR",
                vec!["系统遇到内部错误，请稍后重试".to_string()],
            ),
        };

        if status.is_server_error() {
            error!("请求处理失败: {}", self);
        }

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type,
                "code": status.as_u16(),
                "suggestions": suggestions,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }
        }));
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staffing_error_status_mapping() {
        let cases = vec![
            (StaffingError::OfferNotFound { id: 1 }, StatusCode::NOT_FOUND),
            (StaffingError::WorkOrderNotFound { id: 1 }, StatusCode::NOT_FOUND),
            (
                StaffingError::OfferNotSent {
                    id: 1,
                    status: "ACCEPTED".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (StaffingError::OfferExpired { id: 1 }, StatusCode::CONFLICT),
            (
                StaffingError::WorkerAlreadyLinked { user_id: 2 },
                StatusCode::CONFLICT,
            ),
            (
                StaffingError::invalid_argument("bad"),
                StatusCode::BAD_REQUEST,
            ),
            (StaffingError::WorkerProfileMissing, StatusCode::FORBIDDEN),
            (
                StaffingError::NotYourOffer { offer_id: 3 },
                StatusCode::FORBIDDEN,
            ),
            (
                StaffingError::Database("locked".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_transport_errors() {
        assert_eq!(
            ApiError::Unauthorized("缺少身份".to_string())
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::BadRequest("x".to_string()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_database_details_not_exposed() {
        let (message, error_type, _) =
            staffing_error_parts(&StaffingError::Database("disk I/O error".to_string()));
        assert_eq!(error_type, "INTERNAL_ERROR");
        assert!(!message.contains("disk"));
    }

    #[test]
    fn test_from_validation_errors() {
        let mut errors = validator::ValidationErrors::new();
        errors.add("workerIds", validator::ValidationError::new("length"));
        let api_error: ApiError = errors.into();
        assert!(matches!(api_error, ApiError::Validation(_)));
        assert_eq!(api_error.status(), StatusCode::BAD_REQUEST);
    }
}
