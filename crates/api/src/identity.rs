//! 调用方身份
//!
//! 认证由上游网关完成，网关通过 `X-User-Id` 请求头转发已认证的登录身份。

use axum::{extract::FromRequestParts, http::request::Parts};
use staffing_core::StaffingError;

use crate::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// 已认证的登录身份 id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerIdentity(pub i64);

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .ok_or_else(|| ApiError::Unauthorized("缺少 X-User-Id 请求头".to_string()))?;

        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|id| *id > 0)
            .map(CallerIdentity)
            .ok_or_else(|| ApiError::BadRequest("X-User-Id 请求头格式无效".to_string()))
    }
}

/// 解析路径中的整数 id
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| StaffingError::invalid_argument("Invalid id format").into())
}
