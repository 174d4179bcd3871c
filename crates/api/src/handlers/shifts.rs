use axum::{
    body::Bytes,
    extract::{Path, State},
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::ApiResult,
    identity::{parse_id, CallerIdentity},
    response::success,
    routes::AppState,
    validation::CheckpointRequest,
};

/// 请求体可以为空
fn parse_checkpoint(body: &Bytes) -> ApiResult<CheckpointRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CheckpointRequest::default());
    }

    let request: CheckpointRequest = serde_json::from_slice(body)?;
    request.validate()?;
    Ok(request)
}

/// 获取全部班次
pub async fn list_shifts(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let shifts = state.shifts.list().await?;
    Ok(success(shifts))
}

pub async fn check_in(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let shift_id = parse_id(&id)?;
    let point = parse_checkpoint(&body)?.point()?;
    let checkpoint = state.shifts.check_in(shift_id, point).await?;
    Ok(success(checkpoint))
}

pub async fn check_out(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<impl IntoResponse> {
    let shift_id = parse_id(&id)?;
    let point = parse_checkpoint(&body)?.point()?;
    let checkpoint = state.shifts.check_out(shift_id, point).await?;
    Ok(success(checkpoint))
}

/// 当前工人的班次，按计划开始时间升序
pub async fn list_my_shifts(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> ApiResult<impl IntoResponse> {
    let worker = state.identity.resolve(caller.0).await?;
    let shifts = state.shifts.list_for_worker(worker.as_ref()).await?;
    Ok(success(shifts))
}
