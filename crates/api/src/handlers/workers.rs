use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    error::{ApiError, ApiResult},
    identity::parse_id,
    response::{created, success},
    routes::AppState,
    validation::CreateWorkerRequest,
};

pub async fn list_workers(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let workers = state.workers.list().await?;
    Ok(success(workers))
}

pub async fn get_worker(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let worker = state.workers.get(parse_id(&id)?).await?;
    Ok(success(worker))
}

/// 登记工人档案，`userId` 至多关联一个工人
pub async fn create_worker(
    State(state): State<AppState>,
    payload: Result<Json<CreateWorkerRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    request.validate()?;

    let worker = state.workers.create(request.into()).await?;
    Ok(created(worker))
}
