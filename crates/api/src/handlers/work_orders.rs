use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    error::{ApiError, ApiResult},
    identity::parse_id,
    response::{created, success, success_with_message},
    routes::AppState,
    validation::CreateWorkOrderRequest,
};

pub async fn list_work_orders(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let work_orders = state.work_orders.list().await?;
    Ok(success(work_orders))
}

/// 可供撮合的 OPEN 工单
pub async fn list_open_work_orders(
    State(state): State<AppState>,
) -> ApiResult<impl IntoResponse> {
    let work_orders = state.work_orders.list_open().await?;
    Ok(success(work_orders))
}

pub async fn get_work_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let work_order = state.work_orders.get(parse_id(&id)?).await?;
    Ok(success(work_order))
}

pub async fn create_work_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateWorkOrderRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    request.validate()?;

    let work_order = state.work_orders.create(request.into()).await?;
    Ok(created(work_order))
}

pub async fn mark_work_order_filled(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let work_order = state.work_orders.mark_filled(parse_id(&id)?).await?;
    Ok(success_with_message(work_order, "工单已标记为满员"))
}
