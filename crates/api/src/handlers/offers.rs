use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    error::{ApiError, ApiResult},
    identity::{parse_id, CallerIdentity},
    response::{success, success_with_message},
    routes::AppState,
    validation::SendOffersRequest,
};

/// 获取全部邀约
pub async fn list_offers(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let offers = state.offers.list().await?;
    Ok(success(offers))
}

/// 批量发送邀约
pub async fn send_offers(
    State(state): State<AppState>,
    payload: Result<Json<SendOffersRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    request.validate()?;

    let outcome = state.offers.send(request.into()).await?;
    let message = format!("新建 {} 条邀约，跳过 {} 名工人", outcome.created, outcome.skipped);
    Ok(success_with_message(outcome, message))
}

pub async fn accept_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let accepted = state.offers.accept(parse_id(&id)?).await?;
    Ok(success(accepted))
}

pub async fn reject_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let offer = state.offers.reject(parse_id(&id)?).await?;
    Ok(success(offer))
}

pub async fn delete_offer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let offer = state.offers.remove(parse_id(&id)?).await?;
    Ok(success_with_message(offer, "邀约已删除"))
}

/// 当前工人收到的邀约
pub async fn list_my_offers(
    State(state): State<AppState>,
    caller: CallerIdentity,
) -> ApiResult<impl IntoResponse> {
    let worker = state.identity.resolve(caller.0).await?;
    let offers = state.offers.list_for_worker(worker.as_ref()).await?;
    Ok(success(offers))
}

pub async fn accept_my_offer(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let offer_id = parse_id(&id)?;
    let worker = state.identity.resolve(caller.0).await?;
    let accepted = state
        .offers
        .accept_for_worker(worker.as_ref(), offer_id)
        .await?;
    Ok(success(accepted))
}

pub async fn reject_my_offer(
    State(state): State<AppState>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let offer_id = parse_id(&id)?;
    let worker = state.identity.resolve(caller.0).await?;
    let offer = state
        .offers
        .reject_for_worker(worker.as_ref(), offer_id)
        .await?;
    Ok(success(offer))
}
