use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

use crate::{error::ApiResult, identity::parse_id, response::success, routes::AppState};

/// 获取工单的推荐候选工人
pub async fn recommend_workers(
    State(state): State<AppState>,
    Path(work_order_id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let work_order_id = parse_id(&work_order_id)?;
    let candidates = state.matching.recommend(work_order_id).await?;
    Ok(success(candidates))
}
