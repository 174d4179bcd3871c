use axum::{extract::State, response::IntoResponse};

use crate::{error::ApiResult, response::success, routes::AppState};

/// 获取派工列表
pub async fn list_assignments(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let assignments = state.assignments.list().await?;
    Ok(success(assignments))
}
