//! # Staffing API
//!
//! 撮合与排班引擎的 REST 接口，基于 Axum 构建。
//!
//! ## API 端点
//!
//! ### 工单
//! - `GET /api/work-orders` - 全部工单，最新的在前
//! - `GET /api/work-orders/open` - OPEN 工单，按开始时间升序
//! - `POST /api/work-orders` - 创建工单
//! - `GET /api/work-orders/{id}` - 工单详情
//! - `PATCH /api/work-orders/{id}/filled` - 标记为满员
//!
//! ### 工人
//! - `GET /api/workers` - 全部工人档案
//! - `POST /api/workers` - 登记工人档案
//! - `GET /api/workers/{id}` - 工人档案详情
//!
//! ### 撮合
//! - `GET /api/matching/{workOrderId}` - 工单的推荐候选工人（最多5名）
//!
//! ### 邀约
//! - `GET /api/offers` - 全部邀约，最新的在前
//! - `POST /api/offers/send` - 批量发送邀约
//! - `PATCH /api/offers/{id}/accept` - 接受邀约，生成派工和班次
//! - `PATCH /api/offers/{id}/reject` - 拒绝邀约
//! - `DELETE /api/offers/{id}` - 删除邀约
//! - `GET /api/offers/mine` - 当前工人的邀约
//! - `PATCH /api/offers/mine/{id}/accept` - 当前工人接受自己的邀约
//! - `PATCH /api/offers/mine/{id}/reject` - 当前工人拒绝自己的邀约
//!
//! ### 班次
//! - `GET /api/shifts` - 全部班次
//! - `POST /api/shifts/{id}/check-in` - 签到，可附带 `{lat, lng}`
//! - `POST /api/shifts/{id}/check-out` - 签退，可附带 `{lat, lng}`
//! - `GET /api/shifts/mine` - 当前工人的班次
//!
//! ### 其他
//! - `GET /api/assignments` - 全部派工
//! - `GET /health` - 健康检查
//!
//! 带 `mine` 的端点要求网关转发 `X-User-Id` 请求头。
//!
//! ## 响应格式
//!
//! 成功:
//! ```json
//! { "success": true, "data": { ... }, "message": null, "timestamp": "2025-01-01T00:00:00Z" }
//! ```
//!
//! 失败:
//! ```json
//! { "error": { "message": "邀约 ID 7 不存在", "type": "OFFER_NOT_FOUND", "code": 404,
//!              "suggestions": ["..."], "timestamp": "2025-01-01T00:00:00Z" } }
//! ```

pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod validation;

use axum::Router;
use staffing_core::ApiConfig;
use tower::ServiceBuilder;

use middleware::{cors_layer, request_logging, timeout_layer, trace_layer};
pub use routes::{create_routes, AppState};

/// 创建完整的API应用
pub fn create_app(state: AppState, api_config: &ApiConfig) -> Router {
    create_routes(state).layer(
        ServiceBuilder::new()
            .layer(trace_layer())
            .layer(cors_layer(api_config))
            .layer(timeout_layer(api_config))
            .layer(axum::middleware::from_fn(request_logging)),
    )
}
