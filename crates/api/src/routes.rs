use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use staffing_domain::repositories::AssignmentRepository;
use staffing_domain::services::{
    IdentityResolver, MatchingService, OfferService, ShiftService, WorkOrderService, WorkerService,
};
use std::sync::Arc;

use crate::handlers::{
    assignments::list_assignments,
    health::health_check,
    matching::recommend_workers,
    offers::{
        accept_my_offer, accept_offer, delete_offer, list_my_offers, list_offers, reject_my_offer,
        reject_offer, send_offers,
    },
    shifts::{check_in, check_out, list_my_shifts, list_shifts},
    work_orders::{
        create_work_order, get_work_order, list_open_work_orders, list_work_orders,
        mark_work_order_filled,
    },
    workers::{create_worker, get_worker, list_workers},
};

/// API应用状态
#[derive(Clone)]
pub struct AppState {
    pub work_orders: Arc<WorkOrderService>,
    pub workers: Arc<WorkerService>,
    pub matching: Arc<MatchingService>,
    pub offers: Arc<OfferService>,
    pub shifts: Arc<ShiftService>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub identity: Arc<IdentityResolver>,
}

/// 创建API路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 工单
        .route("/api/work-orders", get(list_work_orders).post(create_work_order))
        .route("/api/work-orders/open", get(list_open_work_orders))
        .route("/api/work-orders/{id}", get(get_work_order))
        .route("/api/work-orders/{id}/filled", patch(mark_work_order_filled))
        // 工人
        .route("/api/workers", get(list_workers).post(create_worker))
        .route("/api/workers/{id}", get(get_worker))
        // 撮合
        .route("/api/matching/{work_order_id}", get(recommend_workers))
        // 邀约
        .route("/api/offers", get(list_offers))
        .route("/api/offers/send", post(send_offers))
        .route("/api/offers/mine", get(list_my_offers))
        .route("/api/offers/mine/{id}/accept", patch(accept_my_offer))
        .route("/api/offers/mine/{id}/reject", patch(reject_my_offer))
        .route("/api/offers/{id}", delete(delete_offer))
        .route("/api/offers/{id}/accept", patch(accept_offer))
        .route("/api/offers/{id}/reject", patch(reject_offer))
        // 班次与考勤
        .route("/api/shifts", get(list_shifts))
        .route("/api/shifts/mine", get(list_my_shifts))
        .route("/api/shifts/{id}/check-in", post(check_in))
        .route("/api/shifts/{id}/check-out", post(check_out))
        // 派工
        .route("/api/assignments", get(list_assignments))
        .with_state(state)
}
