use axum::{
    routing::{delete, get},
    Router,
};
use std::sync::Arc;

use elevator_domain::FloorRequestService;

use crate::handlers::{
    floor_requests::{
        delete_fulfilled_request, get_next_floor_to_stop, get_outstanding_requests,
        request_elevator,
    },
    health::health_check,
};

/// API应用状态
#[derive(Clone)]
pub struct AppState {
    pub floor_requests: Arc<dyn FloorRequestService>,
}

impl AppState {
    pub fn new(floor_requests: Arc<dyn FloorRequestService>) -> Self {
        Self { floor_requests }
    }
}

/// 创建API路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 楼层呼叫API
        .route(
            "/elevator-request",
            get(get_outstanding_requests).post(request_elevator),
        )
        .route("/elevator-request/next", get(get_next_floor_to_stop))
        .route(
            "/elevator-request/{floor_number}",
            delete(delete_fulfilled_request),
        )
        .with_state(state)
}
