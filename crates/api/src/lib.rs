//! # Elevator API
//!
//! 电梯呼叫调度服务的REST API模块，把HTTP请求转换为对调度存储的调用。
//!
//! ## API 端点
//!
//! - `POST /elevator-request` - 在指定楼层呼叫电梯（请求体为JSON整数）
//! - `GET /elevator-request` - 获取待处理的楼层呼叫，没有时返回 204
//! - `GET /elevator-request/next?currentFloor=N&elevatorTravelDirection=Up` - 下一个停靠楼层，没有时返回 204
//! - `DELETE /elevator-request/{floor_number}` - 移除已完成的呼叫，不存在时返回 404
//! - `GET /health` - 健康检查
//!
//! 非正整数楼层号、无法解析的请求体以及未知的运行方向统一返回 400。
//!
//! ## 使用示例
//!
//! ```ignore
//! use std::sync::Arc;
//! use elevator_api::create_app;
//! use elevator_config::ApiConfig;
//! use elevator_domain::DispatchStore;
//!
//! let app = create_app(Arc::new(DispatchStore::new()), &ApiConfig::default());
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! ```
//!
//! ```bash
//! curl -X POST http://localhost:8080/elevator-request \
//!   -H "Content-Type: application/json" -d '5'
//! curl "http://localhost:8080/elevator-request/next?currentFloor=3&elevatorTravelDirection=Up"
//! curl -X DELETE http://localhost:8080/elevator-request/5
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;

use std::{sync::Arc, time::Duration};

use axum::Router;
use elevator_config::ApiConfig;
use elevator_domain::FloorRequestService;

pub use error::{ApiError, ApiResult};
pub use routes::{create_routes, AppState};

/// 创建带中间件的API应用
pub fn create_app(floor_requests: Arc<dyn FloorRequestService>, config: &ApiConfig) -> Router {
    let app = create_routes(AppState::new(floor_requests))
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .layer(middleware::timeout_layer(Duration::from_secs(
            config.request_timeout_seconds,
        )))
        .layer(middleware::trace_layer());

    if config.cors_enabled {
        app.layer(middleware::cors_layer())
    } else {
        app
    }
}
