use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use elevator_errors::ElevatorError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("电梯调度错误: {0}")]
    Elevator(#[from] ElevatorError),

    #[error("请求参数错误: {0}")]
    BadRequest(String),

    #[error("未找到资源: {0}")]
    NotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, error_type, suggestions) = match &self {
            ApiError::Elevator(err @ ElevatorError::InvalidFloor { floor }) => (
                StatusCode::BAD_REQUEST,
                format!("楼层号 {} 无效，楼层号必须是正整数", floor),
                "INVALID_FLOOR".to_string(),
                vec![err.user_message().to_string()],
            ),
            ApiError::Elevator(err @ ElevatorError::InvalidDirection(value)) => (
                StatusCode::BAD_REQUEST,
                format!("运行方向 '{}' 无效", value),
                "INVALID_DIRECTION".to_string(),
                vec![err.user_message().to_string()],
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                format!("请求参数错误: {}", msg),
                "BAD_REQUEST".to_string(),
                vec![
                    "请检查请求格式和参数".to_string(),
                    "请求体应为JSON整数，并设置 Content-Type: application/json".to_string(),
                ],
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                msg.clone(),
                "NOT_FOUND".to_string(),
                vec!["使用 GET /elevator-request 查看待处理的楼层呼叫".to_string()],
            ),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type,
                "code": status.as_u16(),
                "suggestions": suggestions,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
