use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    response::Response,
    Json,
};
use elevator_domain::TravelDirection;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    error::{ApiError, ApiResult},
    response::{no_content, ok_empty, success},
    routes::AppState,
};

/// 下一停靠楼层查询参数
#[derive(Debug, Deserialize)]
pub struct NextFloorQuery {
    #[serde(rename = "currentFloor")]
    pub current_floor: i64,
    #[serde(rename = "elevatorTravelDirection")]
    pub elevator_travel_direction: Option<String>,
}

impl NextFloorQuery {
    /// 未提供方向时视为静止
    pub fn direction(&self) -> Result<TravelDirection, ApiError> {
        match self.elevator_travel_direction.as_deref() {
            None | Some("") => Ok(TravelDirection::default()),
            Some(value) => Ok(value.parse::<TravelDirection>()?),
        }
    }
}

/// 在指定楼层呼叫电梯
///
/// `POST /elevator-request`，请求体为JSON整数，例如 `5`
pub async fn request_elevator(
    State(state): State<AppState>,
    payload: Result<Json<i64>, JsonRejection>,
) -> ApiResult<Response> {
    let Json(floor_number) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    state.floor_requests.add_floor_request(floor_number).await?;
    info!(floor = floor_number, "楼层呼叫已登记");

    Ok(ok_empty())
}

/// 获取待处理的楼层呼叫，没有时返回 204
pub async fn get_outstanding_requests(State(state): State<AppState>) -> ApiResult<Response> {
    let floors = state.floor_requests.outstanding_requests().await;
    debug!(count = floors.len(), "查询待处理楼层呼叫");

    if floors.is_empty() {
        return Ok(no_content());
    }

    Ok(success(floors))
}

/// 根据当前楼层和运行方向获取下一个停靠楼层
///
/// `GET /elevator-request/next?currentFloor=10&elevatorTravelDirection=Up`
pub async fn get_next_floor_to_stop(
    State(state): State<AppState>,
    query: Result<Query<NextFloorQuery>, QueryRejection>,
) -> ApiResult<Response> {
    let Query(params) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let direction = params.direction()?;

    let next_floor = state
        .floor_requests
        .next_floor_to_stop(params.current_floor, direction)
        .await?;

    match next_floor {
        Some(floor) => {
            debug!(
                current_floor = params.current_floor,
                %direction,
                next_floor = %floor,
                "计算下一停靠楼层"
            );
            Ok(success(floor))
        }
        // 没有更多呼叫
        None => Ok(no_content()),
    }
}

/// 移除已完成的楼层呼叫
///
/// `DELETE /elevator-request/{floor_number}`，楼层不在待处理列表中时返回 404
pub async fn delete_fulfilled_request(
    State(state): State<AppState>,
    floor_number: Result<Path<i64>, PathRejection>,
) -> ApiResult<Response> {
    let Path(floor_number) = floor_number.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if !state.floor_requests.remove_floor_request(floor_number).await? {
        return Err(ApiError::NotFound(format!(
            "楼层 {} 没有待处理的呼叫",
            floor_number
        )));
    }

    info!(floor = floor_number, "楼层呼叫已完成并移除");
    Ok(ok_empty())
}
