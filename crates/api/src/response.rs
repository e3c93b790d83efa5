use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

pub fn success<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

pub fn ok_empty() -> Response {
    StatusCode::OK.into_response()
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
