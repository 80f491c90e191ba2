use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Envelope for every successful API reply.
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ApiErrorBody,
}

fn reply<T: Serialize>(status: StatusCode, data: T, message: impl Into<String>) -> Response {
    let body = ApiResponse {
        success: true,
        data,
        message: message.into(),
    };
    (status, Json(body)).into_response()
}

pub fn success<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    reply(StatusCode::OK, data, message)
}

/// `201` for newly registered accounts and proposed events.
pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    reply(StatusCode::CREATED, data, message)
}

pub fn error(code: &str, message: impl Into<String>, details: Option<Value>, status: StatusCode) -> Response {
    let body = ApiErrorResponse {
        success: false,
        error: ApiErrorBody {
            code: code.to_string(),
            message: message.into(),
            details,
        },
    };
    (status, Json(body)).into_response()
}
