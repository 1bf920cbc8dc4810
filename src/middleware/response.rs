use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};

/// Success envelope shared by every endpoint: `{success, message, data?}`.
#[derive(Debug)]
pub struct ApiResponse {
    pub message: String,
    pub data: Option<Value>,
    pub status_code: StatusCode,
}

impl ApiResponse {
    /// 200 OK with a data payload
    pub fn success(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            status_code: StatusCode::OK,
        }
    }

    /// 201 Created with a data payload
    pub fn created(message: impl Into<String>, data: Value) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            status_code: StatusCode::CREATED,
        }
    }

    /// Acknowledgement with no data payload
    pub fn ack(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            status_code: StatusCode::OK,
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let mut body = json!({
            "success": true,
            "message": self.message,
        });
        if let Some(data) = self.data {
            body["data"] = data;
        }
        (self.status_code, Json(body)).into_response()
    }
}

/// Handler result: the success envelope or an `ApiError` rendered as one.
pub type ApiResult = Result<ApiResponse, crate::error::ApiError>;
