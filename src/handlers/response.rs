//! Response envelope and request extractors
//!
//! Every response, success or failure, is wrapped in [`ApiResponse`].

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::utils::errors::{EventDeskError, ErrorSeverity};

pub type ApiResult = std::result::Result<Response, EventDeskError>;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub is_success: bool,
    pub message: String,
    pub status_code: String,
    pub data: Option<T>,
    pub errors: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            is_success: true,
            message: message.into(),
            status_code: status.as_u16().to_string(),
            data: Some(data),
            errors: None,
        }
    }
}

/// 200 with a payload
pub fn ok<T: Serialize>(message: &str, data: T) -> ApiResult {
    Ok(reply(StatusCode::OK, message, data))
}

/// 201 with the created resource
pub fn created<T: Serialize>(message: &str, data: T) -> ApiResult {
    Ok(reply(StatusCode::CREATED, message, data))
}

fn reply<T: Serialize>(status: StatusCode, message: &str, data: T) -> Response {
    (status, Json(ApiResponse::success(status, message, data))).into_response()
}

impl IntoResponse for EventDeskError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status = StatusCode::from_u16(code.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if matches!(self.severity(), ErrorSeverity::Critical) {
            error!(error = %self, "Unhandled infrastructure error reached the HTTP layer");
        }

        let body: ApiResponse<()> = ApiResponse {
            is_success: false,
            message: self.client_message(),
            status_code: status.as_u16().to_string(),
            data: None,
            errors: Some(json!({ "code": code })),
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for EventDeskError {
    fn from(rejection: JsonRejection) -> Self {
        EventDeskError::validation(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for EventDeskError {
    fn from(rejection: PathRejection) -> Self {
        EventDeskError::validation(format!("Invalid path parameter: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for EventDeskError {
    fn from(rejection: QueryRejection) -> Self {
        EventDeskError::validation(format!("Invalid query string: {}", rejection.body_text()))
    }
}

/// JSON body whose rejections use the envelope
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(EventDeskError))]
pub struct ApiJson<T>(pub T);

/// Path parameters whose rejections use the envelope
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(EventDeskError))]
pub struct ApiPath<T>(pub T);

/// Query string whose rejections use the envelope
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(EventDeskError))]
pub struct ApiQuery<T>(pub T);
