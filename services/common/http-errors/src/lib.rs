use axum::{http::{StatusCode, HeaderValue}, response::{IntoResponse, Response}, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Standardized error body shared by every service in the suite. Clients key
/// off `code`; `correlation_id` echoes the request's correlation header when
/// the failing handler had one in hand.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub code: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")] pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")] pub correlation_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: &'static str, correlation_id: Option<String>, message: Option<String> },
    NotFound { code: &'static str, correlation_id: Option<String> },
    Internal { correlation_id: Option<String>, message: Option<String> },
}

impl ApiError {
    pub fn internal<E: std::fmt::Display>(e: E, correlation_id: Option<String>) -> Self { Self::Internal { correlation_id, message: Some(e.to_string()) } }
    pub fn bad_request(code: &'static str, correlation_id: Option<String>) -> Self { Self::BadRequest { code, correlation_id, message: None } }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, correlation_id, message) = match self {
            ApiError::BadRequest { code, correlation_id, message } => (StatusCode::BAD_REQUEST, code, correlation_id, message),
            ApiError::NotFound { code, correlation_id } => (StatusCode::NOT_FOUND, code, correlation_id, None),
            ApiError::Internal { correlation_id, message } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", correlation_id, message),
        };
        let body = ErrorBody {
            code: code.into(),
            status: status.as_u16(),
            message,
            correlation_id,
            timestamp: Utc::now(),
        };
        let mut resp = (status, Json(body)).into_response();
        if let Ok(val) = HeaderValue::from_str(code) {
            resp.headers_mut().insert("X-Error-Code", val);
        }
        resp
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
