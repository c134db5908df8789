use axum::{
    http::StatusCode,
    routing::get,
    Json, Router,
};
use common_http_errors::{ApiError, ApiResult};
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounterVec, Opts, TextEncoder};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, error};

pub mod config;
pub mod extract;
pub mod handlers;
pub mod service;

use extract::CorrelationId;
use service::{CustomerDetails, CustomersService, LookupError};

pub const SERVICE_NAME: &str = "accounts-service";

static HTTP_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let c = IntCounterVec::new(
        Opts::new(
            "http_errors_total",
            "Count of HTTP error responses emitted (status >= 400)",
        ),
        &["service", "code", "status"],
    )
    .expect("http_errors_total");
    let _ = prometheus::default_registry().register(Box::new(c.clone()));
    c
});

async fn track_http_errors(
    req: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> Result<axum::response::Response, axum::response::Response> {
    let resp = next.run(req).await;
    let status = resp.status();
    if status.as_u16() >= 400 {
        let code = resp
            .headers()
            .get("X-Error-Code")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");
        HTTP_ERRORS_TOTAL
            .with_label_values(&[SERVICE_NAME, code, status.as_str()])
            .inc();
    }
    Ok(resp)
}

async fn render_metrics() -> Result<String, StatusCode> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    String::from_utf8(buffer).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

#[derive(Clone)]
pub struct AppState {
    pub customers: Arc<dyn CustomersService>,
}

#[derive(Deserialize)]
pub struct FetchCustomerDetailsParams {
    #[serde(rename = "mobileNumber")]
    pub mobile_number: String,
}

/// Accept set for the mobile-number parameter: empty string OR exactly ten
/// ASCII digits. The empty-string allowance is part of the published
/// contract and is kept as-is.
fn is_valid_mobile_number(value: &str) -> bool {
    value.is_empty() || (value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit()))
}

pub(crate) async fn fetch_customer_details_impl(
    state: AppState,
    correlation_id: CorrelationId,
    params: FetchCustomerDetailsParams,
) -> ApiResult<Json<CustomerDetails>> {
    let mobile_number = params.mobile_number;
    if !is_valid_mobile_number(&mobile_number) {
        return Err(ApiError::BadRequest {
            code: "invalid_mobile_number",
            correlation_id: Some(correlation_id.into_inner()),
            message: Some("Mobile number must be 10 digits".into()),
        });
    }

    debug!(correlation_id = %correlation_id.as_str(), "fetchCustomerDetails start");
    let details = state
        .customers
        .fetch_customer_details(&mobile_number, correlation_id.as_str())
        .await
        .map_err(|err| lookup_internal(err, &correlation_id))?;
    debug!(correlation_id = %correlation_id.as_str(), "fetchCustomerDetails end");

    Ok(Json(details))
}

fn lookup_internal(err: LookupError, correlation_id: &CorrelationId) -> ApiError {
    error!(correlation_id = %correlation_id.as_str(), error = %err, "Customer lookup failed");
    ApiError::Internal {
        correlation_id: Some(correlation_id.as_str().to_owned()),
        message: Some("Customer lookup failed".into()),
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/fetchCustomerDetails", get(handlers::fetch_customer_details))
        .route("/healthz", get(|| async { "ok" }))
        .route("/internal/metrics", get(render_metrics))
        .route("/metrics", get(render_metrics))
        .with_state(state)
        .layer(axum::middleware::from_fn(track_http_errors))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mobile_number_guard_accepts_empty_and_ten_digits() {
        assert!(is_valid_mobile_number(""));
        assert!(is_valid_mobile_number("9876543210"));
        assert!(is_valid_mobile_number("0000000000"));
    }

    #[test]
    fn mobile_number_guard_rejects_other_shapes() {
        assert!(!is_valid_mobile_number("12345"));
        assert!(!is_valid_mobile_number("12345678901"));
        assert!(!is_valid_mobile_number("abcdefghij"));
        assert!(!is_valid_mobile_number("98765 4321"));
        assert!(!is_valid_mobile_number("987654321０")); // non-ASCII digit
    }
}
