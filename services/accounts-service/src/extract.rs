use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use common_http_errors::ApiError;

/// Header carrying the suite-wide request correlation identifier.
pub const CORRELATION_ID_HEADER: &str = "travelbank-correlation-id";

/// Extracts the mandatory correlation id header. The value is opaque: it is
/// forwarded to downstream calls and echoed in error bodies, never parsed.
#[derive(Debug, Clone)]
pub struct CorrelationId(pub String);

impl CorrelationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(CORRELATION_ID_HEADER)
            .ok_or(ApiError::BadRequest {
                code: "missing_correlation_id",
                correlation_id: None,
                message: Some(format!("{CORRELATION_ID_HEADER} header is required")),
            })?;

        // Presence is the whole contract; the value itself is opaque and is
        // propagated unchanged.
        let value = header_value
            .to_str()
            .map_err(|_| ApiError::bad_request("invalid_correlation_id", None))?;

        Ok(Self(value.to_owned()))
    }
}
