use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::extract::CORRELATION_ID_HEADER;

/// Customer record as returned by the downstream lookup service. The field
/// layout is owned by that service's contract, so the payload is carried as
/// an opaque JSON value and serialized back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerDetails(pub Value);

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("customer_not_found")]
    CustomerNotFound,
    #[error("unexpected status {0} from customers service")]
    UnexpectedStatus(u16),
    #[error("http_error: {0}")]
    Http(String),
}

/// Lookup collaborator consumed by the endpoint. Supplied at wiring time so
/// handlers stay independent of the transport behind it.
#[async_trait]
pub trait CustomersService: Send + Sync {
    async fn fetch_customer_details(
        &self,
        mobile_number: &str,
        correlation_id: &str,
    ) -> Result<CustomerDetails, LookupError>;
}

/// HTTP-backed implementation calling the customers service and forwarding
/// the correlation header.
pub struct HttpCustomersService {
    client: Client,
    base_url: String,
}

impl HttpCustomersService {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }
}

#[async_trait]
impl CustomersService for HttpCustomersService {
    async fn fetch_customer_details(
        &self,
        mobile_number: &str,
        correlation_id: &str,
    ) -> Result<CustomerDetails, LookupError> {
        let url = format!("{}/customer", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("mobileNumber", mobile_number)])
            .header(CORRELATION_ID_HEADER, correlation_id)
            .send()
            .await
            .map_err(|e| LookupError::Http(e.to_string()))?;

        match resp.status().as_u16() {
            200 => resp
                .json::<CustomerDetails>()
                .await
                .map_err(|e| LookupError::Http(e.to_string())),
            404 => Err(LookupError::CustomerNotFound),
            s => Err(LookupError::UnexpectedStatus(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let svc = HttpCustomersService::new(Client::new(), "http://customers:9000/");
        assert_eq!(svc.base_url, "http://customers:9000");
    }
}
