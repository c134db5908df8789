use axum::{extract::{Query, State}, Json};
use common_http_errors::ApiResult;

use crate::extract::CorrelationId;
use crate::service::CustomerDetails;
use crate::{AppState, FetchCustomerDetailsParams};

pub async fn fetch_customer_details(
    State(state): State<AppState>,
    correlation_id: CorrelationId,
    Query(params): Query<FetchCustomerDetailsParams>,
) -> ApiResult<Json<CustomerDetails>> { crate::fetch_customer_details_impl(state, correlation_id, params).await }
