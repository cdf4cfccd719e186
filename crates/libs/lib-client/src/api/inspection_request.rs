//! # Inspection Request Endpoints
//!
//! List, detail and the dashboard statistic.

use shared::{InspectionRequest, InspectionRequestStatistic, Paginated};

use lib_core::{QueryDescriptor, Result};

use crate::client::ApiClient;
use crate::endpoints::{INSPECTION_REQUEST, STATISTIC};

/// Paged list; filters, sort and page travel as query parameters.
pub async fn list(
    client: &ApiClient,
    query: &QueryDescriptor,
) -> Result<Paginated<InspectionRequest>> {
    client
        .get(&[INSPECTION_REQUEST], &query.to_query_pairs())
        .await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<InspectionRequest> {
    client.get(&[INSPECTION_REQUEST, id], &[]).await
}

/// Counters for the inspection dashboard.
pub async fn statistic(client: &ApiClient) -> Result<InspectionRequestStatistic> {
    client.get(&[INSPECTION_REQUEST, STATISTIC], &[]).await
}
