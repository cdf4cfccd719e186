//! # Inventory Report Endpoints
//!
//! Staff count stock against an inventory report and record the actual
//! quantities with `PATCH /inventory-report/{id}/record`.

use reqwest::Method;
use shared::{InventoryReport, Paginated, RecordInventoryReport};

use lib_core::{QueryDescriptor, Result};

use crate::client::ApiClient;
use crate::endpoints::{INVENTORY_REPORT, RECORD};

pub async fn list(client: &ApiClient, query: &QueryDescriptor) -> Result<Paginated<InventoryReport>> {
    client.get(&[INVENTORY_REPORT], &query.to_query_pairs()).await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<InventoryReport> {
    client.get(&[INVENTORY_REPORT, id], &[]).await
}

/// Record counted quantities; returns the updated report.
#[tracing::instrument(skip(client, record), fields(lines = record.details.len()))]
pub async fn record(
    client: &ApiClient,
    id: &str,
    record: &RecordInventoryReport,
) -> Result<InventoryReport> {
    client
        .send_json(Method::PATCH, &[INVENTORY_REPORT, id, RECORD], record)
        .await
}
