use shared::{InventoryReportPlan, Paginated};

use lib_core::{QueryDescriptor, Result};

use crate::client::ApiClient;
use crate::endpoints::INVENTORY_REPORT_PLAN;

pub async fn list(
    client: &ApiClient,
    query: &QueryDescriptor,
) -> Result<Paginated<InventoryReportPlan>> {
    client
        .get(&[INVENTORY_REPORT_PLAN], &query.to_query_pairs())
        .await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<InventoryReportPlan> {
    client.get(&[INVENTORY_REPORT_PLAN, id], &[]).await
}
