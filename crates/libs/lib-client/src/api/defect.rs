//! Defect catalogue used when filling in inspection reports.

use shared::{Defect, Paginated};

use lib_core::{QueryDescriptor, Result};

use crate::client::ApiClient;
use crate::endpoints::DEFECT;

pub async fn list(client: &ApiClient, query: &QueryDescriptor) -> Result<Paginated<Defect>> {
    client.get(&[DEFECT], &query.to_query_pairs()).await
}
