use shared::{ImportRequest, Paginated};

use lib_core::{QueryDescriptor, Result};

use crate::client::ApiClient;
use crate::endpoints::IMPORT_REQUEST;

pub async fn list(client: &ApiClient, query: &QueryDescriptor) -> Result<Paginated<ImportRequest>> {
    client.get(&[IMPORT_REQUEST], &query.to_query_pairs()).await
}
