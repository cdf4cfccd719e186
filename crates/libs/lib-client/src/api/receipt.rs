//! Receipt lookup by the code scanned from a package label.

use shared::Receipt;

use lib_core::Result;

use crate::client::ApiClient;
use crate::endpoints::{BY_CODE, RECEIPT};

pub async fn by_code(client: &ApiClient, code: &str) -> Result<Receipt> {
    client.get(&[RECEIPT, BY_CODE, code], &[]).await
}
