use reqwest::Method;
use shared::{CreateInspectionReport, InspectionReport};

use lib_core::Result;

use crate::client::ApiClient;
use crate::endpoints::INSPECTION_REPORT;

/// Submit the result of an inspection.
#[tracing::instrument(skip(client, report), fields(inspection_request_id = %report.inspection_request_id))]
pub async fn create(client: &ApiClient, report: &CreateInspectionReport) -> Result<InspectionReport> {
    client
        .send_json(Method::POST, &[INSPECTION_REPORT], report)
        .await
}

pub async fn get(client: &ApiClient, id: &str) -> Result<InspectionReport> {
    client.get(&[INSPECTION_REPORT, id], &[]).await
}
