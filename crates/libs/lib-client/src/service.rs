//! # Service Trait
//!
//! [`ApiService`] abstracts the backend so the query layer and the CLI can
//! run against a mock in tests.

use async_trait::async_trait;
use shared::{
    CreateInspectionReport, Defect, ImportRequest, InspectionReport, InspectionRequest,
    InspectionRequestStatistic, InventoryReport, InventoryReportPlan, Paginated, Receipt,
    RecordInventoryReport, RefreshTokenResponse, SignInResponse,
};

use lib_auth::TokenRefresher;
use lib_core::{QueryDescriptor, Result};

use crate::api;
use crate::client::ApiClient;

/// Every backend operation the client consumes.
#[async_trait]
pub trait ApiService: Send + Sync {
    async fn sign_in(&self, email: String, password: String) -> Result<SignInResponse>;

    async fn confirm_otp(&self, email: String, otp: String) -> Result<SignInResponse>;

    async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshTokenResponse>;

    fn logout(&self) -> Result<()>;

    async fn defects(&self, query: &QueryDescriptor) -> Result<Paginated<Defect>>;

    async fn import_requests(&self, query: &QueryDescriptor) -> Result<Paginated<ImportRequest>>;

    async fn inspection_requests(&self, query: &QueryDescriptor) -> Result<Paginated<InspectionRequest>>;

    async fn inspection_request(&self, id: &str) -> Result<InspectionRequest>;

    async fn inspection_statistic(&self) -> Result<InspectionRequestStatistic>;

    async fn create_inspection_report(&self, report: &CreateInspectionReport) -> Result<InspectionReport>;

    async fn inspection_report(&self, id: &str) -> Result<InspectionReport>;

    async fn inventory_reports(&self, query: &QueryDescriptor) -> Result<Paginated<InventoryReport>>;

    async fn inventory_report(&self, id: &str) -> Result<InventoryReport>;

    async fn record_inventory(&self, id: &str, record: &RecordInventoryReport) -> Result<InventoryReport>;

    async fn inventory_report_plans(&self, query: &QueryDescriptor) -> Result<Paginated<InventoryReportPlan>>;

    async fn inventory_report_plan(&self, id: &str) -> Result<InventoryReportPlan>;

    async fn receipt_by_code(&self, code: &str) -> Result<Receipt>;
}

#[async_trait]
impl ApiService for ApiClient {
    async fn sign_in(&self, email: String, password: String) -> Result<SignInResponse> {
        api::auth::sign_in(self, email, password).await
    }

    async fn confirm_otp(&self, email: String, otp: String) -> Result<SignInResponse> {
        api::auth::confirm_otp(self, email, otp).await
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<RefreshTokenResponse> {
        api::auth::refresh_token(self, refresh_token).await
    }

    fn logout(&self) -> Result<()> {
        api::auth::logout(self)
    }

    async fn defects(&self, query: &QueryDescriptor) -> Result<Paginated<Defect>> {
        api::defect::list(self, query).await
    }

    async fn import_requests(&self, query: &QueryDescriptor) -> Result<Paginated<ImportRequest>> {
        api::import_request::list(self, query).await
    }

    async fn inspection_requests(&self, query: &QueryDescriptor) -> Result<Paginated<InspectionRequest>> {
        api::inspection_request::list(self, query).await
    }

    async fn inspection_request(&self, id: &str) -> Result<InspectionRequest> {
        api::inspection_request::get(self, id).await
    }

    async fn inspection_statistic(&self) -> Result<InspectionRequestStatistic> {
        api::inspection_request::statistic(self).await
    }

    async fn create_inspection_report(&self, report: &CreateInspectionReport) -> Result<InspectionReport> {
        api::inspection_report::create(self, report).await
    }

    async fn inspection_report(&self, id: &str) -> Result<InspectionReport> {
        api::inspection_report::get(self, id).await
    }

    async fn inventory_reports(&self, query: &QueryDescriptor) -> Result<Paginated<InventoryReport>> {
        api::inventory_report::list(self, query).await
    }

    async fn inventory_report(&self, id: &str) -> Result<InventoryReport> {
        api::inventory_report::get(self, id).await
    }

    async fn record_inventory(&self, id: &str, record: &RecordInventoryReport) -> Result<InventoryReport> {
        api::inventory_report::record(self, id, record).await
    }

    async fn inventory_report_plans(&self, query: &QueryDescriptor) -> Result<Paginated<InventoryReportPlan>> {
        api::inventory_report_plan::list(self, query).await
    }

    async fn inventory_report_plan(&self, id: &str) -> Result<InventoryReportPlan> {
        api::inventory_report_plan::get(self, id).await
    }

    async fn receipt_by_code(&self, code: &str) -> Result<Receipt> {
        api::receipt::by_code(self, code).await
    }
}

#[async_trait]
impl TokenRefresher for ApiClient {
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshTokenResponse> {
        api::auth::refresh_token(self, refresh_token).await
    }
}
