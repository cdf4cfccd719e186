//! # Cached Queries
//!
//! One [`QueryCache`] per read endpoint and a constructor per screen-level
//! query. Handles built for the same endpoint and query share a cache entry,
//! so two views asking for the same page trigger a single request.
//!
//! Mutations go straight through [`ApiService`] and leave the caches alone;
//! call [`Queries::invalidate_endpoint`] afterwards when fresh lists matter.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use shared::{
    Defect, ImportRequest, InspectionReport, InspectionRequest, InspectionRequestStatistic,
    InventoryReport, InventoryReportPlan, Paginated, Receipt,
};

use lib_core::{QueryDescriptor, Result};

use crate::cache::{QueryCache, QueryHandle, QueryKey};
use crate::endpoints::{
    DEFECT, IMPORT_REQUEST, INSPECTION_REPORT, INSPECTION_REQUEST, INVENTORY_REPORT,
    INVENTORY_REPORT_PLAN, RECEIPT, STATISTIC,
};
use crate::service::ApiService;

pub struct Queries {
    service: Arc<dyn ApiService>,
    defects: Arc<QueryCache<Paginated<Defect>>>,
    import_requests: Arc<QueryCache<Paginated<ImportRequest>>>,
    inspection_requests: Arc<QueryCache<Paginated<InspectionRequest>>>,
    inspection_request: Arc<QueryCache<InspectionRequest>>,
    inspection_statistic: Arc<QueryCache<InspectionRequestStatistic>>,
    inspection_report: Arc<QueryCache<InspectionReport>>,
    inventory_reports: Arc<QueryCache<Paginated<InventoryReport>>>,
    inventory_report: Arc<QueryCache<InventoryReport>>,
    inventory_report_plans: Arc<QueryCache<Paginated<InventoryReportPlan>>>,
    inventory_report_plan: Arc<QueryCache<InventoryReportPlan>>,
    receipts: Arc<QueryCache<Receipt>>,
}

fn handle<T, F, Fut>(
    cache: &Arc<QueryCache<T>>,
    service: &Arc<dyn ApiService>,
    key: QueryKey,
    call: F,
) -> QueryHandle<T>
where
    T: Send + Sync + 'static,
    F: Fn(Arc<dyn ApiService>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let service = Arc::clone(service);
    QueryHandle::new(Arc::clone(cache), key, move || call(Arc::clone(&service)))
}

impl Queries {
    /// `stale_after = None` keeps results until invalidated.
    pub fn new(service: Arc<dyn ApiService>, stale_after: Option<Duration>) -> Self {
        Self {
            service,
            defects: Arc::new(QueryCache::new(stale_after)),
            import_requests: Arc::new(QueryCache::new(stale_after)),
            inspection_requests: Arc::new(QueryCache::new(stale_after)),
            inspection_request: Arc::new(QueryCache::new(stale_after)),
            inspection_statistic: Arc::new(QueryCache::new(stale_after)),
            inspection_report: Arc::new(QueryCache::new(stale_after)),
            inventory_reports: Arc::new(QueryCache::new(stale_after)),
            inventory_report: Arc::new(QueryCache::new(stale_after)),
            inventory_report_plans: Arc::new(QueryCache::new(stale_after)),
            inventory_report_plan: Arc::new(QueryCache::new(stale_after)),
            receipts: Arc::new(QueryCache::new(stale_after)),
        }
    }

    pub fn service(&self) -> &Arc<dyn ApiService> {
        &self.service
    }

    pub fn defects(&self, query: QueryDescriptor) -> QueryHandle<Paginated<Defect>> {
        let key = QueryKey::new(DEFECT, &query);
        handle(&self.defects, &self.service, key, move |service| {
            let query = query.clone();
            async move { service.defects(&query).await }
        })
    }

    pub fn import_requests(&self, query: QueryDescriptor) -> QueryHandle<Paginated<ImportRequest>> {
        let key = QueryKey::new(IMPORT_REQUEST, &query);
        handle(&self.import_requests, &self.service, key, move |service| {
            let query = query.clone();
            async move { service.import_requests(&query).await }
        })
    }

    pub fn inspection_requests(
        &self,
        query: QueryDescriptor,
    ) -> QueryHandle<Paginated<InspectionRequest>> {
        let key = QueryKey::new(INSPECTION_REQUEST, &query);
        handle(&self.inspection_requests, &self.service, key, move |service| {
            let query = query.clone();
            async move { service.inspection_requests(&query).await }
        })
    }

    pub fn inspection_request(&self, id: &str) -> QueryHandle<InspectionRequest> {
        let key = QueryKey::detail(INSPECTION_REQUEST, id);
        let id = id.to_string();
        handle(&self.inspection_request, &self.service, key, move |service| {
            let id = id.clone();
            async move { service.inspection_request(&id).await }
        })
    }

    pub fn inspection_statistic(&self) -> QueryHandle<InspectionRequestStatistic> {
        let key = QueryKey::endpoint(format!("{}/{}", INSPECTION_REQUEST, STATISTIC));
        handle(&self.inspection_statistic, &self.service, key, |service| async move {
            service.inspection_statistic().await
        })
    }

    pub fn inspection_report(&self, id: &str) -> QueryHandle<InspectionReport> {
        let key = QueryKey::detail(INSPECTION_REPORT, id);
        let id = id.to_string();
        handle(&self.inspection_report, &self.service, key, move |service| {
            let id = id.clone();
            async move { service.inspection_report(&id).await }
        })
    }

    pub fn inventory_reports(&self, query: QueryDescriptor) -> QueryHandle<Paginated<InventoryReport>> {
        let key = QueryKey::new(INVENTORY_REPORT, &query);
        handle(&self.inventory_reports, &self.service, key, move |service| {
            let query = query.clone();
            async move { service.inventory_reports(&query).await }
        })
    }

    pub fn inventory_report(&self, id: &str) -> QueryHandle<InventoryReport> {
        let key = QueryKey::detail(INVENTORY_REPORT, id);
        let id = id.to_string();
        handle(&self.inventory_report, &self.service, key, move |service| {
            let id = id.clone();
            async move { service.inventory_report(&id).await }
        })
    }

    pub fn inventory_report_plans(
        &self,
        query: QueryDescriptor,
    ) -> QueryHandle<Paginated<InventoryReportPlan>> {
        let key = QueryKey::new(INVENTORY_REPORT_PLAN, &query);
        handle(&self.inventory_report_plans, &self.service, key, move |service| {
            let query = query.clone();
            async move { service.inventory_report_plans(&query).await }
        })
    }

    pub fn inventory_report_plan(&self, id: &str) -> QueryHandle<InventoryReportPlan> {
        let key = QueryKey::detail(INVENTORY_REPORT_PLAN, id);
        let id = id.to_string();
        handle(&self.inventory_report_plan, &self.service, key, move |service| {
            let id = id.clone();
            async move { service.inventory_report_plan(&id).await }
        })
    }

    pub fn receipt_by_code(&self, code: &str) -> QueryHandle<Receipt> {
        let key = QueryKey::detail(RECEIPT, code);
        let code = code.to_string();
        handle(&self.receipts, &self.service, key, move |service| {
            let code = code.clone();
            async move { service.receipt_by_code(&code).await }
        })
    }

    /// Drop cached lists and details for one endpoint.
    pub fn invalidate_endpoint(&self, endpoint: &str) {
        match endpoint {
            DEFECT => self.defects.invalidate_endpoint(endpoint),
            IMPORT_REQUEST => self.import_requests.invalidate_endpoint(endpoint),
            INSPECTION_REQUEST => {
                self.inspection_requests.invalidate_endpoint(endpoint);
                self.inspection_request.invalidate_endpoint(endpoint);
                self.inspection_statistic.clear();
            }
            INSPECTION_REPORT => self.inspection_report.invalidate_endpoint(endpoint),
            INVENTORY_REPORT => {
                self.inventory_reports.invalidate_endpoint(endpoint);
                self.inventory_report.invalidate_endpoint(endpoint);
            }
            INVENTORY_REPORT_PLAN => {
                self.inventory_report_plans.invalidate_endpoint(endpoint);
                self.inventory_report_plan.invalidate_endpoint(endpoint);
            }
            RECEIPT => self.receipts.invalidate_endpoint(endpoint),
            other => tracing::debug!(endpoint = other, "No cache for endpoint"),
        }
    }

    /// Drop everything, e.g. after the account changes.
    pub fn clear(&self) {
        self.defects.clear();
        self.import_requests.clear();
        self.inspection_requests.clear();
        self.inspection_request.clear();
        self.inspection_statistic.clear();
        self.inspection_report.clear();
        self.inventory_reports.clear();
        self.inventory_report.clear();
        self.inventory_report_plans.clear();
        self.inventory_report_plan.clear();
        self.receipts.clear();
    }
}

impl std::fmt::Debug for Queries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Queries").finish_non_exhaustive()
    }
}
