//! Client tests against an in-process axum backend.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use futures::future::join_all;
use parking_lot::Mutex;
use reqwest::Method;
use serde_json::{json, Value};

use lib_auth::{AuthContext, TokenRefresher};
use lib_client::{api, settle, ApiClient, ApiService, Queries};
use lib_core::error::GENERIC_ERROR_MESSAGE;
use lib_core::{ApiError, Config, Envelope, Filter, QueryDescriptor, Sort};
use shared::{
    CreateInspectionReport, CreateInspectionReportDetail, GoodsType, ImportRequestStatus, ImportRequestType,
    InspectionReportDetailDefect, InspectionRequest, InspectionRequestStatus, InventoryReportPlanStatus,
    InventoryReportStatus, RecordInventoryDetail, RecordInventoryReport,
};

#[derive(Default)]
struct MockState {
    list_hits: AtomicUsize,
    statistic_hits: AtomicUsize,
    fail_next_statistic: AtomicBool,
    last_query: Mutex<Vec<(String, String)>>,
    last_authorization: Mutex<Option<String>>,
    last_body: Mutex<Option<Value>>,
}

fn envelope(status: u16, message: &str, data: Value) -> Json<Value> {
    Json(json!({ "statusCode": status, "message": message, "data": data }))
}

fn page_of(items: Value) -> Value {
    let count = items.as_array().map_or(0, Vec::len);
    json!({ "data": items, "count": count, "total": count, "page": 1, "pageCount": 1 })
}

async fn sign_in(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret" {
        envelope(
            201,
            "Sign in successfully",
            json!({
                "accessToken": "token-abc",
                "refreshToken": "refresh-abc",
                "account": { "id": "acc-1", "email": body["email"], "role": "INSPECTION_DEPARTMENT" }
            }),
        )
        .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "statusCode": 401, "message": "Invalid email or password" })),
        )
            .into_response()
    }
}

async fn confirm_otp(Json(body): Json<Value>) -> Response {
    if body["otp"] == "123456" {
        envelope(
            201,
            "Confirm OTP successfully",
            json!({
                "accessToken": "token-otp",
                "refreshToken": "refresh-otp",
                "account": { "id": "acc-2", "email": body["email"], "role": "WAREHOUSE_STAFF" }
            }),
        )
        .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "statusCode": 400, "message": "Invalid OTP", "errors": ["otp is incorrect"] })),
        )
            .into_response()
    }
}

async fn refresh_token(Json(body): Json<Value>) -> Json<Value> {
    assert_eq!(body["refreshToken"], "refresh-abc");
    envelope(200, "Refreshed", json!({ "accessToken": "token-refreshed" }))
}

async fn inspection_requests(
    State(state): State<Arc<MockState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Value> {
    state.list_hits.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock() = params;
    tokio::time::sleep(Duration::from_millis(50)).await;

    envelope(
        200,
        "Get inspection requests successfully",
        json!({
            "data": [
                { "id": "req-1", "status": "INSPECTING", "type": "MATERIAL" },
                { "id": "req-2", "status": "INSPECTED", "type": "PRODUCT" }
            ],
            "count": 2,
            "total": 12,
            "page": 1,
            "pageCount": 2
        }),
    )
}

async fn inspection_request(Path(id): Path<String>) -> Response {
    if id == "missing" {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "statusCode": 404,
                "message": "Inspection request not found",
                "errors": ["id does not exist"]
            })),
        )
            .into_response();
    }
    // Bare payload, no envelope
    Json(json!({ "id": id, "status": "INSPECTING", "type": "MATERIAL" })).into_response()
}

async fn statistic(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    state.statistic_hits.fetch_add(1, Ordering::SeqCst);
    *state.last_authorization.lock() = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    if state.fail_next_statistic.swap(false, Ordering::SeqCst) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    envelope(
        200,
        "ok",
        json!({ "total": 4, "inspecting": 0, "inspected": 4, "cancelled": 0, "passed": 3, "failed": 1 }),
    )
    .into_response()
}

async fn record_inventory(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let detail = &body["details"][0];
    let response = json!({
        "id": id,
        "status": "IN_PROGRESS",
        "inventoryReportDetail": [{
            "id": detail["inventoryReportDetailId"],
            "expectedQuantity": 10,
            "actualQuantity": detail["actualQuantity"]
        }]
    });
    *state.last_body.lock() = Some(body);
    envelope(200, "Recorded", response)
}

async fn defects(
    State(state): State<Arc<MockState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Value> {
    *state.last_query.lock() = params;
    envelope(
        200,
        "ok",
        page_of(json!([{ "id": "def-1", "description": "Torn fabric", "type": "MATERIAL" }])),
    )
}

async fn import_requests(
    State(state): State<Arc<MockState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Value> {
    *state.last_query.lock() = params;
    envelope(
        200,
        "ok",
        page_of(json!([{ "id": "imp-1", "code": "IR-001", "status": "INSPECTING", "type": "MATERIAL_BY_PO" }])),
    )
}

async fn create_inspection_report(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    let mut report = body.clone();
    report["id"] = json!("rep-1");
    report["code"] = json!("IRP-001");
    *state.last_body.lock() = Some(body);
    (StatusCode::CREATED, envelope(201, "Created", report)).into_response()
}

async fn inspection_report(Path(id): Path<String>) -> Json<Value> {
    envelope(
        200,
        "ok",
        json!({
            "id": id,
            "inspectionRequestId": "req-1",
            "inspectionReportDetail": [{
                "id": "ird-1",
                "itemId": "mat-1",
                "quantityByPack": 10,
                "approvedQuantityByPack": 8,
                "defectQuantityByPack": 2,
                "defects": [{ "defectId": "def-1", "quantityByPiece": 4 }]
            }]
        }),
    )
}

fn inventory_report_json(id: &str) -> Value {
    json!({
        "id": id,
        "code": "INV-001",
        "status": "IN_PROGRESS",
        "inventoryReportDetail": [
            { "id": "d1", "expectedQuantity": 10, "actualQuantity": 12 },
            { "id": "d2", "expectedQuantity": 5 }
        ]
    })
}

async fn inventory_reports(
    State(state): State<Arc<MockState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Value> {
    *state.last_query.lock() = params;
    envelope(200, "ok", page_of(json!([inventory_report_json("inv-1")])))
}

async fn inventory_report(Path(id): Path<String>) -> Json<Value> {
    envelope(200, "ok", inventory_report_json(&id))
}

fn plan_json(id: &str) -> Value {
    json!({
        "id": id,
        "code": "PLAN-001",
        "title": "Quarterly count",
        "status": "IN_PROGRESS",
        "inventoryReportPlanDetail": [{ "id": "pd-1", "inventoryReport": inventory_report_json("inv-1") }]
    })
}

async fn inventory_report_plans(
    State(state): State<Arc<MockState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Value> {
    *state.last_query.lock() = params;
    envelope(200, "ok", page_of(json!([plan_json("plan-1")])))
}

async fn inventory_report_plan(Path(id): Path<String>) -> Json<Value> {
    envelope(200, "ok", plan_json(&id))
}

async fn receipt_by_code(Path(code): Path<String>) -> Json<Value> {
    envelope(
        200,
        "ok",
        json!({ "id": "rc-1", "code": code, "type": "MATERIAL", "status": "AVAILABLE", "quantityByPack": 5 }),
    )
}

async fn spawn_backend() -> (SocketAddr, Arc<MockState>) {
    let state = Arc::new(MockState::default());
    let app = Router::new()
        .route("/auth/sign-in", post(sign_in))
        .route("/auth/refresh-token", post(refresh_token))
        .route("/auth/confirm-otp", post(confirm_otp))
        .route("/defect", get(defects))
        .route("/import-request", get(import_requests))
        .route("/inspection-request", get(inspection_requests))
        .route("/inspection-request/statistic", get(statistic))
        .route("/inspection-request/{id}", get(inspection_request))
        .route("/inspection-report", post(create_inspection_report))
        .route("/inspection-report/{id}", get(inspection_report))
        .route("/inventory-report", get(inventory_reports))
        .route("/inventory-report/{id}", get(inventory_report))
        .route("/inventory-report/{id}/record", patch(record_inventory))
        .route("/inventory-report-plan", get(inventory_report_plans))
        .route("/inventory-report-plan/{id}", get(inventory_report_plan))
        .route("/receipt/by-code/{code}", get(receipt_by_code))
        .with_state(Arc::clone(&state));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });
    (addr, state)
}

fn client_for(addr: SocketAddr) -> ApiClient {
    ApiClient::new(
        Config::new(format!("http://{}", addr)),
        Arc::new(AuthContext::in_memory()),
    )
    .expect("client")
}

#[tokio::test]
async fn bearer_is_sent_after_sign_in_and_dropped_after_logout() {
    let (addr, state) = spawn_backend().await;
    let client = client_for(addr);

    api::inspection_request::statistic(&client).await.unwrap();
    assert_eq!(*state.last_authorization.lock(), None);

    let response = api::auth::sign_in(&client, "qc@factory.vn".to_string(), "secret".to_string())
        .await
        .unwrap();
    assert_eq!(response.account.id, "acc-1");
    assert!(client.auth().is_authenticated());

    api::inspection_request::statistic(&client).await.unwrap();
    assert_eq!(state.last_authorization.lock().as_deref(), Some("Bearer token-abc"));

    api::auth::logout(&client).unwrap();
    api::inspection_request::statistic(&client).await.unwrap();
    assert_eq!(*state.last_authorization.lock(), None);
}

#[tokio::test]
async fn rejected_sign_in_keeps_server_message() {
    let (addr, _state) = spawn_backend().await;
    let client = client_for(addr);

    let err = api::auth::sign_in(&client, "qc@factory.vn".to_string(), "wrong".to_string())
        .await
        .unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.user_message(), "Invalid email or password");
    assert!(!client.auth().is_authenticated());
}

#[tokio::test]
async fn confirm_otp_starts_a_session() {
    let (addr, state) = spawn_backend().await;
    let client = client_for(addr);

    let err = api::auth::confirm_otp(&client, "staff@factory.vn".to_string(), "000000".to_string())
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "Invalid OTP");
    assert!(!client.auth().is_authenticated());

    let response = api::auth::confirm_otp(&client, "staff@factory.vn".to_string(), "123456".to_string())
        .await
        .unwrap();
    assert_eq!(response.account.email, "staff@factory.vn");
    assert_eq!(client.auth().refresh_token().as_deref(), Some("refresh-otp"));

    api::inspection_request::statistic(&client).await.unwrap();
    assert_eq!(state.last_authorization.lock().as_deref(), Some("Bearer token-otp"));
}

#[tokio::test]
async fn defect_and_import_request_lists() {
    let (addr, state) = spawn_backend().await;
    let client = client_for(addr);

    let query = QueryDescriptor::new().filter(Filter::eq("type", "MATERIAL"));
    let defects = api::defect::list(&client, &query).await.unwrap();
    assert_eq!(defects.data.len(), 1);
    assert_eq!(defects.data[0].description, "Torn fabric");
    assert_eq!(defects.data[0].defect_type, GoodsType::Material);
    assert!(state
        .last_query
        .lock()
        .contains(&("filter".to_string(), "type||$eq||MATERIAL".to_string())));

    let imports = api::import_request::list(&client, &QueryDescriptor::new().page(5, 0))
        .await
        .unwrap();
    assert_eq!(imports.data[0].code.as_deref(), Some("IR-001"));
    assert_eq!(imports.data[0].status, ImportRequestStatus::Inspecting);
    assert_eq!(imports.data[0].request_type, ImportRequestType::MaterialByPo);
    assert!(!imports.has_next());
}

#[tokio::test]
async fn inspection_report_is_posted_and_read_back() {
    let (addr, state) = spawn_backend().await;
    let client = client_for(addr);

    let report = CreateInspectionReport {
        inspection_request_id: "req-1".to_string(),
        note: Some("Two packs damp".to_string()),
        inspection_report_detail: vec![CreateInspectionReportDetail {
            item_id: "mat-1".to_string(),
            quantity_by_pack: 10,
            approved_quantity_by_pack: 8,
            defect_quantity_by_pack: 2,
            defects: vec![InspectionReportDetailDefect {
                defect_id: "def-1".to_string(),
                quantity_by_piece: 4,
                description: None,
            }],
        }],
    };
    let created = api::inspection_report::create(&client, &report).await.unwrap();
    assert_eq!(created.id, "rep-1");
    assert_eq!(created.inspection_request_id, "req-1");
    assert_eq!(created.inspection_report_detail[0].approved_quantity_by_pack, 8);

    let body = state.last_body.lock().clone().unwrap();
    assert_eq!(body["inspectionRequestId"], "req-1");
    assert_eq!(body["note"], "Two packs damp");
    assert_eq!(body["inspectionReportDetail"][0]["defects"][0]["defectId"], "def-1");

    let fetched = api::inspection_report::get(&client, "rep-7").await.unwrap();
    assert_eq!(fetched.id, "rep-7");
    assert_eq!(fetched.inspection_report_detail[0].defects[0].quantity_by_piece, 4);
}

#[tokio::test]
async fn inventory_report_list_and_detail() {
    let (addr, _state) = spawn_backend().await;
    let client = client_for(addr);

    let page = api::inventory_report::list(&client, &QueryDescriptor::new().page(10, 0))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].status, InventoryReportStatus::InProgress);

    let report = api::inventory_report::get(&client, "inv-3").await.unwrap();
    assert_eq!(report.id, "inv-3");
    assert_eq!(report.inventory_report_detail[0].discrepancy(), Some(2));
    assert_eq!(report.inventory_report_detail[1].discrepancy(), None);
}

#[tokio::test]
async fn inventory_report_plan_list_and_detail() {
    let (addr, state) = spawn_backend().await;
    let client = client_for(addr);

    let query = QueryDescriptor::new().filter(Filter::eq("status", "IN_PROGRESS"));
    let page = api::inventory_report_plan::list(&client, &query).await.unwrap();
    assert_eq!(page.data[0].title, "Quarterly count");
    assert_eq!(
        *state.last_query.lock(),
        vec![("filter".to_string(), "status||$eq||IN_PROGRESS".to_string())]
    );

    let plan = api::inventory_report_plan::get(&client, "plan-2").await.unwrap();
    assert_eq!(plan.id, "plan-2");
    assert_eq!(plan.status, InventoryReportPlanStatus::InProgress);
    let nested = plan.inventory_report_plan_detail[0].inventory_report.as_ref().unwrap();
    assert_eq!(nested.id, "inv-1");
}

#[tokio::test]
async fn list_query_reaches_backend_in_wire_order() {
    let (addr, state) = spawn_backend().await;
    let client = client_for(addr);

    let query = QueryDescriptor::new()
        .filter(Filter::eq("status", "INSPECTING"))
        .filter(Filter::in_set("type", ["MATERIAL", "PRODUCT"]))
        .filter(Filter::not_null("inspectionReport"))
        .order_by(Sort::desc("createdAt"))
        .page(10, 2);

    let page = api::inspection_request::list(&client, &query).await.unwrap();
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total, 12);
    assert!(page.has_next());

    let expected: Vec<(String, String)> = [
        ("limit", "10"),
        ("offset", "20"),
        ("filter", "status||$eq||INSPECTING"),
        ("filter", "type||$in||MATERIAL,PRODUCT"),
        ("filter", "inspectionReport||$notnull"),
        ("order", "createdAt,desc"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(*state.last_query.lock(), expected);
}

#[tokio::test]
async fn concurrent_identical_queries_hit_backend_once() {
    let (addr, state) = spawn_backend().await;
    let service: Arc<dyn ApiService> = Arc::new(client_for(addr));
    let queries = Queries::new(service, None);

    let query = QueryDescriptor::new()
        .filter(Filter::eq("status", "INSPECTING"))
        .page(10, 0);
    let handles: Vec<_> = (0..5).map(|_| queries.inspection_requests(query.clone())).collect();

    let results = join_all(handles.iter().map(|h| h.fetch())).await;
    assert!(results.iter().all(|r| r.is_ok()));
    assert_eq!(state.list_hits.load(Ordering::SeqCst), 1);

    // Cached
    handles[0].fetch().await.unwrap();
    assert_eq!(state.list_hits.load(Ordering::SeqCst), 1);

    // Different page is a different key
    queries.inspection_requests(query.clone().page(10, 1)).fetch().await.unwrap();
    assert_eq!(state.list_hits.load(Ordering::SeqCst), 2);

    handles[1].refetch().await.unwrap();
    assert_eq!(state.list_hits.load(Ordering::SeqCst), 3);

    queries.invalidate_endpoint("inspection-request");
    assert!(!handles[0].state().is_success());
    handles[0].fetch().await.unwrap();
    assert_eq!(state.list_hits.load(Ordering::SeqCst), 4);
}

#[tokio::test]
async fn failed_query_is_not_cached() {
    let (addr, state) = spawn_backend().await;
    let service: Arc<dyn ApiService> = Arc::new(client_for(addr));
    let queries = Queries::new(service, None);
    state.fail_next_statistic.store(true, Ordering::SeqCst);

    let handle = queries.inspection_statistic();
    let err = handle.fetch().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    assert!(handle.state().is_error());

    let statistic = handle.fetch().await.unwrap();
    assert_eq!(statistic.passed, 3);
    assert!(handle.state().is_success());
    assert_eq!(state.statistic_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn not_found_becomes_error_envelope() {
    let (addr, _state) = spawn_backend().await;
    let client = client_for(addr);

    let result = client
        .execute::<(), InspectionRequest>(Method::GET, &["inspection-request", "missing"], &[], None)
        .await;
    assert_eq!(
        result.clone().unwrap_err(),
        ApiError::Server {
            status: 404,
            message: "Inspection request not found".to_string(),
            errors: Some(vec!["id does not exist".to_string()]),
        }
    );

    let envelope: Envelope<InspectionRequest> = settle(result);
    assert_eq!(envelope.status_code, 404);
    assert!(envelope.data.is_none());
    assert_eq!(envelope.message, "Inspection request not found");
}

#[tokio::test]
async fn bare_success_body_is_the_payload() {
    let (addr, _state) = spawn_backend().await;
    let client = client_for(addr);

    let request = api::inspection_request::get(&client, "req-9").await.unwrap();
    assert_eq!(request.id, "req-9");
    assert_eq!(request.status, InspectionRequestStatus::Inspecting);
}

#[tokio::test]
async fn record_inventory_patches_counted_quantities() {
    let (addr, state) = spawn_backend().await;
    let client = client_for(addr);

    let record = RecordInventoryReport {
        details: vec![RecordInventoryDetail {
            inventory_report_detail_id: "d1".to_string(),
            actual_quantity: 9,
            note: None,
        }],
    };
    let report = api::inventory_report::record(&client, "inv-1", &record).await.unwrap();

    assert_eq!(report.id, "inv-1");
    assert_eq!(report.inventory_report_detail[0].discrepancy(), Some(-1));
    assert_eq!(
        *state.last_body.lock(),
        Some(json!({ "details": [{ "inventoryReportDetailId": "d1", "actualQuantity": 9 }] }))
    );
}

#[tokio::test]
async fn receipt_code_is_path_encoded() {
    let (addr, _state) = spawn_backend().await;
    let client = client_for(addr);

    let receipt = api::receipt::by_code(&client, "MRC 01").await.unwrap();
    assert_eq!(receipt.code, "MRC 01");
}

#[tokio::test]
async fn client_refreshes_tokens() {
    let (addr, _state) = spawn_backend().await;
    let client = client_for(addr);

    let response = client.refresh("refresh-abc").await.unwrap();
    assert_eq!(response.access_token, "token-refreshed");
    assert_eq!(response.refresh_token, None);
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let err = api::inspection_request::statistic(&client).await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
}
