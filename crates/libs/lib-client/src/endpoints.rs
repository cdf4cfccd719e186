//! # Backend Endpoints
//!
//! Path segments relative to the configured base URL.
//!
//! | Operation | Method | Path |
//! |---|---|---|
//! | sign in | POST | `/auth/sign-in` |
//! | refresh token | POST | `/auth/refresh-token` |
//! | confirm OTP | POST | `/auth/confirm-otp` |
//! | defect list | GET | `/defect` |
//! | import-request list | GET | `/import-request` |
//! | inspection-request list / detail / statistic | GET | `/inspection-request`, `/{id}`, `/statistic` |
//! | inspection-report create / detail | POST / GET | `/inspection-report`, `/{id}` |
//! | inventory-report list / detail | GET | `/inventory-report`, `/{id}` |
//! | inventory-report record | PATCH | `/inventory-report/{id}/record` |
//! | inventory-report-plan list / detail | GET | `/inventory-report-plan`, `/{id}` |
//! | receipt by code | GET | `/receipt/by-code/{code}` |

pub const AUTH: &str = "auth";
pub const SIGN_IN: &str = "sign-in";
pub const REFRESH_TOKEN: &str = "refresh-token";
pub const CONFIRM_OTP: &str = "confirm-otp";

pub const DEFECT: &str = "defect";
pub const IMPORT_REQUEST: &str = "import-request";
pub const INSPECTION_REQUEST: &str = "inspection-request";
pub const INSPECTION_REPORT: &str = "inspection-report";
pub const INVENTORY_REPORT: &str = "inventory-report";
pub const INVENTORY_REPORT_PLAN: &str = "inventory-report-plan";
pub const RECEIPT: &str = "receipt";

pub const STATISTIC: &str = "statistic";
pub const RECORD: &str = "record";
pub const BY_CODE: &str = "by-code";
