//! # Backend API Endpoints
//!
//! One module per backend resource. Every function takes the shared
//! [`ApiClient`](crate::ApiClient), goes through its executor and returns
//! `Result<T, ApiError>`.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs                    - Module exports
//! ├── auth.rs                   - Sign-in, OTP confirmation, token refresh, logout
//! ├── defect.rs                 - Defect catalogue
//! ├── import_request.rs         - Import requests
//! ├── inspection_request.rs     - Inspection requests and statistics
//! ├── inspection_report.rs      - Inspection reports
//! ├── inventory_report.rs       - Inventory reports and counting
//! ├── inventory_report_plan.rs  - Inventory plans
//! └── receipt.rs                - Receipt lookup
//! ```

pub mod auth;
pub mod defect;
pub mod import_request;
pub mod inspection_report;
pub mod inspection_request;
pub mod inventory_report;
pub mod inventory_report_plan;
pub mod receipt;
