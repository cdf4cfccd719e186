//! # Shared Data Transfer Objects Library
//!
//! This library mirrors the JSON contract of the inventory and inspection
//! backend. The types are passive: they are deserialized, displayed and
//! discarded. No client-side invariants are enforced here.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Accounts, sign-in, OTP and token refresh
//!   - **[`dto::inspection`]**: Inspection requests, reports and statistics
//!   - **[`dto::inventory`]**: Inventory reports and report plans
//!   - **[`dto::warehouse`]**: Defects, import requests and receipts
//!   - **[`dto::pagination`]**: The list wrapper returned by every list endpoint
//!
//! ## Wire Format
//!
//! The backend speaks **camelCase** JSON, so every DTO carries
//! `#[serde(rename_all = "camelCase")]`. Optional fields are omitted when
//! `None`. Status and type enums keep an `Other(String)` arm so a value added
//! on the backend does not break deserialization of a whole page.
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::auth::SignInRequest;
//!
//! let request = SignInRequest {
//!     email: "staff@factory.vn".to_string(),
//!     password: "secret".to_string(),
//! };
//! let body = serde_json::to_string(&request).unwrap();
//! assert_eq!(body, r#"{"email":"staff@factory.vn","password":"secret"}"#);
//! ```

pub mod dto;

// Re-export commonly used types for convenience
// Note: Wildcard re-exports are used here since shared is a DTO library
// where all exports are meant to be public API
pub use dto::*;
