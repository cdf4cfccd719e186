//! # Stockcheck API Client
//!
//! Typed client for the warehouse inventory and inspection backend.
//!
//! ```text
//! QueryDescriptor ──▶ Queries / QueryHandle ──▶ QueryCache ──▶ ApiService
//!                                                               │
//!                                              ApiClient::execute (reqwest)
//!                                                               │
//!                                         Result<Envelope<T>, ApiError>
//! ```
//!
//! ## Module Structure
//!
//! - [`client`] - request executor
//! - [`api`] - one module per backend resource
//! - [`service`] - [`ApiService`] trait for dependency injection
//! - [`cache`] - de-duplicating query cache and handles
//! - [`queries`] - cached queries per endpoint
//! - [`dashboard`] - pass/fail and progress figures

pub mod api;
pub mod cache;
pub mod client;
pub mod dashboard;
pub mod endpoints;
pub mod queries;
pub mod service;

// Re-export commonly used types
pub use cache::{QueryCache, QueryHandle, QueryKey, QueryState, QueryStatus};
pub use client::{settle, ApiClient};
pub use dashboard::{InventoryProgress, PassFail};
pub use queries::Queries;
pub use service::ApiService;
