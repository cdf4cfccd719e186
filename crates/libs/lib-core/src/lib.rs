//! # Core Library
//!
//! Configuration, the unified error type, the result envelope and the
//! filter/sort translator shared by every client crate.

pub mod config;
pub mod envelope;
pub mod error;
pub mod query;

// Re-export commonly used types
pub use config::Config;
pub use envelope::Envelope;
pub use error::{ApiError, Result};
pub use query::{Filter, FilterDescriptor, FilterOp, Page, QueryDescriptor, Sort};
