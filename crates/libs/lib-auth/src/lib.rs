//! # Authentication Library
//!
//! Session state for the API client: the in-memory [`AuthContext`], its
//! persistent [`SessionStore`], token claim decoding and the single
//! [`RefreshScheduler`].

pub mod claims;
pub mod context;
pub mod refresh;
pub mod store;

// Re-export commonly used types
pub use claims::{decode_claims, expires_at, TokenClaims};
pub use context::{AuthContext, Session};
pub use refresh::{RefreshScheduler, TokenRefresher};
pub use store::{FileStore, MemoryStore, SessionStore};
