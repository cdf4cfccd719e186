//! # Authentication Data Transfer Objects
//!
//! Request and response structures for the authentication endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /auth/sign-in` - [`SignInRequest`] -> [`SignInResponse`]
//! - `POST /auth/confirm-otp` - [`ConfirmOtpRequest`] -> [`SignInResponse`]
//! - `POST /auth/refresh-token` - [`RefreshTokenRequest`] -> [`RefreshTokenResponse`]
//!
//! ## Sign-in Flow
//!
//! ```text
//! POST /auth/sign-in
//! Content-Type: application/json
//!
//! {
//!   "email": "staff@factory.vn",
//!   "password": "MyPassword123!"
//! }
//! ```
//!
//! Response (inside the standard envelope):
//! ```text
//! {
//!   "accessToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "refreshToken": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "account": {
//!     "id": "2f0c...",
//!     "email": "staff@factory.vn",
//!     "role": "WAREHOUSE_STAFF"
//!   }
//! }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of an account. Decides which workflows a staff member sees.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    FactoryDirector,
    WarehouseManager,
    WarehouseStaff,
    ProductionManager,
    ProductionDepartment,
    PurchasingStaff,
    InspectionDepartment,
    #[serde(untagged)]
    Other(String),
}

/// Account information (public, safe to persist on the device)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Human readable name, falling back to the email address.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            (None, Some(last)) => last.clone(),
            (None, None) => self.email.clone(),
        }
    }
}

/// Sign-in request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// Successful sign-in (or OTP confirmation) payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SignInResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub account: Account,
}

/// OTP confirmation request sent after a sign-in that requires a second factor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConfirmOtpRequest {
    pub email: String,
    pub otp: String,
}

/// Token refresh request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Token refresh response. The backend may rotate the refresh token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_deserializes_unknown_role() {
        let json = r#"{"id":"1","email":"a@b.vn","role":"SECURITY_GUARD"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.role, Role::Other("SECURITY_GUARD".to_string()));
    }

    #[test]
    fn test_account_known_role_and_display_name() {
        let json = r#"{"id":"1","email":"a@b.vn","firstName":"Lan","lastName":"Tran","role":"WAREHOUSE_STAFF"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.role, Role::WarehouseStaff);
        assert_eq!(account.display_name(), "Lan Tran");
    }

    #[test]
    fn test_sign_in_response_camel_case() {
        let json = r#"{"accessToken":"abc","account":{"id":"1","email":"a@b.vn","role":"ADMIN"}}"#;
        let response: SignInResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.access_token, "abc");
        assert!(response.refresh_token.is_none());
        assert_eq!(response.account.role, Role::Admin);
    }
}
