//! # Authentication Endpoints
//!
//! Sign-in and OTP confirmation store the returned session in the client's
//! [`AuthContext`](lib_auth::AuthContext); logout is purely local.

use reqwest::Method;
use shared::{ConfirmOtpRequest, RefreshTokenRequest, RefreshTokenResponse, SignInRequest, SignInResponse};

use lib_core::Result;

use crate::client::ApiClient;
use crate::endpoints::{AUTH, CONFIRM_OTP, REFRESH_TOKEN, SIGN_IN};

/// Sign in with email and password and keep the session.
#[tracing::instrument(skip(client, email, password), fields(email = %email))]
pub async fn sign_in(client: &ApiClient, email: String, password: String) -> Result<SignInResponse> {
    tracing::info!("Attempting sign-in");
    let request = SignInRequest { email, password };

    let response: SignInResponse = client
        .send_json(Method::POST, &[AUTH, SIGN_IN], &request)
        .await?;
    client.auth().sign_in(response.clone().into())?;
    Ok(response)
}

/// Confirm a one-time password and keep the resulting session.
#[tracing::instrument(skip(client, email, otp), fields(email = %email))]
pub async fn confirm_otp(client: &ApiClient, email: String, otp: String) -> Result<SignInResponse> {
    let request = ConfirmOtpRequest { email, otp };

    let response: SignInResponse = client
        .send_json(Method::POST, &[AUTH, CONFIRM_OTP], &request)
        .await?;
    client.auth().sign_in(response.clone().into())?;
    Ok(response)
}

/// Exchange a refresh token for new tokens. Does not touch the session.
pub async fn refresh_token(client: &ApiClient, refresh_token: &str) -> Result<RefreshTokenResponse> {
    let request = RefreshTokenRequest {
        refresh_token: refresh_token.to_string(),
    };
    client
        .send_json(Method::POST, &[AUTH, REFRESH_TOKEN], &request)
        .await
}

/// Forget the session. No request is sent.
pub fn logout(client: &ApiClient) -> Result<()> {
    client.auth().logout()
}
