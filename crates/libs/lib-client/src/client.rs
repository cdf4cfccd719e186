//! # API Client
//!
//! The request executor every endpoint goes through.
//!
//! [`ApiClient::execute`] takes a method, path segments, query pairs and an
//! optional JSON body; it attaches the bearer token from the
//! [`AuthContext`], sends the request and normalizes the outcome into
//! `Result<Envelope<T>, ApiError>`:
//!
//! - transport failure → [`ApiError::Network`]
//! - non-2xx → [`ApiError::Server`] carrying the server's message and errors
//!   when the body is structured, the generic message otherwise
//! - 2xx with an undecodable body → [`ApiError::Unknown`]
//!
//! There is no retry and no circuit breaker; the only guard is the
//! configured request timeout.

use std::sync::Arc;
use std::time::Instant;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use lib_auth::AuthContext;
use lib_core::{ApiError, Config, Envelope, Result};

/// HTTP client for the inventory and inspection backend.
///
/// Cheap to clone: the underlying `reqwest::Client` pools connections and
/// the auth context is shared.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: Config,
    base_url: Url,
    auth: Arc<AuthContext>,
}

impl ApiClient {
    /// Create a client for `config`, reading tokens from `auth`.
    pub fn new(config: Config, auth: Arc<AuthContext>) -> Result<Self> {
        config.validate()?;

        let base_url = Url::parse(&config.api_url)
            .map_err(|e| ApiError::Config(format!("Invalid API URL '{}': {}", config.api_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "API URL '{}' cannot be used as a base",
                config.api_url
            )));
        }

        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            base_url,
            auth,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn auth(&self) -> &Arc<AuthContext> {
        &self.auth
    }

    /// Absolute URL for `segments`, each percent-encoded as a path segment.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Send one request and normalize the outcome.
    #[tracing::instrument(skip(self, method, segments, query, body), fields(method = %method, path = %segments.join("/")))]
    pub async fn execute<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(String, String)],
        body: Option<&B>,
    ) -> Result<Envelope<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let start = Instant::now();
        let url = self.url(segments);

        let mut request = self.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(bearer) = self.auth.bearer() {
            request = request.header(AUTHORIZATION, bearer);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(
                error = %e,
                duration_ms = start.elapsed().as_millis(),
                "Request network error"
            );
            ApiError::network(e)
        })?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, status = status.as_u16(), "Failed to read response body");
            ApiError::network(e)
        })?;
        let duration = start.elapsed();

        if status.is_success() {
            if bytes.is_empty() {
                tracing::debug!(status = status.as_u16(), duration_ms = duration.as_millis(), "Empty response");
                return Ok(Envelope {
                    status_code: status.as_u16(),
                    data: None,
                    message: String::new(),
                    errors: None,
                });
            }

            let envelope = Envelope::from_success_body(status.as_u16(), &bytes).map_err(|e| {
                tracing::error!(
                    error = %e,
                    status = status.as_u16(),
                    duration_ms = duration.as_millis(),
                    "Response parse error"
                );
                e
            })?;
            tracing::debug!(
                status = status.as_u16(),
                duration_ms = duration.as_millis(),
                "Request succeeded"
            );
            Ok(envelope)
        } else {
            let error = ApiError::from_response(status.as_u16(), &bytes);
            tracing::warn!(
                status = status.as_u16(),
                error = %error,
                duration_ms = duration.as_millis(),
                "Request failed"
            );
            Err(error)
        }
    }

    /// `GET` and unwrap the payload.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(String, String)],
    ) -> Result<T> {
        self.execute::<(), T>(Method::GET, segments, query, None)
            .await?
            .into_data()
    }

    /// Send a JSON body and unwrap the payload.
    pub(crate) async fn send_json<B, T>(&self, method: Method, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute(method, segments, &[], Some(body))
            .await?
            .into_data()
    }
}

/// Collapse an executor result into the envelope shape, for callers that
/// render `{statusCode, data, message, errors}` uniformly.
pub fn settle<T>(result: Result<Envelope<T>>) -> Envelope<T> {
    result.unwrap_or_else(Envelope::from)
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &self.auth)
            .finish()
    }
}
