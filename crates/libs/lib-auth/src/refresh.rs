//! # Token Refresh Scheduler
//!
//! One background task per [`AuthContext`] that renews the access token
//! shortly before it expires.
//!
//! ```text
//! ┌──────────────┐  session changed   ┌──────────────────────┐
//! │ AuthContext  │ ─────────────────▶ │ RefreshScheduler     │
//! │ (watch gen.) │                    │  plan: exp - lead    │
//! └──────────────┘ ◀───────────────── │  sleep / re-plan     │
//!        update_tokens()              │  TokenRefresher call │
//!                                     └──────────────────────┘
//! ```
//!
//! The task sleeps until `exp - lead`, re-planning whenever the session
//! changes. A 401 from the refresh endpoint ends the session; any other
//! failure is retried after [`RETRY_AFTER_FAILURE`]. Refreshes are never
//! closer together than [`MIN_REFRESH_INTERVAL`], even when the server hands
//! out tokens that live shorter than the lead.
//!
//! Sessions without a refresh token, or with an access token that carries no
//! readable `exp`, are never refreshed.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::RefreshTokenResponse;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use lib_core::Result;

use crate::claims;
use crate::context::AuthContext;

/// Pause before retrying after a refresh that failed for a reason other
/// than rejected credentials.
pub const RETRY_AFTER_FAILURE: Duration = Duration::from_secs(30);

/// Shortest gap between two successful refreshes.
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Something that can exchange a refresh token for new tokens.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    async fn refresh(&self, refresh_token: &str) -> Result<RefreshTokenResponse>;
}

/// Delay until a token expiring at `expires_at` should be refreshed.
///
/// A lead reaching past the representable date range means "now".
pub fn refresh_delay(expires_at: DateTime<Utc>, now: DateTime<Utc>, lead: Duration) -> Duration {
    let Ok(lead) = chrono::Duration::from_std(lead) else {
        return Duration::ZERO;
    };
    match expires_at.checked_sub_signed(lead) {
        Some(refresh_at) => lib_utils::seconds_until(refresh_at, now),
        None => Duration::ZERO,
    }
}

/// When to refresh the current session, if at all.
fn plan(auth: &AuthContext, lead: Duration) -> Option<Duration> {
    let session = auth.session()?;
    session.refresh_token.as_ref()?;

    match claims::expires_at(&session.access_token) {
        Ok(Some(expires_at)) => Some(refresh_delay(expires_at, lib_utils::now_utc(), lead)),
        Ok(None) => {
            tracing::debug!("Access token has no exp claim; not scheduling refresh");
            None
        }
        Err(e) => {
            tracing::debug!(error = %e, "Access token is not a readable JWT; not scheduling refresh");
            None
        }
    }
}

enum Outcome {
    Refreshed,
    SessionEnded,
    Failed,
}

async fn refresh_once(auth: &AuthContext, refresher: &dyn TokenRefresher) -> Outcome {
    let Some(refresh_token) = auth.refresh_token() else {
        return Outcome::SessionEnded;
    };

    let start = std::time::Instant::now();
    match refresher.refresh(&refresh_token).await {
        Ok(response) => {
            if let Err(e) = auth.update_tokens(response.access_token, response.refresh_token) {
                tracing::error!(error = %e, "Failed to store refreshed tokens");
                return Outcome::Failed;
            }
            tracing::info!(duration_ms = start.elapsed().as_millis(), "Access token refreshed");
            Outcome::Refreshed
        }
        Err(e) if e.is_unauthorized() => {
            tracing::warn!(error = %e, "Refresh token rejected; signing out");
            if let Err(e) = auth.logout() {
                tracing::error!(error = %e, "Failed to clear session after rejected refresh");
            }
            Outcome::SessionEnded
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                retry_in_secs = RETRY_AFTER_FAILURE.as_secs(),
                "Token refresh failed"
            );
            Outcome::Failed
        }
    }
}

/// Wait for `duration` or the next session change, whichever comes first.
/// Returns `false` once the context is gone.
async fn pause(changes: &mut watch::Receiver<u64>, duration: Duration) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(duration) => true,
        changed = changes.changed() => changed.is_ok(),
    }
}

/// Handle to the running refresh task. Dropping it stops the task.
pub struct RefreshScheduler {
    handle: JoinHandle<()>,
}

impl RefreshScheduler {
    /// Spawn the refresh task on the current tokio runtime.
    pub fn spawn(auth: Arc<AuthContext>, refresher: Arc<dyn TokenRefresher>, lead: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut changes = auth.subscribe();
            loop {
                changes.borrow_and_update();

                let Some(delay) = plan(&auth, lead) else {
                    if changes.changed().await.is_err() {
                        break;
                    }
                    continue;
                };

                tracing::debug!(delay_secs = delay.as_secs(), "Token refresh scheduled");
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {
                        match refresh_once(&auth, refresher.as_ref()).await {
                            Outcome::Refreshed => {
                                // Our own update bumped the generation.
                                changes.borrow_and_update();
                                if let Some(next) = plan(&auth, lead) {
                                    if next < MIN_REFRESH_INTERVAL {
                                        tracing::warn!(
                                            lead_secs = lead.as_secs(),
                                            next_in_secs = MIN_REFRESH_INTERVAL.as_secs(),
                                            "Refreshed token expires within the refresh lead"
                                        );
                                        if !pause(&mut changes, MIN_REFRESH_INTERVAL).await {
                                            break;
                                        }
                                    }
                                }
                            }
                            Outcome::Failed => {
                                if !pause(&mut changes, RETRY_AFTER_FAILURE).await {
                                    break;
                                }
                            }
                            Outcome::SessionEnded => {}
                        }
                    }
                    changed = changes.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("Token refresh task finished");
        });

        Self { handle }
    }

    pub fn stop(self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
