//! # Client Configuration
//!
//! Configuration is loaded from environment variables (and a `.env` file when
//! present). Nothing about the backend location is compiled in apart from a
//! localhost development default.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `STOCKCHECK_API_URL` | `http://127.0.0.1:8080` | Backend base URL |
//! | `STOCKCHECK_TIMEOUT_SECS` | `30` | Per-request timeout |
//! | `STOCKCHECK_SESSION_FILE` | unset | Where the session is persisted; memory only when unset |
//! | `STOCKCHECK_REFRESH_LEAD_SECS` | `60` | Refresh the access token this long before it expires |
//! | `STOCKCHECK_CACHE_STALE_SECS` | unset | Cached list results go stale after this long; never when unset |
//!
//! ## Global Config Access
//!
//! ```rust,no_run
//! use lib_core::config::{core_config, init_config};
//!
//! init_config()?;
//! let api_url = &core_config()?.api_url;
//! # Ok::<(), lib_core::ApiError>(())
//! ```

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use lib_utils::envs;

use crate::error::{ApiError, Result};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REFRESH_LEAD_SECS: u64 = 60;

/// Upper bound for the refresh lead: one day.
pub const MAX_REFRESH_LEAD_SECS: u64 = 86_400;

/// Client configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL, without trailing slash
    pub api_url: String,

    /// Per-request timeout in seconds
    ///
    /// Valid range: 1-300
    pub timeout_secs: u64,

    /// Session persistence file
    pub session_file: Option<PathBuf>,

    /// Seconds before token expiry at which the refresh scheduler fires
    pub refresh_lead_secs: u64,

    /// Seconds after which a cached query result is refetched on access
    pub cache_stale_secs: Option<u64>,
}

impl Config {
    /// Configuration pointing at `api_url` with every other value defaulted.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            session_file: None,
            refresh_lead_secs: DEFAULT_REFRESH_LEAD_SECS,
            cache_stale_secs: None,
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_url = envs::get_env_or("STOCKCHECK_API_URL", DEFAULT_API_URL);

        let timeout_secs = envs::get_env_parse_or("STOCKCHECK_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .map_err(|e| ApiError::Config(format!("STOCKCHECK_TIMEOUT_SECS: {}", e)))?;

        let session_file = envs::get_env("STOCKCHECK_SESSION_FILE").ok().map(PathBuf::from);

        let refresh_lead_secs =
            envs::get_env_parse_or("STOCKCHECK_REFRESH_LEAD_SECS", DEFAULT_REFRESH_LEAD_SECS)
                .map_err(|e| ApiError::Config(format!("STOCKCHECK_REFRESH_LEAD_SECS: {}", e)))?;

        let cache_stale_secs = match envs::get_env_parse::<u64>("STOCKCHECK_CACHE_STALE_SECS") {
            Ok(secs) => Some(secs),
            Err(envs::Error::MissingEnv(_)) => None,
            Err(e) => {
                return Err(ApiError::Config(format!("STOCKCHECK_CACHE_STALE_SECS: {}", e)));
            }
        };

        Ok(Self {
            session_file,
            timeout_secs,
            refresh_lead_secs,
            cache_stale_secs,
            ..Self::new(api_url)
        })
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ApiError::Config(format!(
                "STOCKCHECK_API_URL must start with http:// or https://, got '{}'",
                self.api_url
            )));
        }

        if self.timeout_secs < 1 || self.timeout_secs > 300 {
            return Err(ApiError::Config(
                "STOCKCHECK_TIMEOUT_SECS must be between 1 and 300".to_string(),
            ));
        }

        if self.refresh_lead_secs > MAX_REFRESH_LEAD_SECS {
            return Err(ApiError::Config(format!(
                "STOCKCHECK_REFRESH_LEAD_SECS must be at most {}, got {}",
                MAX_REFRESH_LEAD_SECS, self.refresh_lead_secs
            )));
        }

        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn refresh_lead(&self) -> Duration {
        Duration::from_secs(self.refresh_lead_secs)
    }

    pub fn cache_stale_after(&self) -> Option<Duration> {
        self.cache_stale_secs.map(Duration::from_secs)
    }
}

/// Global configuration instance (initialized once at startup).
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Initialize the global configuration.
///
/// Reads `.env` if present, then the environment.
///
/// # Errors
///
/// Returns an error if:
/// - Environment variables are malformed
/// - Configuration validation fails
/// - Config has already been initialized
pub fn init_config() -> Result<()> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let config = Config::from_env()?;
    config.validate()?;

    CONFIG
        .set(config)
        .map_err(|_| ApiError::Config("Config has already been initialized".to_string()))
}

/// Get a reference to the global configuration.
pub fn core_config() -> Result<&'static Config> {
    CONFIG.get().ok_or_else(|| {
        ApiError::Config("Config must be initialized with init_config() before use".to_string())
    })
}
