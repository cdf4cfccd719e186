//! Stockcheck CLI - warehouse inventory and inspection client.

mod args;
mod commands;
mod logging;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use lib_auth::{AuthContext, FileStore, MemoryStore, RefreshScheduler, SessionStore, TokenRefresher};
use lib_client::{ApiClient, ApiService, Queries};
use lib_core::config::{core_config, init_config};
use lib_core::{ApiError, Envelope};

use args::Cli;
use commands::AppContext;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init(&logging::LogConfig::from_env());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<ApiError>() {
                // Backend failures are reported in the envelope shape
                Some(api_error) => {
                    let envelope: Envelope<()> = api_error.clone().into();
                    match serde_json::to_string_pretty(&envelope) {
                        Ok(text) => eprintln!("{}", text),
                        Err(_) => eprintln!("Error: {}", api_error.user_message()),
                    }
                }
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    init_config()?;
    let config = core_config()?.clone();

    let store: Arc<dyn SessionStore> = match &config.session_file {
        Some(path) => Arc::new(FileStore::new(path.clone())),
        None => Arc::new(MemoryStore::new()),
    };
    let auth = Arc::new(AuthContext::new(store));
    auth.restore()?;

    let client = Arc::new(ApiClient::new(config.clone(), Arc::clone(&auth))?);
    let _scheduler = RefreshScheduler::spawn(
        Arc::clone(&auth),
        Arc::clone(&client) as Arc<dyn TokenRefresher>,
        config.refresh_lead(),
    );

    let service: Arc<dyn ApiService> = client;
    let ctx = AppContext {
        auth,
        queries: Queries::new(Arc::clone(&service), config.cache_stale_after()),
        service,
    };

    commands::run(&ctx, cli.command).await
}
