//! ocpanel - command-line admin panel for an OurChat server.
//!
//! Logs in against the server's auth service, keeps the session token in local
//! storage, and runs admin actions through the same guarded routes the web
//! panel exposes.

mod cli;
mod commands;
mod format;

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use ocpanel_core::{Config, RpcError};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::Cli;
use commands::Panel;

/// Prefix for daily-rotated log files
const LOG_FILE_PREFIX: &str = "ocpanel.log";

/// Initialize the tracing subscriber for logging.
///
/// Returns the file writer guard when file logging is on; keep it alive until exit.
fn init_tracing(log_dir: Option<&Path>) -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .with(filter)
        .init();

    guard
}

fn is_authentication_error(error: &anyhow::Error) -> bool {
    error
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<RpcError>(), Some(e) if e.is_authentication()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = Config::load().context("Failed to load config")?;
    config.apply_env_overrides();
    cli.apply(&mut config);

    let _log_guard = init_tracing(config.log_dir.as_deref());
    info!(base_address = %config.base_address, storage = %config.storage, "ocpanel starting");

    let mut panel = Panel::new(config)?;
    let result = panel.run(cli.command).await;

    if let Err(ref e) = result {
        if is_authentication_error(e) {
            eprintln!("The server rejected the session. Run `ocpanel login` again.");
        }
    }
    result
}
