//! gapi - command line access to a dashboard server's admin API.
//!
//! Connection settings come from `~/.config/gapi/config.json`, then the
//! `GRAFANA_*` environment variables (a `.env` file is honored), then flags.

mod commands;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gapi_core::{ApiClient, Config};

use commands::Command;

/// Directory for an additional plain-text log file
const LOG_DIR_ENV: &str = "GAPI_LOG_DIR";

const LOG_FILE: &str = "gapi.log";

#[derive(Debug, Parser)]
#[command(
    name = "gapi",
    about = "Manage users, organizations, and dashboards on a dashboard server",
    version
)]
struct Cli {
    /// Server base URL, e.g. `http://localhost:3000`.
    #[arg(long, global = true, value_name = "url")]
    url: Option<String>,
    /// `user:password` for basic auth, or an API token.
    #[arg(long, global = true, value_name = "auth")]
    auth: Option<String>,
    #[command(subcommand)]
    command: Command,
}

/// Initialize the tracing subscriber for logging.
/// The returned guard flushes the log file on drop.
fn init_tracing() -> Option<WorkerGuard> {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let (file_layer, guard) = match std::env::var_os(LOG_DIR_ENV) {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(fmt::layer().with_ansi(false).with_writer(writer)), Some(guard))
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

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = init_tracing();

    let mut config = Config::load()?;
    config.apply_process_env()?;
    if let Some(url) = cli.url {
        config.url = url;
    }
    if let Some(auth) = cli.auth {
        config.auth = Some(auth);
    }

    if let Command::Config(action) = cli.command {
        return commands::run_config(&config, action);
    }

    info!(url = %config.url, "Connecting to dashboard server");
    let client = ApiClient::from_config(&config).context("Failed to create API client")?;
    commands::run(&client, cli.command).await
}
