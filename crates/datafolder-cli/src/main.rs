//! Serve a folder of JSON, CSV and Parquet files as a read-only REST API.

mod banner;
mod error;
mod folder;

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use datafolder_core::Catalog;
use datafolder_server::{
    ServerConfig,
    config::{DEFAULT_HOST, DEFAULT_PORT},
};
use snafu::ResultExt;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult, PortInUseSnafu, ServerSnafu};

#[derive(Debug, Parser)]
#[command(name = "datafolder", version, about)]
struct Cli {
    /// Folder containing .json, .csv or .parquet files
    folder: PathBuf,

    /// Port to serve on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Host to bind to
    #[arg(short = 'H', long, default_value_t = DEFAULT_HOST.to_string())]
    host: String,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A subscriber may already be installed; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging();

    folder::validate(&cli.folder)?;

    let catalog = Catalog::load(&cli.folder).map_err(|source| {
        if source.is_permission_denied() {
            CliError::PermissionDenied {
                path: cli.folder.clone(),
            }
        } else {
            CliError::Load { source }
        }
    })?;

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
    };
    let listener = datafolder_server::bind(&config).await.map_err(|e| {
        if e.is_addr_in_use() {
            PortInUseSnafu {
                port: config.port,
                folder: cli.folder.clone(),
            }
            .build()
        } else {
            CliError::Server { source: e }
        }
    })?;

    println!(
        "{}",
        banner::render(&cli.folder, &config.base_url(), &catalog)
    );

    datafolder_server::serve(listener, Arc::new(catalog))
        .await
        .context(ServerSnafu)
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
