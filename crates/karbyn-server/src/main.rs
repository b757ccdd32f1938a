#![forbid(unsafe_code)]

//! Karbyn LCA catalog server.
//!
//! Binds the HTTP facade from `karbyn-api` around a lazily-loaded archive
//! catalog. The archive is opened on the first listing request unless
//! `--preload` asks for it at startup.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use karbyn_api::AppState;
use karbyn_store::Catalog;

mod config;

use config::{FileConfig, Settings};

/// Karbyn — archive-backed LCA catalog server
#[derive(Parser, Debug)]
#[command(name = "karbyn-server")]
#[command(version, about = "Serve process and impact-method listings from a zipped JSON-LD archive", long_about = None)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the zipped JSON-LD archive
    #[arg(long, env = "KARBYN_DATA_PATH")]
    data_path: Option<PathBuf>,

    /// Address to listen on, host:port
    #[arg(long, env = "KARBYN_LISTEN_ADDR")]
    listen_addr: Option<String>,

    /// Open the archive at startup instead of on first request
    #[arg(long)]
    preload: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(args.data_path, args.listen_addr, args.preload, file)?;

    let catalog = Arc::new(Catalog::new(&settings.data_path));
    if settings.preload {
        catalog
            .ensure_loaded()
            .context("preload requested but the archive could not be opened")?;
        tracing::info!(path = %settings.data_path.display(), "archive preloaded");
    } else {
        tracing::info!(
            path = %settings.data_path.display(),
            "archive will be opened on first request"
        );
    }

    let listener = TcpListener::bind(settings.listen_addr)
        .await
        .with_context(|| format!("cannot bind {}", settings.listen_addr))?;

    karbyn_api::server::serve(listener, AppState::new(catalog))
        .await
        .context("server terminated")?;

    Ok(())
}
