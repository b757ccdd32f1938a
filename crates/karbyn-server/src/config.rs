//! Server configuration.
//!
//! Three layers, strongest first: command line / environment, optional TOML
//! config file, built-in defaults. The archive path is a single string input
//! resolved once at startup; there is no dynamic reconfiguration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use karbyn_core::{Error, Result};

/// Default archive location relative to the working directory.
pub const DEFAULT_DATA_PATH: &str = "data/database.jsonld.zip";

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

/// Values read from an optional TOML config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Path to the zipped JSON-LD archive.
    pub data_path: Option<PathBuf>,
    /// Address to listen on, `host:port`.
    pub listen_addr: Option<String>,
    /// Open the archive at startup instead of on first request.
    pub preload: Option<bool>,
}

impl FileConfig {
    /// Load a config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| Error::config(format!("invalid config {}: {e}", path.display())))
    }
}

/// Fully resolved server settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Path to the zipped JSON-LD archive.
    pub data_path: PathBuf,
    /// Address the server binds to.
    pub listen_addr: SocketAddr,
    /// Whether to open the archive at startup.
    pub preload: bool,
}

impl Settings {
    /// Resolve settings from CLI/env values and an optional config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the listen address does not parse.
    pub fn resolve(
        cli_data_path: Option<PathBuf>,
        cli_listen_addr: Option<String>,
        cli_preload: bool,
        file: FileConfig,
    ) -> Result<Self> {
        let data_path = cli_data_path
            .or(file.data_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let listen_raw = cli_listen_addr
            .or(file.listen_addr)
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_raw
            .parse()
            .map_err(|e| Error::config(format!("invalid listen address {listen_raw}: {e}")))?;

        Ok(Self {
            data_path,
            listen_addr,
            preload: cli_preload || file.preload.unwrap_or(false),
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
