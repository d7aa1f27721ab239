//! Configuration types for the payroll server.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from `server.yaml`.

use std::path::PathBuf;

use serde::Deserialize;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

/// Which document store backend to run with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Keep documents in process memory.
    #[default]
    Memory,
    /// Persist documents as JSON-lines files under `data_dir`.
    File,
}

/// Storage section of the server configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StorageConfig {
    /// The backend to use.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Data directory for the file backend.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// The complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
    /// Document store settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            storage: StorageConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Returns true if any origin may call the API.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|origin| origin == "*")
    }

    /// Host and port in a form `TcpListener::bind` accepts.
    ///
    /// IPv6 hosts may be written bare (`::`) or bracketed (`[::1]`).
    pub fn bind_address(&self) -> (&str, u16) {
        let host = self
            .host
            .strip_prefix('[')
            .and_then(|inner| inner.strip_suffix(']'))
            .unwrap_or(&self.host);
        (host, self.port)
    }
}
