//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the server
//! configuration from YAML and applying environment overrides.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PayrollError, PayrollResult};

use super::types::{ServerConfig, StorageBackend};

/// Name of the configuration file inside the configuration directory.
pub const CONFIG_FILE: &str = "server.yaml";

/// Loads and validates the server configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// └── server.yaml   # host, port, cors_origins, storage
/// ```
///
/// # Environment Overrides
///
/// | Variable               | Overrides                       |
/// |------------------------|---------------------------------|
/// | `PAYROLL_HOST`         | `host`                          |
/// | `PORT`                 | `port`                          |
/// | `PAYROLL_CORS_ORIGINS` | `cors_origins` (comma separated)|
/// | `PAYROLL_STORAGE`      | `storage.backend`               |
/// | `PAYROLL_DATA_DIR`     | `storage.data_dir`              |
///
/// # Example
///
/// ```no_run
/// use certified_payroll::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?
///     .with_overrides(|key| std::env::var(key).ok())?;
/// println!("Listening on port {}", loader.config().port);
/// # Ok::<(), certified_payroll::error::PayrollError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: ServerConfig,
}

impl ConfigLoader {
    /// Loads `server.yaml` from the specified directory.
    ///
    /// Returns `ConfigNotFound` when the file is missing and
    /// `ConfigParseError` when it is not valid YAML for [`ServerConfig`].
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let file = path.as_ref().join(CONFIG_FILE);
        let config = Self::load_yaml(&file)?;
        let loader = Self { config };
        loader.validate()?;
        Ok(loader)
    }

    /// Loads the configuration, falling back to defaults if the file is missing.
    ///
    /// A file that exists but fails to parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        match Self::load(path) {
            Err(PayrollError::ConfigNotFound { .. }) => Self::from_config(ServerConfig::default()),
            other => other,
        }
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: ServerConfig) -> PayrollResult<Self> {
        let loader = Self { config };
        loader.validate()?;
        Ok(loader)
    }

    fn load_yaml(path: &Path) -> PayrollResult<ServerConfig> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PayrollError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Applies overrides read through `lookup`, usually `std::env::var`.
    pub fn with_overrides<F>(mut self, lookup: F) -> PayrollResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("PAYROLL_HOST") {
            self.config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            self.config.port = port.trim().parse().map_err(|_| PayrollError::InvalidConfig {
                field: "port".to_string(),
                message: format!("'{}' is not a valid port", port),
            })?;
        }

        if let Some(origins) = lookup("PAYROLL_CORS_ORIGINS") {
            self.config.cors_origins = origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect();
        }

        if let Some(backend) = lookup("PAYROLL_STORAGE") {
            self.config.storage.backend = match backend.trim().to_lowercase().as_str() {
                "memory" => StorageBackend::Memory,
                "file" => StorageBackend::File,
                other => {
                    return Err(PayrollError::InvalidConfig {
                        field: "storage.backend".to_string(),
                        message: format!("unknown backend '{}'", other),
                    });
                }
            };
        }

        if let Some(dir) = lookup("PAYROLL_DATA_DIR") {
            self.config.storage.data_dir = Some(PathBuf::from(dir));
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> PayrollResult<()> {
        if self.config.storage.backend == StorageBackend::File
            && self.config.storage.data_dir.is_none()
        {
            return Err(PayrollError::InvalidConfig {
                field: "storage.data_dir".to_string(),
                message: "required when storage.backend is 'file'".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> ServerConfig {
        self.config
    }
}
