//! Configuration loading for the certified payroll server.
//!
//! This module loads the server configuration from `server.yaml`, covering
//! the bind address, CORS origins, and document store backend.
//!
//! # Example
//!
//! ```no_run
//! use certified_payroll::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Storage backend: {:?}", config.config().storage.backend);
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_FILE, ConfigLoader};
pub use types::{ServerConfig, StorageBackend, StorageConfig};
