//! # Server Configuration
//!
//! TOML configuration for the HTTP server, loaded from `registrar.toml`
//! (or a path given with `--config`). CLI flags override file values;
//! everything has a sensible default so the file is optional.
//!
//! ```toml
//! host = "0.0.0.0"
//! port = 8080
//! seed_demo = true
//! ```

use registrar_core::RegistrarError;
use serde::Deserialize;
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "registrar.toml";

// =============================================================================
// SERVER CONFIG
// =============================================================================

/// Settings for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Load the demo dataset on startup. The store is unpersisted, so with
    /// this off every restart begins empty.
    pub seed_demo: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            seed_demo: true,
        }
    }
}

impl ServerConfig {
    /// Parse a config file.
    pub fn load(path: &Path) -> Result<Self, RegistrarError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            RegistrarError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        toml::from_str(&raw).map_err(|e| {
            RegistrarError::Config(format!("Invalid config '{}': {}", path.display(), e))
        })
    }

    /// Load an explicit path, or `registrar.toml` when it exists, or
    /// defaults. An explicit path that cannot be read is an error; the
    /// implicit default file is optional.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, RegistrarError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// The `host:port` string to bind the listener to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// TESTS
// =============================================================================
