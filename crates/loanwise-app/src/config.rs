//! Application configuration

use loanwise_model::ModelConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "loanwise.yaml";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Model artifact to load at startup
    #[serde(default)]
    pub model: ModelConfig,

    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Optional YAML rule set replacing the built-in reasons
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_path: Option<PathBuf>,
}

/// HTTP listener settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_address")]
    pub address: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `address:port`, ready for parsing into a socket address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }
}

/// Values from the command line that take precedence over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub model_path: Option<PathBuf>,
    pub address: Option<String>,
    pub port: Option<u16>,
    pub rules_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from file and CLI overrides.
    ///
    /// A missing file means defaults; a malformed one is an error.
    pub fn load(config_path: impl AsRef<Path>, overrides: &Overrides) -> anyhow::Result<Self> {
        let config_path = config_path.as_ref();
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content).map_err(|e| {
                anyhow::anyhow!("invalid configuration in {}: {}", config_path.display(), e)
            })?
        } else {
            Self::default()
        };

        config.apply(overrides);
        Ok(config)
    }

    /// Apply CLI overrides
    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(path) = &overrides.model_path {
            self.model.path = path.clone();
        }
        if let Some(address) = &overrides.address {
            self.server.address = address.clone();
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(rules) = &overrides.rules_path {
            self.rules_path = Some(rules.clone());
        }
    }
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}
