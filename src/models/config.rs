use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Configuration options of the points registry server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Externally visible base URL, used to build image URLs.
    pub public_url: String,
    /// Directory served under `/uploads`.
    #[serde(default = "default_uploads_dir")]
    pub uploads_dir: String,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3333
}

fn default_uploads_dir() -> String {
    "uploads".to_string()
}

impl ServerConfig {
    /// Load `config/default.yaml` (if present) overlaid by `ECOLETA__*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(Environment::with_prefix("ECOLETA").separator("__"))
            .build()?
            .try_deserialize()
    }
}
