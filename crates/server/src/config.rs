use index::{DatasetLayout, IndexConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ServerError, ServerResult};

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in MB
    #[serde(default = "default_max_body_size_mb")]
    pub max_body_size_mb: usize,

    /// API keys allowed to call admin routes. Empty disables them.
    #[serde(default)]
    pub api_keys: HashSet<String>,

    /// Enable CORS
    #[serde(default = "default_true")]
    pub enable_cors: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// PubChemLite export loaded at startup and on reload
    #[serde(default = "default_dataset_path")]
    pub dataset_path: PathBuf,

    /// Column layout of the dataset
    #[serde(default)]
    pub dataset_layout: DatasetLayout,

    /// Cell delimiter of the dataset, must be ASCII
    #[serde(default = "default_dataset_delimiter")]
    pub dataset_delimiter: char,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            timeout_secs: default_timeout_secs(),
            max_body_size_mb: default_max_body_size_mb(),
            api_keys: HashSet::new(),
            enable_cors: default_true(),
            log_level: default_log_level(),
            dataset_path: default_dataset_path(),
            dataset_layout: DatasetLayout::default(),
            dataset_delimiter: default_dataset_delimiter(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `.env`, an optional `server.*` file and
    /// `CTSLITE_SERVER__*` environment variables, in increasing precedence.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let builder = config::Config::builder()
            .add_source(config::File::with_name("server").required(false))
            .add_source(
                config::Environment::with_prefix("CTSLITE_SERVER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("api_keys")
                    .try_parsing(true),
            );

        let config: ServerConfig = builder.build()?.try_deserialize()?;

        if config.api_keys.is_empty() {
            tracing::warn!("No API keys configured, admin routes are disabled");
        }

        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_mb * 1024 * 1024
    }

    /// Index build settings derived from the dataset fields.
    pub fn index_config(&self) -> ServerResult<IndexConfig> {
        let delimiter = u8::try_from(self.dataset_delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                ServerError::Config(format!(
                    "dataset delimiter {:?} is not an ASCII character",
                    self.dataset_delimiter
                ))
            })?;

        Ok(IndexConfig::new()
            .with_path(&self.dataset_path)
            .with_layout(self.dataset_layout.columns())
            .with_delimiter(delimiter))
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_mb() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_dataset_path() -> PathBuf {
    PathBuf::from("./data/PubChemLite.csv")
}

fn default_dataset_delimiter() -> char {
    ','
}
