use std::path::PathBuf;

use crate::auth::JwtConfig;
use crate::core::Result;

/// Store backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// redb file under `DATA_DIR`
    File,
    /// redb in-memory backend (lost on restart)
    Memory,
}

impl StoreBackend {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "file" => Some(StoreBackend::File),
            "memory" | "mem" => Some(StoreBackend::Memory),
            _ => None,
        }
    }
}

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | DATA_DIR | ./data | Directory holding the redb file |
/// | STORE_BACKEND | file | `file` or `memory` |
/// | ENVIRONMENT | development | Runtime environment |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
/// | STRICT_STATUS_TRANSITIONS | false | Enforce the order lifecycle |
/// | SEED_SAMPLE_DATA | false | Seed the sample menu at startup |
///
/// `LOG_LEVEL` and `LOG_DIR` are read by [`setup_environment`](crate::setup_environment);
/// JWT settings by [`JwtConfig`].
///
/// # Example
///
/// ```ignore
/// HTTP_PORT=8080 STORE_BACKEND=memory cargo run -p cafe-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Data directory for the on-disk store
    pub data_dir: String,
    pub store_backend: StoreBackend,
    /// JWT auth settings
    pub jwt: JwtConfig,
    /// development | staging | production
    pub environment: String,
    /// Request timeout (ms)
    pub request_timeout_ms: u64,
    /// Reject status changes outside the order lifecycle
    pub strict_status_transitions: bool,
    pub seed_sample_data: bool,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults. Fails only
    /// when the JWT secret is unusable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            http_port: env_parse("HTTP_PORT", 3000),
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "./data".into()),
            store_backend: std::env::var("STORE_BACKEND")
                .ok()
                .and_then(|v| StoreBackend::parse(&v))
                .unwrap_or(StoreBackend::File),
            jwt: JwtConfig::from_env()?,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS", 30000),
            strict_status_transitions: env_parse("STRICT_STATUS_TRANSITIONS", false),
            seed_sample_data: env_parse("SEED_SAMPLE_DATA", false),
        })
    }

    /// In-memory configuration for tests
    pub fn for_testing() -> Self {
        Self {
            http_port: 0,
            data_dir: String::new(),
            store_backend: StoreBackend::Memory,
            jwt: JwtConfig::for_testing(),
            environment: "test".into(),
            request_timeout_ms: 30000,
            strict_status_transitions: false,
            seed_sample_data: false,
        }
    }

    /// Path of the redb database file
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("cafe.redb")
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
