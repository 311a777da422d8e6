use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub wmata_base_url: String,
    pub wmata_api_key: String,
    pub request_timeout: Duration,
    pub stations_path: PathBuf,
    /// When set, inbound envelopes naming a different application are
    /// rejected before dispatch.
    pub application_id: Option<String>,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let bind_address_str =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string()))?;

        let wmata_base_url = std::env::var("WMATA_BASE_URL")
            .unwrap_or_else(|_| "https://api.wmata.com".to_string());

        let wmata_api_key = std::env::var("WMATA_API_KEY")
            .map_err(|_| ConfigError::MissingVar("WMATA_API_KEY".to_string()))?;

        let timeout_str =
            std::env::var("WMATA_TIMEOUT_SECS").unwrap_or_else(|_| "6".to_string());
        let timeout_secs = timeout_str.parse::<u64>().ok().filter(|secs| *secs > 0).ok_or_else(|| {
            ConfigError::InvalidValue(
                "WMATA_TIMEOUT_SECS".to_string(),
                format!("'{}' is not a positive number of seconds", timeout_str),
            )
        })?;
        let request_timeout = Duration::from_secs(timeout_secs);

        let stations_path = std::env::var("STATIONS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./resources/stations.json"));

        let application_id = std::env::var("SKILL_APPLICATION_ID").ok();

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            bind_address,
            wmata_base_url,
            wmata_api_key,
            request_timeout,
            stations_path,
            application_id,
            log_level,
        })
    }
}
