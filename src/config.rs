//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ROCKETSHOES_API_URL` - Storefront API base URL (default: `http://localhost:3333`)
//! - `ROCKETSHOES_STORAGE_PATH` - Persistence file (default: `<data dir>/rocketshoes/storage.json`)
//! - `ROCKETSHOES_STORAGE_KEY` - Slot holding the cart (default: `@RocketShoes:cart`)
//! - `ROCKETSHOES_HTTP_TIMEOUT_SECS` - Per-request timeout; unset means wait forever
//! - `ROCKETSHOES_MAILBOX_CAPACITY` - Pending cart requests before callers wait (default: 32)

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";
pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CartConfig {
    /// Base URL serving `stock/{id}` and `products/{id}`
    pub api_url: String,
    /// JSON file backing the persistence slot
    pub storage_path: PathBuf,
    /// Key of the slot holding the serialized cart
    pub storage_key: String,
    /// Timeout for each catalog request
    pub request_timeout: Option<Duration>,
    /// Capacity of the cart actor's request channel
    pub mailbox_capacity: usize,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            storage_path: default_storage_path(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            request_timeout: None,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let request_timeout = match lookup("ROCKETSHOES_HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(Duration::from_secs(parse_var(
                "ROCKETSHOES_HTTP_TIMEOUT_SECS",
                &raw,
            )?)),
            None => None,
        };
        let mailbox_capacity = match lookup("ROCKETSHOES_MAILBOX_CAPACITY") {
            Some(raw) => {
                let capacity: usize = parse_var("ROCKETSHOES_MAILBOX_CAPACITY", &raw)?;
                if capacity == 0 {
                    return Err(ConfigError::InvalidEnvVar(
                        "ROCKETSHOES_MAILBOX_CAPACITY".to_string(),
                        "must be greater than zero".to_string(),
                    ));
                }
                capacity
            }
            None => defaults.mailbox_capacity,
        };

        Ok(Self {
            api_url: lookup("ROCKETSHOES_API_URL").unwrap_or(defaults.api_url),
            storage_path: lookup("ROCKETSHOES_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_path),
            storage_key: lookup("ROCKETSHOES_STORAGE_KEY").unwrap_or(defaults.storage_key),
            request_timeout,
            mailbox_capacity,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// `<data dir>/rocketshoes/storage.json`, or the working directory when the
/// platform has no data directory.
fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("rocketshoes"))
        .unwrap_or_default()
        .join("storage.json")
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
