//! Bench configuration.
//!
//! Every field has a default, so an empty (or missing) file yields a working
//! bench that talks to a modulation service on localhost.
//!
//! ```toml
//! service_url = "http://127.0.0.1:8000/modulate"
//! request_timeout_ms = 2000
//! offline = false
//! cycles_per_symbol = 3
//! samples_per_symbol = 64
//! log_file = "benchtop.log"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:8000/modulate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Endpoint of the remote modulation service.
    pub service_url: String,
    /// Timeout applied to the whole modulation request.
    pub request_timeout_ms: u64,
    /// Never contact the service; always modulate locally.
    pub offline: bool,
    /// Carrier cycles per message bit.
    pub cycles_per_symbol: u32,
    /// Samples generated per message bit.
    pub samples_per_symbol: usize,
    pub log_file: PathBuf,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            request_timeout_ms: 2000,
            offline: false,
            cycles_per_symbol: 3,
            samples_per_symbol: 64,
            log_file: PathBuf::from("benchtop.log"),
        }
    }
}

impl BenchConfig {
    /// Load from a TOML file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = BenchConfig::from_toml("").unwrap();
        assert_eq!(config, BenchConfig::default());
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
        assert_eq!(config.samples_per_symbol, 64);
    }

    #[test]
    fn partial_file_overrides_only_named_keys() {
        let config = BenchConfig::from_toml("offline = true\nsamples_per_symbol = 16\n").unwrap();
        assert!(config.offline);
        assert_eq!(config.samples_per_symbol, 16);
        assert_eq!(config.cycles_per_symbol, 3);
        assert_eq!(config.request_timeout(), Duration::from_millis(2000));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let err = BenchConfig::from_toml("offline = maybe").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
