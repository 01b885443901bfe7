// Configuration for the booking core and its simulated round trips

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HotelConfig {
    pub currency_symbol: String,
    pub booking: BookingConfig,
    pub session: SessionConfig,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "£".to_string(),
            booking: BookingConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

// Delays standing in for the booking API
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    pub submit_delay_ms: u64,
    pub listing_delay_ms: u64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: 2000,
            listing_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub auth_delay_ms: u64,
    // None keeps the session in memory only
    pub storage_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auth_delay_ms: 1000,
            storage_path: None,
        }
    }
}

impl HotelConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    // Same settings with every simulated delay removed
    pub fn without_delays(mut self) -> Self {
        self.booking.submit_delay_ms = 0;
        self.booking.listing_delay_ms = 0;
        self.session.auth_delay_ms = 0;
        self
    }

    pub fn format_price(&self, amount: u64) -> String {
        format!("{}{}", self.currency_symbol, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HotelConfig::default();
        assert_eq!(config.booking.submit_delay_ms, 2000);
        assert_eq!(config.booking.listing_delay_ms, 1000);
        assert_eq!(config.session.auth_delay_ms, 1000);
        assert!(config.session.storage_path.is_none());
        assert_eq!(config.format_price(897), "£897");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = HotelConfig::from_json_str(
            r#"{"currency_symbol": "€", "booking": {"submit_delay_ms": 10}}"#,
        )
        .unwrap();
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.booking.submit_delay_ms, 10);
        assert_eq!(config.booking.listing_delay_ms, 1000);
        assert_eq!(config.session.auth_delay_ms, 1000);
    }

    #[test]
    fn test_without_delays() {
        let config = HotelConfig::default().without_delays();
        assert_eq!(config.booking.submit_delay_ms, 0);
        assert_eq!(config.booking.listing_delay_ms, 0);
        assert_eq!(config.session.auth_delay_ms, 0);
    }

    #[test]
    fn test_malformed_json() {
        let err = HotelConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::JsonParseError(_)));
    }
}
