//! # Backend Configuration
//!
//! Where the checkout backend lives and how long to wait for it.
//! Values are loaded from environment variables (and `.env` if present).

use checkout_core::CheckoutError;
use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";
pub const SESSION_PATH: &str = "/api/checkout/session";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Checkout backend configuration
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend (scheme + host + port)
    pub api_base_url: String,

    /// Request timeout; a timed-out request surfaces as a network error
    pub timeout: Duration,

    /// Accept `clientSecret` as the hosted page reference when `url` is absent
    pub accept_legacy_field: bool,
}

impl BackendConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `CHECKOUT_API_BASE_URL` (default `http://127.0.0.1:8000`)
    /// - `CHECKOUT_TIMEOUT_SECS` (default 30)
    /// - `CHECKOUT_ACCEPT_LEGACY_FIELD` (default false)
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url =
            env::var("CHECKOUT_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs = match env::var("CHECKOUT_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                CheckoutError::Configuration(format!(
                    "CHECKOUT_TIMEOUT_SECS must be a whole number of seconds, got {}",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let accept_legacy_field = env::var("CHECKOUT_ACCEPT_LEGACY_FIELD")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let config = Self {
            api_base_url,
            timeout: Duration::from_secs(timeout_secs),
            accept_legacy_field,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create config with an explicit base URL (for testing)
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_legacy_field: false,
        }
    }

    pub fn validate(&self) -> Result<(), CheckoutError> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(CheckoutError::Configuration(
                "CHECKOUT_API_BASE_URL must start with http:// or https://".to_string(),
            ));
        }

        if self.timeout.is_zero() {
            return Err(CheckoutError::Configuration(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Full URL of the session-creation endpoint
    pub fn session_url(&self) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), SESSION_PATH)
    }

    /// Builder: set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: toggle the `clientSecret` fallback for hosted pages
    pub fn with_legacy_field(mut self, accept: bool) -> Self {
        self.accept_legacy_field = accept;
        self
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_url() {
        let config = BackendConfig::new("http://127.0.0.1:8000/");
        assert_eq!(config.session_url(), "http://127.0.0.1:8000/api/checkout/session");

        let config = BackendConfig::default();
        assert_eq!(config.session_url(), "http://127.0.0.1:8000/api/checkout/session");
    }

    #[test]
    fn test_validation() {
        assert!(BackendConfig::new("https://pay.example.com").validate().is_ok());
        assert!(BackendConfig::new("pay.example.com").validate().is_err());
        assert!(BackendConfig::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_from_env_defaults() {
        env::remove_var("CHECKOUT_API_BASE_URL");
        env::remove_var("CHECKOUT_TIMEOUT_SECS");
        env::remove_var("CHECKOUT_ACCEPT_LEGACY_FIELD");

        let config = BackendConfig::from_env().unwrap();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(!config.accept_legacy_field);
    }
}
