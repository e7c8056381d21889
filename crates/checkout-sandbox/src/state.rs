//! # Sandbox State
//!
//! Configuration and shared state for the sandbox backend.

use chrono::{DateTime, Utc};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Sandbox configuration
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on (the screen's default backend is 127.0.0.1:8000)
    pub port: u16,
    /// Base of the hosted checkout page URLs handed out
    pub hosted_base_url: String,
    /// When set, every session request fails with this status
    pub fail_status: Option<u16>,
    /// Body text sent with `fail_status`
    pub fail_message: String,
    /// Environment (development, test, ...)
    pub environment: String,
}

impl SandboxConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let fail_status = match std::env::var("SANDBOX_FAIL_STATUS") {
            Ok(raw) => {
                let status: u16 = raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("SANDBOX_FAIL_STATUS is not a status code: {}", raw))?;
                if !(400..600).contains(&status) {
                    anyhow::bail!("SANDBOX_FAIL_STATUS must be 4xx or 5xx, got {}", status);
                }
                Some(status)
            }
            Err(_) => None,
        };

        Ok(Self {
            host: std::env::var("SANDBOX_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("SANDBOX_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            hosted_base_url: std::env::var("SANDBOX_HOSTED_BASE_URL")
                .unwrap_or_else(|_| "https://checkout.stripe.com".to_string()),
            fail_status,
            fail_message: std::env::var("SANDBOX_FAIL_MESSAGE")
                .unwrap_or_else(|_| "service unavailable".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid socket address {}:{}: {}", self.host, self.port, e))
    }

    /// Builder: make every session request fail
    pub fn failing(mut self, status: u16, message: impl Into<String>) -> Self {
        self.fail_status = Some(status);
        self.fail_message = message.into();
        self
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            hosted_base_url: "https://checkout.stripe.com".to_string(),
            fail_status: None,
            fail_message: "service unavailable".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: SandboxConfig,
    issued: Arc<AtomicU64>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            config,
            issued: Arc::new(AtomicU64::new(0)),
            started_at: Utc::now(),
        }
    }

    /// Count one more issued session, returning the new total
    pub fn record_issued(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn sessions_issued(&self) -> u64 {
        self.issued.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_config_defaults() {
        std::env::remove_var("SANDBOX_HOST");
        std::env::remove_var("SANDBOX_PORT");
        std::env::remove_var("SANDBOX_FAIL_STATUS");

        let config = SandboxConfig::from_env().unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8000);
        assert!(config.fail_status.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = SandboxConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..SandboxConfig::default()
        };
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:3000");

        let config = SandboxConfig {
            host: "not a host".to_string(),
            ..SandboxConfig::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_issued_counter() {
        let state = AppState::new(SandboxConfig::default());
        assert_eq!(state.record_issued(), 1);
        assert_eq!(state.clone().record_issued(), 2);
        assert_eq!(state.sessions_issued(), 2);
    }
}
