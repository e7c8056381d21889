//! # Session Client
//!
//! `SessionSource` backed by the checkout backend's
//! `POST /api/checkout/session` endpoint.

use crate::config::BackendConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutError, CheckoutResult, CheckoutSession, CheckoutStrategy, SessionRequest,
    SessionResponse, SessionSource,
};
use reqwest::Client;
use tracing::{debug, error, info, instrument};

/// HTTP client for the checkout backend
pub struct HttpSessionClient {
    config: BackendConfig,
    client: Client,
}

impl HttpSessionClient {
    /// Create a new client with the configured timeout
    pub fn new(config: BackendConfig) -> CheckoutResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = BackendConfig::from_env()?;
        Self::new(config)
    }

    /// Use a caller-supplied reqwest client (shared connection pool).
    ///
    /// The configured timeout is applied per request, whatever the client's own.
    pub fn with_client(config: BackendConfig, client: Client) -> CheckoutResult<Self> {
        config.validate()?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    fn transport_error(&self, err: reqwest::Error) -> CheckoutError {
        if err.is_timeout() {
            CheckoutError::Network(format!(
                "request timed out after {}s",
                self.config.timeout.as_secs()
            ))
        } else {
            CheckoutError::Network(err.to_string())
        }
    }
}

#[async_trait]
impl SessionSource for HttpSessionClient {
    #[instrument(skip(self), fields(strategy = %strategy))]
    async fn request_session(&self, strategy: CheckoutStrategy) -> CheckoutResult<CheckoutSession> {
        let url = self.config.session_url();
        let request = SessionRequest {
            strategy: Some(strategy),
        };

        debug!("Requesting checkout session from {}", url);

        let response = self
            .client
            .post(&url)
            .timeout(self.config.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            error!("Checkout backend error: status={}, body={}", status, body);

            let message = if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body
            };
            return Err(CheckoutError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let session_response: SessionResponse = serde_json::from_str(&body).map_err(|e| {
            CheckoutError::MalformedResponse(format!("Failed to parse session response: {}", e))
        })?;

        let session = CheckoutSession::from_response(
            strategy,
            session_response,
            self.config.accept_legacy_field,
        )?;

        info!("Received checkout session for {}", strategy);

        Ok(session)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
