//! # Checkout Session Types
//!
//! The server-issued checkout session and its wire representation.

use crate::error::{CheckoutError, CheckoutResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Checkout flow selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStrategy {
    /// Provider-hosted checkout page shown in an embedded web renderer
    HostedPage,
    /// Native payment sheet presented by the payment SDK
    NativeSheet,
}

impl CheckoutStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStrategy::HostedPage => "hosted_page",
            CheckoutStrategy::NativeSheet => "native_sheet",
        }
    }

    /// Name of the response field this strategy cannot do without
    pub fn required_field(&self) -> &'static str {
        match self {
            CheckoutStrategy::HostedPage => "url",
            CheckoutStrategy::NativeSheet => "clientSecret",
        }
    }
}

impl std::fmt::Display for CheckoutStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body sent to `POST /api/checkout/session`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    /// Hint for backends that issue different session shapes per flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<CheckoutStrategy>,
}

/// Raw JSON body returned by the session endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Hosted checkout page reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Payment-sheet client secret
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
}

/// A checkout session issued by the backend.
///
/// Consumed exactly once: the token is handed on by value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    /// Strategy the session was requested for
    pub strategy: CheckoutStrategy,

    hosted_page_url: Option<String>,
    client_secret: Option<String>,

    /// When the response was received
    pub received_at: DateTime<Utc>,
}

impl CheckoutSession {
    /// Session for the hosted-page flow
    pub fn hosted_page(url: impl Into<String>) -> Self {
        Self {
            strategy: CheckoutStrategy::HostedPage,
            hosted_page_url: Some(url.into()),
            client_secret: None,
            received_at: Utc::now(),
        }
    }

    /// Session for the native-sheet flow
    pub fn native_sheet(client_secret: impl Into<String>) -> Self {
        Self {
            strategy: CheckoutStrategy::NativeSheet,
            hosted_page_url: None,
            client_secret: Some(client_secret.into()),
            received_at: Utc::now(),
        }
    }

    /// Validate a raw response against what `strategy` needs.
    ///
    /// With `accept_legacy_field`, a hosted-page request falls back to
    /// `clientSecret` when `url` is missing, for backends that put the page
    /// reference in the secret field.
    pub fn from_response(
        strategy: CheckoutStrategy,
        response: SessionResponse,
        accept_legacy_field: bool,
    ) -> CheckoutResult<Self> {
        let url = non_empty(response.url);
        let secret = non_empty(response.client_secret);

        match strategy {
            CheckoutStrategy::HostedPage => {
                let url = match (url, secret) {
                    (Some(url), _) => url,
                    (None, Some(secret)) if accept_legacy_field => {
                        tracing::warn!(
                            "Session response has no url, using clientSecret as page reference"
                        );
                        secret
                    }
                    _ => {
                        return Err(CheckoutError::MalformedResponse(
                            "response has no url for the hosted checkout page".to_string(),
                        ))
                    }
                };
                Ok(Self::hosted_page(url))
            }
            CheckoutStrategy::NativeSheet => {
                let secret = secret.ok_or_else(|| {
                    CheckoutError::MalformedResponse(
                        "response has no clientSecret for the payment sheet".to_string(),
                    )
                })?;
                Ok(Self::native_sheet(secret))
            }
        }
    }

    /// The single-use token this session carries, whichever flow it is for
    pub fn token(&self) -> &str {
        match self.strategy {
            CheckoutStrategy::HostedPage => self.hosted_page_url.as_deref(),
            CheckoutStrategy::NativeSheet => self.client_secret.as_deref(),
        }
        .unwrap_or_default()
    }

    pub fn hosted_page_url(&self) -> Option<&str> {
        self.hosted_page_url.as_deref()
    }

    pub fn client_secret(&self) -> Option<&str> {
        self.client_secret.as_deref()
    }

    /// Hand the page reference to the renderer
    pub fn into_hosted_page_url(self) -> CheckoutResult<String> {
        self.hosted_page_url.ok_or_else(|| {
            CheckoutError::MalformedResponse("session has no hosted page url".to_string())
        })
    }

    /// Hand the client secret to the payment SDK
    pub fn into_client_secret(self) -> CheckoutResult<String> {
        self.client_secret.ok_or_else(|| {
            CheckoutError::MalformedResponse("session has no client secret".to_string())
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> SessionResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_native_sheet_requires_client_secret() {
        let session = CheckoutSession::from_response(
            CheckoutStrategy::NativeSheet,
            response(json!({ "clientSecret": "cs_test_123" })),
            true,
        )
        .unwrap();

        assert_eq!(session.client_secret(), Some("cs_test_123"));
        assert_eq!(session.token(), "cs_test_123");

        let err = CheckoutSession::from_response(
            CheckoutStrategy::NativeSheet,
            response(json!({ "url": "https://checkout.stripe.com/c/pay/cs_1" })),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, CheckoutError::MalformedResponse(_)));
    }

    #[test]
    fn test_empty_secret_is_missing() {
        let err = CheckoutSession::from_response(
            CheckoutStrategy::NativeSheet,
            response(json!({ "clientSecret": "  " })),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, CheckoutError::MalformedResponse(_)));
    }

    #[test]
    fn test_hosted_page_prefers_url() {
        let session = CheckoutSession::from_response(
            CheckoutStrategy::HostedPage,
            response(json!({
                "url": "https://checkout.stripe.com/c/pay/cs_1",
                "clientSecret": "cs_1_secret"
            })),
            true,
        )
        .unwrap();
        assert_eq!(
            session.into_hosted_page_url().unwrap(),
            "https://checkout.stripe.com/c/pay/cs_1"
        );
    }

    #[test]
    fn test_hosted_page_legacy_field() {
        let body = json!({ "clientSecret": "https://checkout.stripe.com/c/pay/cs_2" });

        let session =
            CheckoutSession::from_response(CheckoutStrategy::HostedPage, response(body.clone()), true)
                .unwrap();
        assert_eq!(
            session.hosted_page_url(),
            Some("https://checkout.stripe.com/c/pay/cs_2")
        );

        let err = CheckoutSession::from_response(CheckoutStrategy::HostedPage, response(body), false)
            .unwrap_err();
        assert!(matches!(err, CheckoutError::MalformedResponse(_)));
    }

    #[test]
    fn test_strategy_serde() {
        let req = SessionRequest {
            strategy: Some(CheckoutStrategy::NativeSheet),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "strategy": "native_sheet" })
        );
        assert_eq!(CheckoutStrategy::HostedPage.required_field(), "url");
    }
}
