//! # Request Handlers
//!
//! Axum handlers for the sandbox checkout-session endpoint.

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use checkout_core::{CheckoutStrategy, SessionRequest, SessionResponse};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Health check endpoint
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "checkout-sandbox",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions_issued": state.sessions_issued(),
        "started_at": state.started_at.to_rfc3339(),
    }))
}

/// Read the optional strategy hint; anything unparseable counts as no hint
fn strategy_hint(body: &[u8]) -> Option<CheckoutStrategy> {
    if body.is_empty() {
        return None;
    }
    match serde_json::from_slice::<SessionRequest>(body) {
        Ok(request) => request.strategy,
        Err(e) => {
            debug!("Ignoring unreadable session request body: {}", e);
            None
        }
    }
}

/// Build a fresh session; each call mints new tokens
fn issue_session(state: &AppState, hint: Option<CheckoutStrategy>) -> SessionResponse {
    let session_id = format!("cs_test_{}", Uuid::new_v4().simple());
    let intent_id = format!("pi_{}", Uuid::new_v4().simple());
    let secret = Uuid::new_v4().simple().to_string();

    let url = format!(
        "{}/c/pay/{}",
        state.config.hosted_base_url.trim_end_matches('/'),
        session_id
    );
    let client_secret = format!("{}_secret_{}", intent_id, &secret[..24]);

    match hint {
        Some(CheckoutStrategy::HostedPage) => SessionResponse {
            url: Some(url),
            client_secret: None,
        },
        Some(CheckoutStrategy::NativeSheet) => SessionResponse {
            url: None,
            client_secret: Some(client_secret),
        },
        None => SessionResponse {
            url: Some(url),
            client_secret: Some(client_secret),
        },
    }
}

/// `POST /api/checkout/session`
#[instrument(skip(state, body))]
pub async fn create_session(State(state): State<AppState>, body: Bytes) -> Response {
    if let Some(status) = state.config.fail_status {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
        warn!("Failing session request as configured: {}", status);
        return (status, state.config.fail_message.clone()).into_response();
    }

    let hint = strategy_hint(&body);
    let session = issue_session(&state, hint);
    let total = state.record_issued();

    info!(
        "Issued checkout session #{} for {}",
        total,
        hint.map(|s| s.as_str()).unwrap_or("any strategy")
    );

    Json(session).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::create_router;
    use crate::state::SandboxConfig;
    use axum_test::TestServer;
    use serde_json::json;

    fn server(config: SandboxConfig) -> TestServer {
        TestServer::new(create_router(AppState::new(config))).unwrap()
    }

    #[test]
    fn test_strategy_hint() {
        assert_eq!(
            strategy_hint(br#"{"strategy":"hosted_page"}"#),
            Some(CheckoutStrategy::HostedPage)
        );
        assert_eq!(strategy_hint(b""), None);
        assert_eq!(strategy_hint(b"{}"), None);
        assert_eq!(strategy_hint(br#"{"method":"POST"}"#), None);
        assert_eq!(strategy_hint(b"not json"), None);
    }

    #[tokio::test]
    async fn test_native_sheet_session() {
        let server = server(SandboxConfig::default());

        let response = server
            .post("/api/checkout/session")
            .json(&json!({ "strategy": "native_sheet" }))
            .await;

        response.assert_status_ok();
        let body: SessionResponse = response.json();
        assert!(body.url.is_none());
        let secret = body.client_secret.unwrap();
        assert!(secret.starts_with("pi_"));
        assert!(secret.contains("_secret_"));
    }

    #[tokio::test]
    async fn test_hosted_page_session() {
        let server = server(SandboxConfig {
            hosted_base_url: "https://pay.example.test/".to_string(),
            ..SandboxConfig::default()
        });

        let response = server
            .post("/api/checkout/session")
            .json(&json!({ "strategy": "hosted_page" }))
            .await;

        let body: SessionResponse = response.json();
        assert!(body.client_secret.is_none());
        assert!(body
            .url
            .unwrap()
            .starts_with("https://pay.example.test/c/pay/cs_test_"));
    }

    #[tokio::test]
    async fn test_no_hint_returns_both_fields() {
        let server = server(SandboxConfig::default());

        let response = server.post("/api/checkout/session").await;

        let body: SessionResponse = response.json();
        assert!(body.url.is_some());
        assert!(body.client_secret.is_some());
    }

    #[tokio::test]
    async fn test_tokens_are_never_reused() {
        let server = server(SandboxConfig::default());

        let first: SessionResponse = server.post("/api/checkout/session").await.json();
        let second: SessionResponse = server.post("/api/checkout/session").await.json();

        assert_ne!(first.client_secret, second.client_secret);
        assert_ne!(first.url, second.url);
    }

    #[tokio::test]
    async fn test_configured_failure() {
        let server = server(SandboxConfig::default().failing(500, "service unavailable"));

        let response = server.post("/api/checkout/session").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text(), "service unavailable");
    }

    #[tokio::test]
    async fn test_health_counts_sessions() {
        let server = server(SandboxConfig::default());
        server.post("/api/checkout/session").await;

        let health: serde_json::Value = server.get("/health").await.json();
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["sessions_issued"], 1);
    }
}
