//! Mock Capabilities
//!
//! Scripted stand-ins for the backend, the payment SDK, the web renderer and
//! the alert dialogs. For tests and headless demos.

use async_trait::async_trait;
use checkout_core::{
    Alert, AlertPresenter, CheckoutError, CheckoutResult, CheckoutSession, CheckoutStrategy,
    HostedPageRenderer, PaymentSheet, SessionResponse, SessionSource, SheetError, SheetParams,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Session source that replays scripted backend responses in order
#[derive(Default)]
pub struct MockSessionSource {
    responses: Mutex<VecDeque<CheckoutResult<SessionResponse>>>,
    requests: Mutex<Vec<CheckoutStrategy>>,
    accept_legacy_field: bool,
}

impl MockSessionSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: queue a `{"clientSecret": ...}` response
    pub fn with_client_secret(self, secret: impl Into<String>) -> Self {
        self.push(Ok(SessionResponse {
            url: None,
            client_secret: Some(secret.into()),
        }));
        self
    }

    /// Builder: queue a `{"url": ...}` response
    pub fn with_url(self, url: impl Into<String>) -> Self {
        self.push(Ok(SessionResponse {
            url: Some(url.into()),
            client_secret: None,
        }));
        self
    }

    /// Builder: accept `clientSecret` as the hosted page reference
    pub fn with_legacy_field(mut self, accept: bool) -> Self {
        self.accept_legacy_field = accept;
        self
    }

    /// Builder: queue a failure
    pub fn with_error(self, err: CheckoutError) -> Self {
        self.push(Err(err));
        self
    }

    pub fn push(&self, response: CheckoutResult<SessionResponse>) {
        lock(&self.responses).push_back(response);
    }

    /// Number of session requests made so far
    pub fn calls(&self) -> usize {
        lock(&self.requests).len()
    }
}

#[async_trait]
impl SessionSource for MockSessionSource {
    async fn request_session(&self, strategy: CheckoutStrategy) -> CheckoutResult<CheckoutSession> {
        lock(&self.requests).push(strategy);

        let response = lock(&self.responses).pop_front().unwrap_or_else(|| {
            Err(CheckoutError::Network(
                "mock backend has no scripted response".to_string(),
            ))
        })?;

        CheckoutSession::from_response(strategy, response, self.accept_legacy_field)
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}

/// A call the mock SDK received
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetCall {
    Init(SheetParams),
    Present,
}

/// Payment SDK stand-in with fixed init/present results
pub struct MockPaymentSheet {
    init_result: Result<(), SheetError>,
    present_result: Result<(), SheetError>,
    calls: Mutex<Vec<SheetCall>>,
}

impl Default for MockPaymentSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPaymentSheet {
    /// SDK where every call succeeds
    pub fn new() -> Self {
        Self {
            init_result: Ok(()),
            present_result: Ok(()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_init(code: &str, message: &str) -> Self {
        Self {
            init_result: Err(SheetError::new(code, message)),
            ..Self::new()
        }
    }

    pub fn failing_present(code: &str, message: &str) -> Self {
        Self {
            present_result: Err(SheetError::new(code, message)),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<SheetCall> {
        lock(&self.calls).clone()
    }

    pub fn init_calls(&self) -> Vec<SheetParams> {
        lock(&self.calls)
            .iter()
            .filter_map(|call| match call {
                SheetCall::Init(params) => Some(params.clone()),
                SheetCall::Present => None,
            })
            .collect()
    }

    pub fn present_calls(&self) -> usize {
        lock(&self.calls)
            .iter()
            .filter(|call| matches!(call, SheetCall::Present))
            .count()
    }
}

#[async_trait]
impl PaymentSheet for MockPaymentSheet {
    async fn init_payment_sheet(&self, params: &SheetParams) -> Result<(), SheetError> {
        lock(&self.calls).push(SheetCall::Init(params.clone()));
        self.init_result.clone()
    }

    async fn present_payment_sheet(&self) -> Result<(), SheetError> {
        lock(&self.calls).push(SheetCall::Present);
        self.present_result.clone()
    }
}

/// Web renderer that records every source reference it was given
#[derive(Default)]
pub struct RecordingRenderer {
    shown: Mutex<Vec<String>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shown(&self) -> Vec<String> {
        lock(&self.shown).clone()
    }
}

impl HostedPageRenderer for RecordingRenderer {
    fn show(&self, uri: &str) {
        lock(&self.shown).push(uri.to_string());
    }
}

/// Alert presenter that records alerts instead of blocking on a dialog
#[derive(Default)]
pub struct RecordingAlerts {
    alerts: Mutex<Vec<Alert>>,
    presented: AtomicUsize,
}

impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        lock(&self.alerts).clone()
    }

    pub fn count(&self) -> usize {
        self.presented.load(Ordering::SeqCst)
    }
}

impl AlertPresenter for RecordingAlerts {
    fn present(&self, alert: &Alert) {
        lock(&self.alerts).push(alert.clone());
        self.presented.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_session_source_replays_in_order() {
        let source = MockSessionSource::new()
            .with_client_secret("cs_1")
            .with_error(CheckoutError::Network("down".into()));

        let first = source
            .request_session(CheckoutStrategy::NativeSheet)
            .await
            .unwrap();
        assert_eq!(first.client_secret(), Some("cs_1"));

        let second = source.request_session(CheckoutStrategy::NativeSheet).await;
        assert!(matches!(second, Err(CheckoutError::Network(_))));

        let third = source.request_session(CheckoutStrategy::HostedPage).await;
        assert!(matches!(third, Err(CheckoutError::Network(_))));

        assert_eq!(source.calls(), 3);
    }

    #[tokio::test]
    async fn test_mock_sheet_records_calls() {
        let sheet = MockPaymentSheet::failing_present("Canceled", "cancelled");
        let params = SheetParams::new("cs_1", &Default::default());

        assert!(sheet.init_payment_sheet(&params).await.is_ok());
        assert!(sheet.present_payment_sheet().await.is_err());
        assert_eq!(sheet.calls(), vec![SheetCall::Init(params), SheetCall::Present]);
    }
}
