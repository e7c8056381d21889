//! # Checkout Capabilities
//!
//! Traits for everything the checkout screen talks to. The orchestrator
//! receives each capability explicitly instead of reaching for an ambient
//! SDK handle.
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │   CheckoutOrchestrator   │
//!                 └────────────┬─────────────┘
//!        ┌──────────────┬──────┴───────┬────────────────┐
//!        ▼              ▼              ▼                ▼
//!  SessionSource   PaymentSheet  HostedPageRenderer  AlertPresenter
//!  (HTTP backend)  (native SDK)  (embedded web view) (dialogs)
//! ```

use crate::config::PaymentSheetConfig;
use crate::error::{CheckoutError, CheckoutResult};
use crate::session::{CheckoutSession, CheckoutStrategy};
use crate::state::Alert;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Source of checkout sessions (normally the backend endpoint).
#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Request a fresh checkout session for `strategy`.
    ///
    /// # Errors
    /// - `Network` on transport failure
    /// - `Server` on a non-success status, with the body text as message
    /// - `MalformedResponse` when the field `strategy` needs is absent
    async fn request_session(&self, strategy: CheckoutStrategy) -> CheckoutResult<CheckoutSession>;

    /// Name used in logs
    fn source_name(&self) -> &'static str {
        "backend"
    }
}

/// Parameters for `PaymentSheet::init_payment_sheet`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetParams {
    pub payment_intent_client_secret: String,
    pub merchant_display_name: String,
    #[serde(rename = "returnURL")]
    pub return_url: String,
}

impl SheetParams {
    pub fn new(client_secret: impl Into<String>, config: &PaymentSheetConfig) -> Self {
        Self {
            payment_intent_client_secret: client_secret.into(),
            merchant_display_name: config.merchant_display_name.clone(),
            return_url: config.return_url.clone(),
        }
    }
}

/// Error reported by the payment SDK
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetError {
    pub code: String,
    pub message: String,
}

impl SheetError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn into_init_error(self) -> CheckoutError {
        CheckoutError::SdkInit {
            code: self.code,
            message: self.message,
        }
    }

    pub fn into_presentation_error(self) -> CheckoutError {
        CheckoutError::SdkPresentation {
            code: self.code,
            message: self.message,
        }
    }
}

/// Native payment-sheet SDK boundary
#[async_trait]
pub trait PaymentSheet: Send + Sync {
    /// Prepare the sheet for the given payment intent
    async fn init_payment_sheet(&self, params: &SheetParams) -> Result<(), SheetError>;

    /// Show the sheet and wait for the customer to finish
    async fn present_payment_sheet(&self) -> Result<(), SheetError>;
}

/// Embedded web renderer boundary
pub trait HostedPageRenderer: Send + Sync {
    /// Display the page at `uri` (the renderer's source reference)
    fn show(&self, uri: &str);
}

/// User-visible alert boundary
pub trait AlertPresenter: Send + Sync {
    fn present(&self, alert: &Alert);
}

pub type SharedSessionSource = Arc<dyn SessionSource>;
pub type SharedPaymentSheet = Arc<dyn PaymentSheet>;
pub type SharedRenderer = Arc<dyn HostedPageRenderer>;
pub type SharedAlertPresenter = Arc<dyn AlertPresenter>;
