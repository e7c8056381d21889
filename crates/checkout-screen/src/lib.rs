//! # checkout-screen
//!
//! Headless checkout screen: the `CheckoutOrchestrator` that runs either the
//! hosted-page flow or the native payment-sheet flow, plus the view model
//! the UI layer renders from.
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_screen::CheckoutOrchestrator;
//! use checkout_http::HttpSessionClient;
//! use std::sync::Arc;
//!
//! let orchestrator = CheckoutOrchestrator::new(
//!     Arc::new(HttpSessionClient::from_env()?),
//!     Arc::new(my_payment_sdk),
//!     Arc::new(my_web_view),
//!     Arc::new(my_dialogs),
//! );
//!
//! match orchestrator.run_native_sheet_strategy().await {
//!     CheckoutOutcome::PaymentConfirmed => { /* success alert already shown */ }
//!     other => tracing::warn!("checkout ended: {:?}", other),
//! }
//! ```

pub mod mock;
pub mod orchestrator;
pub mod view;

pub use orchestrator::{CheckoutOrchestrator, CheckoutOutcome, OrchestratorConfig};
pub use view::{CheckoutOption, ScreenView, SCREEN_TITLE};
