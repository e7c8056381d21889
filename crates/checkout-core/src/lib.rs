//! # checkout-core
//!
//! Core types and traits for the dual-checkout screen.
//!
//! This crate provides:
//! - `CheckoutStrategy` and `CheckoutSession` for the two checkout flows
//! - `UiState` and `Alert` for what the screen shows
//! - `SessionSource`, `PaymentSheet`, `HostedPageRenderer`, `AlertPresenter`
//!   capability traits
//! - `PaymentSheetConfig` for the fixed SDK settings
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use checkout_core::{CheckoutStrategy, SessionSource, SheetParams, PaymentSheetConfig};
//!
//! let session = source.request_session(CheckoutStrategy::NativeSheet).await?;
//! let params = SheetParams::new(session.into_client_secret()?, &PaymentSheetConfig::default());
//! sheet.init_payment_sheet(&params).await.map_err(SheetError::into_init_error)?;
//! ```

pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod strategy;

// Re-exports for convenience
pub use config::PaymentSheetConfig;
pub use error::{CheckoutError, CheckoutResult};
pub use session::{CheckoutSession, CheckoutStrategy, SessionRequest, SessionResponse};
pub use state::{Alert, AlertKind, UiState};
pub use strategy::{
    AlertPresenter, HostedPageRenderer, PaymentSheet, SessionSource,
    SharedAlertPresenter, SharedPaymentSheet, SharedRenderer, SharedSessionSource, SheetError,
    SheetParams,
};
