//! # checkout-http
//!
//! HTTP session client for the dual-checkout screen.
//!
//! `HttpSessionClient` implements `checkout_core::SessionSource` against
//! `POST {CHECKOUT_API_BASE_URL}/api/checkout/session`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout_http::HttpSessionClient;
//! use checkout_core::{CheckoutStrategy, SessionSource};
//!
//! let client = HttpSessionClient::from_env()?;
//! let session = client.request_session(CheckoutStrategy::HostedPage).await?;
//! ```

pub mod client;
pub mod config;

// Re-exports
pub use client::HttpSessionClient;
pub use config::{BackendConfig, DEFAULT_API_BASE_URL, SESSION_PATH};
