//! # Checkout Error Types
//!
//! Typed error handling for the checkout screen.
//! All checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Transport-level failure talking to the backend (includes timeouts)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status
    #[error("Server error [{status}]: {message}")]
    Server { status: u16, message: String },

    /// Backend answered 2xx but the body lacks the expected token/secret
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Payment SDK refused to initialize the sheet
    #[error("Payment sheet init failed [{code}]: {message}")]
    SdkInit { code: String, message: String },

    /// Payment SDK failed (or the customer cancelled) while presenting the sheet
    #[error("Payment sheet failed [{code}]: {message}")]
    SdkPresentation { code: String, message: String },

    /// Backend handed back the token of the previous attempt
    #[error("Checkout session token was already used by a previous attempt")]
    SessionReused,

    /// Another checkout attempt is still running
    #[error("A checkout attempt is already in progress")]
    AttemptInProgress,

    /// A hosted checkout page is already on screen
    #[error("A hosted checkout page is already open")]
    HostedPageOpen,

    /// Configuration errors (bad base URL, empty merchant name, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CheckoutError {
    /// Returns true if a later, user-initiated attempt could succeed.
    ///
    /// Nothing retries automatically; this only feeds log fields.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CheckoutError::Network(_)
                | CheckoutError::Server { .. }
                | CheckoutError::AttemptInProgress
        )
    }

    /// Text shown in the error alert
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Server { message, .. } => message.clone(),
            CheckoutError::SdkInit { message, .. } => message.clone(),
            CheckoutError::SdkPresentation { message, .. } => message.clone(),
            CheckoutError::Network(_) => {
                "Could not reach the payment server. Please try again.".to_string()
            }
            CheckoutError::MalformedResponse(_) | CheckoutError::SessionReused => {
                "The payment server returned an invalid checkout session.".to_string()
            }
            CheckoutError::AttemptInProgress => "A checkout is already in progress.".to_string(),
            CheckoutError::HostedPageOpen => "The checkout page is already open.".to_string(),
            CheckoutError::Configuration(_) => "Checkout is not configured correctly.".to_string(),
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;
