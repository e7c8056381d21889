//! # Screen State
//!
//! Transient UI state of the checkout screen and the alerts it raises.

use crate::error::CheckoutError;
use serde::{Deserialize, Serialize};

/// What the checkout screen is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiState {
    /// Strategy buttons, nothing running
    #[default]
    Idle,
    /// Native-sheet attempt running (spinner)
    Loading,
    /// Hosted checkout page replaces the screen
    HostedPageActive,
    /// Native-sheet payment confirmed
    Done,
}

impl UiState {
    /// Whether a new attempt may start from this state
    pub fn accepts_attempt(&self) -> bool {
        matches!(self, UiState::Idle | UiState::Done)
    }
}

impl std::fmt::Display for UiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            UiState::Idle => "idle",
            UiState::Loading => "loading",
            UiState::HostedPageActive => "hosted_page_active",
            UiState::Done => "done",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Success,
    Error,
}

/// A blocking, user-visible alert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: String,
    pub message: String,
}

impl Alert {
    pub const PAYMENT_CONFIRMED: &'static str = "Your payment is confirmed!";

    /// "Success" alert shown after the sheet completes
    pub fn payment_confirmed() -> Self {
        Self {
            kind: AlertKind::Success,
            title: "Success".to_string(),
            message: Self::PAYMENT_CONFIRMED.to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

impl From<&CheckoutError> for Alert {
    fn from(err: &CheckoutError) -> Self {
        Alert::error(err.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        assert_eq!(UiState::default(), UiState::Idle);
        assert!(UiState::Idle.accepts_attempt());
        assert!(UiState::Done.accepts_attempt());
        assert!(!UiState::Loading.accepts_attempt());
        assert!(!UiState::HostedPageActive.accepts_attempt());
    }

    #[test]
    fn test_alert_from_error() {
        let err = CheckoutError::SdkInit {
            code: "Failed".into(),
            message: "No such payment_intent".into(),
        };
        let alert = Alert::from(&err);

        assert_eq!(alert.kind, AlertKind::Error);
        assert_eq!(alert.title, "Error");
        assert_eq!(alert.message, "No such payment_intent");
    }

    #[test]
    fn test_success_alert() {
        let alert = Alert::payment_confirmed();
        assert_eq!(alert.kind, AlertKind::Success);
        assert_eq!(alert.title, "Success");
        assert_eq!(alert.message, "Your payment is confirmed!");
    }
}
