//! Screen view model: what the checkout screen renders for a given state.

use checkout_core::CheckoutStrategy;
use serde::Serialize;

pub const SCREEN_TITLE: &str = "Select Checkout Method";

/// One strategy button on the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CheckoutOption {
    pub label: &'static str,
    pub strategy: CheckoutStrategy,
}

impl CheckoutOption {
    pub const HOSTED_PAGE: CheckoutOption = CheckoutOption {
        label: "Hosted Page Checkout",
        strategy: CheckoutStrategy::HostedPage,
    };

    pub const NATIVE_SHEET: CheckoutOption = CheckoutOption {
        label: "Payment Sheet Checkout",
        strategy: CheckoutStrategy::NativeSheet,
    };

    pub fn all() -> [CheckoutOption; 2] {
        [Self::HOSTED_PAGE, Self::NATIVE_SHEET]
    }
}

/// What the screen shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ScreenView {
    /// Title, one button per strategy, optional spinner
    Menu {
        options: Vec<CheckoutOption>,
        show_spinner: bool,
    },
    /// The embedded renderer fills the screen
    HostedPage,
}

impl ScreenView {
    pub fn title(&self) -> Option<&'static str> {
        match self {
            ScreenView::Menu { .. } => Some(SCREEN_TITLE),
            ScreenView::HostedPage => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ScreenView::Menu { show_spinner: true, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_view() {
        let view = ScreenView::Menu {
            options: CheckoutOption::all().to_vec(),
            show_spinner: false,
        };
        assert_eq!(view.title(), Some("Select Checkout Method"));
        assert!(!view.is_loading());
        assert_eq!(ScreenView::HostedPage.title(), None);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["view"], "menu");
        assert_eq!(json["options"][0]["strategy"], "hosted_page");
    }
}
