//! # Payment Sheet Configuration
//!
//! Fixed settings passed to the payment SDK when the sheet is initialized.
//! Loaded from environment variables or `config/checkout.toml`.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_MERCHANT_DISPLAY_NAME: &str = "Your Merchant Name";
pub const DEFAULT_RETURN_URL: &str = "myapp://stripe-redirect";

/// Payment sheet settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSheetConfig {
    /// Name shown at the top of the sheet
    #[serde(default = "default_merchant_display_name")]
    pub merchant_display_name: String,

    /// Custom-scheme URL the SDK redirects to after bank authentication
    #[serde(default = "default_return_url")]
    pub return_url: String,
}

fn default_merchant_display_name() -> String {
    DEFAULT_MERCHANT_DISPLAY_NAME.to_string()
}

fn default_return_url() -> String {
    DEFAULT_RETURN_URL.to_string()
}

impl PaymentSheetConfig {
    pub fn new(merchant_display_name: impl Into<String>, return_url: impl Into<String>) -> Self {
        Self {
            merchant_display_name: merchant_display_name.into(),
            return_url: return_url.into(),
        }
    }

    /// Load from environment variables, falling back to the defaults.
    ///
    /// Optional env vars:
    /// - `CHECKOUT_MERCHANT_NAME`
    /// - `CHECKOUT_RETURN_URL`
    pub fn from_env() -> CheckoutResult<Self> {
        let config = Self {
            merchant_display_name: env::var("CHECKOUT_MERCHANT_NAME")
                .unwrap_or_else(|_| default_merchant_display_name()),
            return_url: env::var("CHECKOUT_RETURN_URL").unwrap_or_else(|_| default_return_url()),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML document with an optional `[payment_sheet]` table
    pub fn from_toml(toml_str: &str) -> CheckoutResult<Self> {
        #[derive(Deserialize)]
        struct File {
            #[serde(default)]
            payment_sheet: Option<PaymentSheetConfig>,
        }

        let file: File = toml::from_str(toml_str)
            .map_err(|e| CheckoutError::Configuration(format!("Invalid checkout config: {}", e)))?;
        let config = file.payment_sheet.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the SDK would refuse
    pub fn validate(&self) -> CheckoutResult<()> {
        if self.merchant_display_name.trim().is_empty() {
            return Err(CheckoutError::Configuration(
                "merchant display name must not be empty".to_string(),
            ));
        }

        let scheme = self.return_scheme();
        if scheme.is_empty() || scheme == "http" || scheme == "https" {
            return Err(CheckoutError::Configuration(format!(
                "return URL must use a custom app scheme, got {}",
                self.return_url
            )));
        }

        Ok(())
    }

    /// Scheme part of the return URL (e.g. "myapp")
    pub fn return_scheme(&self) -> &str {
        self.return_url
            .split_once("://")
            .map(|(scheme, _)| scheme)
            .unwrap_or_default()
    }
}

impl Default for PaymentSheetConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MERCHANT_DISPLAY_NAME, DEFAULT_RETURN_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PaymentSheetConfig::default();
        assert_eq!(config.merchant_display_name, "Your Merchant Name");
        assert_eq!(config.return_url, "myapp://stripe-redirect");
        assert_eq!(config.return_scheme(), "myapp");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_return_url_must_be_custom_scheme() {
        let config = PaymentSheetConfig::new("Shop", "https://example.com/return");
        assert!(config.validate().is_err());

        let config = PaymentSheetConfig::new("Shop", "stripe-redirect");
        assert!(config.validate().is_err());

        let config = PaymentSheetConfig::new("  ", "myapp://stripe-redirect");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = PaymentSheetConfig::from_toml(
            r#"
            [payment_sheet]
            merchant_display_name = "Lightning Shop"
            "#,
        )
        .unwrap();
        assert_eq!(config.merchant_display_name, "Lightning Shop");
        assert_eq!(config.return_url, DEFAULT_RETURN_URL);

        let config = PaymentSheetConfig::from_toml("").unwrap();
        assert_eq!(config, PaymentSheetConfig::default());

        assert!(PaymentSheetConfig::from_toml("payment_sheet = 3").is_err());
    }

    #[test]
    fn test_shipped_config_file() {
        let config =
            PaymentSheetConfig::from_toml(include_str!("../../../config/checkout.toml")).unwrap();
        assert_eq!(config, PaymentSheetConfig::default());
    }
}
