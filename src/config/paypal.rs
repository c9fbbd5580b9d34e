//! Billing provider configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// PayPal REST API configuration.
///
/// Credentials are required and validated at startup; they are never
/// hardcoded and the secret is held as a `SecretString` so it cannot leak
/// through Debug output or logs.
#[derive(Debug, Clone, Deserialize)]
pub struct PayPalConfig {
    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// OAuth2 client id
    #[serde(default)]
    pub client_id: String,

    /// OAuth2 client secret
    #[serde(default = "empty_secret")]
    pub client_secret: SecretString,

    /// Plan id a confirm call must match; unset disables the check
    pub expected_plan_id: Option<String>,
}

impl PayPalConfig {
    /// Validate provider configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        use secrecy::ExposeSecret;

        if self.client_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYPAL__CLIENT_ID"));
        }
        if self.client_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYPAL__CLIENT_SECRET"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        Ok(())
    }
}

impl Default for PayPalConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            client_id: String::new(),
            client_secret: empty_secret(),
            expected_plan_id: None,
        }
    }
}

fn default_base_url() -> String {
    "https://api-m.sandbox.paypal.com".to_string()
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}
