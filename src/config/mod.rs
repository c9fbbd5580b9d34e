//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the `SUBGATE`
//! prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use subgate::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod dead_letter;
mod error;
mod paypal;
mod server;

pub use dead_letter::DeadLetterConfig;
pub use error::{ConfigError, ValidationError};
pub use paypal::PayPalConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Billing provider configuration (PayPal REST API)
    pub paypal: PayPalConfig,

    /// Dead-letter queue configuration
    #[serde(default)]
    pub dead_letter: DeadLetterConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file if present (development), then reads environment
    /// variables with the `SUBGATE` prefix, e.g.
    /// `SUBGATE__PAYPAL__CLIENT_ID` -> `paypal.client_id`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SUBGATE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values.
    ///
    /// Fails fast at startup: missing provider credentials abort the process
    /// rather than failing on the first confirm call.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.paypal.validate()?;
        Ok(())
    }

    /// Check if running in production environment.
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("SUBGATE__PAYPAL__CLIENT_ID", "client-id");
        env::set_var("SUBGATE__PAYPAL__CLIENT_SECRET", "client-secret");
    }

    fn clear_env() {
        env::remove_var("SUBGATE__PAYPAL__CLIENT_ID");
        env::remove_var("SUBGATE__PAYPAL__CLIENT_SECRET");
        env::remove_var("SUBGATE__PAYPAL__EXPECTED_PLAN_ID");
        env::remove_var("SUBGATE__SERVER__PORT");
        env::remove_var("SUBGATE__SERVER__ENVIRONMENT");
    }

    #[test]
    fn loads_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.paypal.client_id, "client-id");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn server_defaults_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(config.dead_letter.path.is_none());
    }

    #[test]
    fn custom_port_and_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SUBGATE__SERVER__PORT", "3000");
        env::set_var("SUBGATE__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.is_production());
    }

    #[test]
    fn expected_plan_id_is_optional() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("SUBGATE__PAYPAL__EXPECTED_PLAN_ID", "P-1");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.paypal.expected_plan_id.as_deref(), Some("P-1"));
    }
}
