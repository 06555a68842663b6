//! Application configuration module
//!
//! Configuration is loaded from environment variables with the `AOG_BOT`
//! prefix using the `config` and `dotenvy` crates. Nested values use double
//! underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use aog_bot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod bot;
mod error;
mod logging;

pub use bot::BotSettings;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Bot settings (port, action id, error message)
    #[serde(default)]
    pub bot: BotSettings,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads `.env` if present, then reads `AOG_BOT__`-prefixed variables:
    ///
    /// - `AOG_BOT__BOT__PORT=8080` -> `bot.port = 8080`
    /// - `AOG_BOT__BOT__ACTION_ID=my-action` -> `bot.action_id = "my-action"`
    /// - `AOG_BOT__LOGGING__JSON=true` -> `logging.json = true`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("AOG_BOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.bot.validate()
    }
}
