//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during bot settings validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Bots of type actions-on-google must be defined with an 'expressApp' or 'port' in their settings")]
    MissingListener,

    #[error("Bots of type actions-on-google must be defined with an string 'actionId' in their settings")]
    InvalidActionId,

    #[error("Bots of type actions-on-google should be defined with a string 'clientId' in their settings")]
    InvalidClientId,

    #[error("Bots of type actions-on-google should be defined with a string 'errorMessage' in their settings")]
    InvalidErrorMessage,

    #[error("Bots of type actions-on-google should be defined with a {expected} '{field}' in their settings")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Bot settings must be a JSON object")]
    NotAnObject,
}
