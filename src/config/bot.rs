//! Bot settings

use axum::Router;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::error::ValidationError;

/// Settings of an Actions on Google bot.
///
/// Loaded from the environment through [`super::AppConfig`] or from a
/// host-supplied JSON object through [`BotSettings::from_value`]. An
/// existing router can only be attached in code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotSettings {
    /// Bot identifier, also the first segment of the fulfillment path
    #[serde(default)]
    pub id: Option<String>,

    /// Port to listen on when no router is supplied
    #[serde(default)]
    pub port: Option<u16>,

    /// Existing router the fulfillment route is merged into
    #[serde(skip)]
    pub server: Option<Router>,

    /// Logs webhook request and response bodies
    #[serde(default)]
    pub debug: bool,

    /// Actions on Google project id
    #[serde(default, alias = "action_id")]
    pub action_id: Option<String>,

    /// Account linking client id
    #[serde(default, alias = "client_id")]
    pub client_id: Option<String>,

    /// Reply used when a turn fails
    #[serde(default, alias = "error_message")]
    pub error_message: Option<String>,
}

impl BotSettings {
    pub fn new(action_id: impl Into<String>) -> Self {
        Self {
            action_id: Some(action_id.into()),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_server(mut self, server: Router) -> Self {
        self.server = Some(server);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn with_error_message(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self
    }

    /// Reads settings from a loosely typed JSON object, rejecting values of
    /// the wrong type. Presence is checked later by [`BotSettings::validate`]
    /// so that a router can still be attached.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let settings = value.as_object().ok_or(ValidationError::NotAnObject)?;

        let port = match present(settings, "port") {
            None => None,
            Some(port) => Some(
                port.as_u64()
                    .and_then(|p| u16::try_from(p).ok())
                    .ok_or(ValidationError::InvalidField {
                        field: "port",
                        expected: "numeric",
                    })?,
            ),
        };
        let debug = match present(settings, "debug") {
            None => false,
            Some(debug) => debug.as_bool().ok_or(ValidationError::InvalidField {
                field: "debug",
                expected: "boolean",
            })?,
        };

        Ok(Self {
            id: string_field(
                settings,
                "id",
                ValidationError::InvalidField {
                    field: "id",
                    expected: "string",
                },
            )?,
            port,
            server: None,
            debug,
            action_id: string_field(settings, "actionId", ValidationError::InvalidActionId)?,
            client_id: string_field(settings, "clientId", ValidationError::InvalidClientId)?,
            error_message: string_field(
                settings,
                "errorMessage",
                ValidationError::InvalidErrorMessage,
            )?,
        })
    }

    /// Checks that the bot can be reached and names its project.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.server.is_none() && self.port.is_none() {
            return Err(ValidationError::MissingListener);
        }
        if self.action_id.is_none() {
            return Err(ValidationError::InvalidActionId);
        }
        Ok(())
    }
}

fn present<'a>(settings: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    settings.get(key).filter(|value| !value.is_null())
}

fn string_field(
    settings: &Map<String, Value>,
    key: &str,
    err: ValidationError,
) -> Result<Option<String>, ValidationError> {
    match present(settings, key) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(err),
    }
}
