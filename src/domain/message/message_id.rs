//! Message identifier value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder rendered for a missing identifier component.
const MISSING: &str = "undefined";

/// Correlation key `{conversationId}:{turn}` for one conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Wraps an existing identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the identifier from its parts; a missing part renders as
    /// `undefined`.
    pub fn from_parts(conversation_id: Option<&str>, turn: Option<u64>) -> Self {
        let turn = turn.map_or_else(|| MISSING.to_string(), |t| t.to_string());
        Self(format!("{}:{}", conversation_id.unwrap_or(MISSING), turn))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MessageId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MessageId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
