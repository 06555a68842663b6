//! Conversation token codec.
//!
//! The platform echoes `conversationToken` back on the next request of the
//! same conversation. The token carries the data bag as `{"data": {...}}`,
//! which is how the turn counter survives between webhook calls.

use serde_json::{json, Value};
use tracing::warn;

use crate::domain::conversation::ConversationData;

/// Restores the data bag from a token; a missing or malformed token yields
/// an empty bag.
pub fn decode(token: Option<&str>) -> ConversationData {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return ConversationData::new();
    };
    match serde_json::from_str::<Value>(token) {
        Ok(Value::Object(mut root)) => match root.remove("data") {
            Some(Value::Object(data)) => data,
            Some(_) => {
                warn!("Ignoring conversation token whose data is not an object");
                ConversationData::new()
            }
            None => ConversationData::new(),
        },
        Ok(_) => {
            warn!("Ignoring conversation token that is not a JSON object");
            ConversationData::new()
        }
        Err(e) => {
            warn!(error = %e, "Ignoring malformed conversation token");
            ConversationData::new()
        }
    }
}

/// Serializes the data bag into a token.
pub fn encode(data: &ConversationData) -> String {
    json!({ "data": data }).to_string()
}
