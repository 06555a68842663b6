//! Turn counter accessors.
//!
//! Every function here tolerates a missing conversation so callers can work
//! with whatever the platform handed them. The counter lives in the
//! conversation's data bag under [`TURN_KEY`].

use serde_json::Value;

use super::conversation::Conversation;
use crate::domain::message::MessageId;

/// Data bag key holding the turn counter.
pub const TURN_KEY: &str = "turn";

/// Conversation identifier, if any.
pub fn conversation_id(conversation: Option<&Conversation>) -> Option<&str> {
    conversation.and_then(Conversation::id)
}

/// Stored turn counter, if any.
pub fn turn(conversation: Option<&Conversation>) -> Option<u64> {
    conversation
        .and_then(|c| c.data_value(TURN_KEY))
        .and_then(|v| v.as_u64())
}

/// Stores the turn counter.
///
/// A zero or missing turn is not written, so the stored counter stays absent
/// until the first non-zero turn.
pub fn set_turn(conversation: Option<&Conversation>, turn: Option<u64>) {
    let (Some(conversation), Some(turn)) = (conversation, turn) else {
        return;
    };
    if turn != 0 {
        conversation.set_data_value(TURN_KEY, Value::from(turn));
    }
}

/// Turn that follows `current`: one past it, or 0 when nothing is stored.
pub fn next_turn(current: Option<u64>) -> u64 {
    current.map_or(0, |turn| turn.saturating_add(1))
}

/// Correlation identifier for the conversation's current turn.
pub fn message_id(conversation: Option<&Conversation>) -> MessageId {
    MessageId::from_parts(conversation_id(conversation), turn(conversation))
}
