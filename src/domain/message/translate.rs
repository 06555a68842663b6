//! Translators between the platform conversation and the neutral shapes.
//!
//! None of these fail: missing input degrades to empty or absent fields.

use std::sync::Arc;

use super::{
    FormattedMessage, OutgoingMessage, Participant, SentMessage, StandardBodyResponse, Update,
    UpdateMessage,
};
use crate::domain::conversation::{turn, Conversation};
use crate::domain::foundation::Timestamp;

/// Builds the neutral update for a conversation turn addressed to
/// `recipient_id`.
pub fn format_update(conversation: Option<Arc<Conversation>>, recipient_id: &str) -> Update {
    let current = conversation.as_deref();
    let message = UpdateMessage {
        mid: turn::message_id(current),
        seq: turn::turn(current),
        text: current
            .and_then(|c| c.request().query())
            .unwrap_or_default()
            .to_string(),
    };

    Update {
        sender: Participant {
            id: turn::conversation_id(current).map(str::to_owned),
        },
        recipient: Participant::new(recipient_id),
        timestamp: Timestamp::now(),
        message,
        raw: conversation,
    }
}

/// Extracts the reply text for the platform.
pub fn format_outgoing_message(outgoing: &OutgoingMessage) -> FormattedMessage {
    FormattedMessage {
        response: outgoing.message.as_ref().and_then(|m| m.text.clone()),
    }
}

/// Recipient and message identifier reported back after a send.
pub fn standard_body_response(
    sent_outgoing: &OutgoingMessage,
    raw: &SentMessage,
) -> StandardBodyResponse {
    StandardBodyResponse {
        recipient_id: sent_outgoing.recipient.id.clone(),
        message_id: raw.mid.clone(),
    }
}
