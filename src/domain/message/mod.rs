//! Message module - the framework-neutral message shapes and the translators
//! between them and the platform conversation.

mod message_id;
mod translate;

pub use message_id::MessageId;
pub use translate::{format_outgoing_message, format_update, standard_body_response};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::conversation::Conversation;
use crate::domain::foundation::Timestamp;

/// Either end of a message exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: Option<String>,
}

impl Participant {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }
}

/// Message part of an [`Update`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMessage {
    pub mid: MessageId,
    pub seq: Option<u64>,
    pub text: String,
}

/// Inbound message in the framework's neutral shape.
#[derive(Debug, Clone, Serialize)]
pub struct Update {
    /// Platform conversation the update was built from.
    #[serde(skip)]
    pub raw: Option<Arc<Conversation>>,
    pub sender: Participant,
    pub recipient: Participant,
    pub timestamp: Timestamp,
    pub message: UpdateMessage,
}

/// Text body of an [`OutgoingMessage`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingContent {
    pub text: Option<String>,
}

/// Reply produced by the framework, before platform formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    #[serde(default)]
    pub recipient: Participant,
    #[serde(default)]
    pub message: Option<OutgoingContent>,
}

impl OutgoingMessage {
    /// Plain text message for a recipient.
    pub fn text(recipient_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient: Participant::new(recipient_id),
            message: Some(OutgoingContent {
                text: Some(text.into()),
            }),
        }
    }

    /// Plain text reply to the sender of an update.
    pub fn reply_to(update: &Update, text: impl Into<String>) -> Self {
        Self {
            recipient: update.sender.clone(),
            message: Some(OutgoingContent {
                text: Some(text.into()),
            }),
        }
    }
}

/// Outgoing message in the platform's reply shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedMessage {
    pub response: Option<String>,
}

/// Delivery options for a send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOptions {
    /// Message the reply answers; selects the open conversation.
    pub mid: Option<MessageId>,
}

impl SendOptions {
    pub fn for_message(mid: MessageId) -> Self {
        Self { mid: Some(mid) }
    }
}

/// What was handed to the platform for a send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub mid: Option<MessageId>,
    pub response: Option<String>,
}

/// Standard body returned to the framework after a send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardBodyResponse {
    pub recipient_id: Option<String>,
    pub message_id: Option<MessageId>,
}
