//! Bot port - the contract a platform bot offers the host framework.
//!
//! The framework builds updates through [`Bot::format_update`], hands them to
//! its middleware, and delivers replies with [`Bot::send_message`]. Platform
//! adapters implement the formatting and raw send steps; the composition of
//! those steps is shared.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::conversation::Conversation;
use crate::domain::message::{
    FormattedMessage, OutgoingMessage, SendOptions, SentMessage, StandardBodyResponse, Update,
};

/// Message kinds a bot can receive or send.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageCapabilities {
    pub text: bool,
}

impl MessageCapabilities {
    pub const TEXT_ONLY: Self = Self { text: true };
}

/// Port implemented by every platform bot.
///
/// None of the operations fail: missing inputs produce empty results, the
/// same way the translators behave.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Identifier the bot is registered under.
    fn id(&self) -> &str;

    /// Platform type name.
    fn bot_type(&self) -> &'static str;

    fn receives(&self) -> MessageCapabilities;

    fn sends(&self) -> MessageCapabilities;

    /// Translates a platform conversation into the neutral update.
    async fn format_update(&self, conversation: Option<Arc<Conversation>>) -> Update;

    /// Translates a neutral outgoing message into the platform reply shape.
    async fn format_outgoing_message(&self, outgoing: &OutgoingMessage) -> FormattedMessage;

    /// Writes an already formatted reply to the platform.
    async fn send_formatted_message(
        &self,
        formatted: &FormattedMessage,
        options: &SendOptions,
    ) -> SentMessage;

    /// Builds the standard body returned to the framework after a send.
    async fn create_standard_body_response_components(
        &self,
        sent_outgoing: &OutgoingMessage,
        sent_raw: &FormattedMessage,
        raw: &SentMessage,
    ) -> StandardBodyResponse;

    /// Formats, sends and reports an outgoing message.
    async fn send_message(
        &self,
        outgoing: &OutgoingMessage,
        options: &SendOptions,
    ) -> StandardBodyResponse {
        let formatted = self.format_outgoing_message(outgoing).await;
        let raw = self.send_formatted_message(&formatted, options).await;
        self.create_standard_body_response_components(outgoing, &formatted, &raw)
            .await
    }

    /// Sends a plain text reply to the sender of `update`.
    async fn reply(&self, update: &Update, text: &str) -> StandardBodyResponse {
        let outgoing = OutgoingMessage::reply_to(update, text);
        let options = SendOptions::for_message(update.message.mid.clone());
        self.send_message(&outgoing, &options).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::{format_outgoing_message, format_update, MessageId};
    use std::sync::Mutex;

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn Bot) {}

    /// Records raw sends so the default composition can be observed.
    struct RecordingBot {
        sent: Mutex<Vec<(FormattedMessage, SendOptions)>>,
    }

    #[async_trait]
    impl Bot for RecordingBot {
        fn id(&self) -> &str {
            "recording"
        }

        fn bot_type(&self) -> &'static str {
            "test"
        }

        fn receives(&self) -> MessageCapabilities {
            MessageCapabilities::TEXT_ONLY
        }

        fn sends(&self) -> MessageCapabilities {
            MessageCapabilities::TEXT_ONLY
        }

        async fn format_update(&self, conversation: Option<Arc<Conversation>>) -> Update {
            format_update(conversation, self.id())
        }

        async fn format_outgoing_message(&self, outgoing: &OutgoingMessage) -> FormattedMessage {
            format_outgoing_message(outgoing)
        }

        async fn send_formatted_message(
            &self,
            formatted: &FormattedMessage,
            options: &SendOptions,
        ) -> SentMessage {
            self.sent
                .lock()
                .unwrap()
                .push((formatted.clone(), options.clone()));
            SentMessage {
                mid: options.mid.clone(),
                response: formatted.response.clone(),
            }
        }

        async fn create_standard_body_response_components(
            &self,
            sent_outgoing: &OutgoingMessage,
            _sent_raw: &FormattedMessage,
            raw: &SentMessage,
        ) -> StandardBodyResponse {
            StandardBodyResponse {
                recipient_id: sent_outgoing.recipient.id.clone(),
                message_id: raw.mid.clone(),
            }
        }
    }

    #[tokio::test]
    async fn send_message_formats_then_sends() {
        let bot = RecordingBot {
            sent: Mutex::new(Vec::new()),
        };
        let outgoing = OutgoingMessage::text("user-1", "hello");
        let options = SendOptions::for_message(MessageId::from("user-1:2"));

        let body = bot.send_message(&outgoing, &options).await;

        assert_eq!(body.recipient_id.as_deref(), Some("user-1"));
        assert_eq!(body.message_id, Some(MessageId::from("user-1:2")));
        let sent = bot.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0.response.as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn reply_addresses_update_sender_and_mid() {
        let bot = RecordingBot {
            sent: Mutex::new(Vec::new()),
        };
        let update = bot.format_update(None).await;

        let body = bot.reply(&update, "pong").await;

        assert_eq!(body.recipient_id, None);
        assert_eq!(body.message_id, Some(MessageId::from("undefined:undefined")));
        assert_eq!(bot.sent.lock().unwrap()[0].0.response.as_deref(), Some("pong"));
    }
}
