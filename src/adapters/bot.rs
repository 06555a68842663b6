//! ActionsOnGoogleBot - the Actions on Google bot offered to the framework.
//!
//! Wires the conversation webhook to the turn handler: the main intent and
//! every unmatched intent start a turn, errors escaping a turn are answered
//! by the turn handler's cleanup path. Replies the framework sends for a
//! turn are looked up in the conversation registry by message identifier and
//! asked on the conversation that started it.

use std::io;
use std::sync::{Arc, Weak};

use async_trait::async_trait;
use axum::Router;
use tracing::{debug, info, warn};

use crate::adapters::actions::{ActionsApp, ActionsAppOptions, HandlerError, MAIN_INTENT};
use crate::adapters::http::{fulfillment_router, serve, ServerHandle};
use crate::application::{ConversationRegistry, TurnHandler, ESCAPED_ERROR_APOLOGY};
use crate::config::{BotSettings, ValidationError};
use crate::domain::conversation::Conversation;
use crate::domain::message::{
    format_outgoing_message, format_update, standard_body_response, FormattedMessage,
    OutgoingMessage, SendOptions, SentMessage, StandardBodyResponse, Update,
};
use crate::ports::{Bot, MessageCapabilities, UpdatePipeline};

/// Platform type name.
pub const BOT_TYPE: &str = "actions-on-google";

/// Actions on Google bot.
pub struct ActionsOnGoogleBot {
    id: String,
    port: Option<u16>,
    debug: bool,
    action_id: String,
    client_id: Option<String>,
    error_message: Option<String>,
    turns: TurnHandler,
    app: Arc<ActionsApp>,
    request_listener: Router,
    embedded: bool,
}

impl ActionsOnGoogleBot {
    /// Creates a bot whose turns are processed by `pipeline`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the settings name neither a port nor a
    /// router, or lack the action id.
    pub fn new(
        settings: BotSettings,
        pipeline: Arc<dyn UpdatePipeline>,
    ) -> Result<Arc<Self>, ValidationError> {
        settings.validate()?;
        let BotSettings {
            id,
            port,
            server,
            debug,
            action_id,
            client_id,
            error_message,
        } = settings;
        let action_id = action_id.ok_or(ValidationError::InvalidActionId)?;
        let id = id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| BOT_TYPE.to_string());

        let mut turns = TurnHandler::new(ConversationRegistry::new(), pipeline);
        if let Some(message) = &error_message {
            turns = turns.with_apology(message.clone());
        }

        let bot = Arc::new_cyclic(|bot: &Weak<Self>| {
            let options = ActionsAppOptions {
                verification: Some(action_id.clone()),
                client_id: client_id.clone(),
                debug,
            };
            let app = Arc::new(actions_app(bot.clone(), options));
            let route = fulfillment_router(&id, Arc::clone(&app));
            let embedded = server.is_some();
            let request_listener = match server {
                Some(server) => server.merge(route),
                None => route,
            };

            Self {
                id,
                port,
                debug,
                action_id,
                client_id,
                error_message,
                turns,
                app,
                request_listener,
                embedded,
            }
        });

        debug!(id = %bot.id, action_id = %bot.action_id, "Created bot");
        Ok(bot)
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn action_id(&self) -> &str {
        &self.action_id
    }

    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Conversations with a turn in flight, by message identifier.
    pub fn registry(&self) -> &ConversationRegistry {
        self.turns.registry()
    }

    pub fn actions_app(&self) -> &Arc<ActionsApp> {
        &self.app
    }

    /// Router serving the fulfillment route, merged into the host router when
    /// one was supplied.
    pub fn request_listener(&self) -> Router {
        self.request_listener.clone()
    }

    /// Starts serving on the configured port. Returns `None` when the bot is
    /// mounted on a host router, which the host serves itself.
    pub async fn listen(&self) -> io::Result<Option<ServerHandle>> {
        if self.embedded {
            debug!(id = %self.id, "Bot mounted on host router");
            return Ok(None);
        }
        let Some(port) = self.port else {
            return Ok(None);
        };

        let handle = serve(self.request_listener(), port).await?;
        info!(id = %self.id, addr = %handle.local_addr(), "Bot listening");
        Ok(Some(handle))
    }
}

fn actions_app(bot: Weak<ActionsOnGoogleBot>, options: ActionsAppOptions) -> ActionsApp {
    let on_turn = {
        let bot = bot.clone();
        move |conversation: Arc<Conversation>, _query: Option<String>| {
            run_turn(bot.clone(), conversation)
        }
    };

    ActionsApp::new(options)
        .intent(MAIN_INTENT, on_turn.clone())
        .fallback(on_turn)
        .catch(move |conversation, err| match bot.upgrade() {
            Some(bot) => bot.turns.handle_error(conversation, err),
            None => conversation.ask(ESCAPED_ERROR_APOLOGY),
        })
}

async fn run_turn(
    bot: Weak<ActionsOnGoogleBot>,
    conversation: Arc<Conversation>,
) -> Result<(), HandlerError> {
    let Some(bot) = bot.upgrade() else {
        return Err(HandlerError::BotUnavailable);
    };
    bot.turns.handle(bot.as_ref(), conversation).await;
    Ok(())
}

#[async_trait]
impl Bot for ActionsOnGoogleBot {
    fn id(&self) -> &str {
        &self.id
    }

    fn bot_type(&self) -> &'static str {
        BOT_TYPE
    }

    fn receives(&self) -> MessageCapabilities {
        MessageCapabilities::TEXT_ONLY
    }

    fn sends(&self) -> MessageCapabilities {
        MessageCapabilities::TEXT_ONLY
    }

    async fn format_update(&self, conversation: Option<Arc<Conversation>>) -> Update {
        format_update(conversation, &self.id)
    }

    async fn format_outgoing_message(&self, outgoing: &OutgoingMessage) -> FormattedMessage {
        format_outgoing_message(outgoing)
    }

    async fn send_formatted_message(
        &self,
        formatted: &FormattedMessage,
        options: &SendOptions,
    ) -> SentMessage {
        match options.mid.as_ref().and_then(|mid| self.registry().get(mid)) {
            Some(conversation) => {
                if let Some(response) = &formatted.response {
                    conversation.ask(response.as_str());
                }
            }
            None => warn!(mid = ?options.mid, "No conversation registered for message"),
        }

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
        standard_body_response(sent_outgoing, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::MessageId;
    use crate::ports::PipelineError;
    use serde_json::json;

    struct NoopPipeline;

    #[async_trait]
    impl UpdatePipeline for NoopPipeline {
        async fn emit_update(&self, _bot: &dyn Bot, _update: Update) -> Result<(), PipelineError> {
            Ok(())
        }
    }

    fn bot(settings: BotSettings) -> Arc<ActionsOnGoogleBot> {
        ActionsOnGoogleBot::new(settings, Arc::new(NoopPipeline)).unwrap()
    }

    #[test]
    fn creates_with_full_settings() {
        let bot = bot(BotSettings::new("MyAction")
            .with_id("MyBot")
            .with_port(8888)
            .with_debug(true)
            .with_client_id("MyClient")
            .with_error_message("My error message"));

        assert_eq!(bot.id(), "MyBot");
        assert_eq!(bot.bot_type(), "actions-on-google");
        assert_eq!(bot.receives(), MessageCapabilities { text: true });
        assert_eq!(bot.sends(), MessageCapabilities { text: true });
        assert_eq!(bot.port(), Some(8888));
        assert!(bot.debug());
        assert_eq!(bot.action_id(), "MyAction");
        assert_eq!(bot.client_id(), Some("MyClient"));
        assert_eq!(bot.error_message(), Some("My error message"));
        assert!(bot.registry().is_empty());
    }

    #[test]
    fn id_defaults_to_type() {
        assert_eq!(bot(BotSettings::new("A").with_port(8080)).id(), BOT_TYPE);
        assert_eq!(bot(BotSettings::new("A").with_port(8080).with_id("")).id(), BOT_TYPE);
    }

    #[test]
    fn app_carries_settings_as_options() {
        let bot = bot(BotSettings::new("MyAction").with_port(8080).with_client_id("C"));
        let options = bot.actions_app().options();

        assert_eq!(options.verification.as_deref(), Some("MyAction"));
        assert_eq!(options.client_id.as_deref(), Some("C"));
        assert!(bot.actions_app().has_intent(MAIN_INTENT));
    }

    #[test]
    fn missing_listener_fails() {
        let err = ActionsOnGoogleBot::new(BotSettings::default(), Arc::new(NoopPipeline))
            .err()
            .unwrap();
        assert!(err
            .to_string()
            .starts_with(&format!("Bots of type {}", BOT_TYPE)));
    }

    #[tokio::test]
    async fn send_to_registered_conversation_asks() {
        let bot = bot(BotSettings::new("A").with_port(8080));
        let conversation = Arc::new(Conversation::default());
        let mid = MessageId::from("ABCDEFGH:2");
        bot.registry().put(mid.clone(), Arc::clone(&conversation));

        let sent = bot
            .send_formatted_message(
                &FormattedMessage {
                    response: Some("Hello".to_string()),
                },
                &SendOptions::for_message(mid.clone()),
            )
            .await;

        assert_eq!(sent.mid, Some(mid));
        assert_eq!(sent.response.as_deref(), Some("Hello"));
        assert_eq!(conversation.replies(), vec!["Hello"]);
    }

    #[tokio::test]
    async fn send_without_response_asks_nothing() {
        let bot = bot(BotSettings::new("A").with_port(8080));
        let conversation = Arc::new(Conversation::default());
        let mid = MessageId::from("ABCDEFGH:2");
        bot.registry().put(mid.clone(), Arc::clone(&conversation));

        let sent = bot
            .send_formatted_message(
                &FormattedMessage { response: None },
                &SendOptions::for_message(mid),
            )
            .await;

        assert!(sent.response.is_none());
        assert!(conversation.replies().is_empty());
    }

    #[tokio::test]
    async fn send_to_unknown_mid_resolves() {
        let bot = bot(BotSettings::new("A").with_port(8080));

        let sent = bot
            .send_formatted_message(
                &FormattedMessage {
                    response: Some("Hello".to_string()),
                },
                &SendOptions::for_message(MessageId::from("unknown:1")),
            )
            .await;

        assert_eq!(sent.mid, Some(MessageId::from("unknown:1")));
        assert_eq!(sent.response.as_deref(), Some("Hello"));
    }

    #[tokio::test]
    async fn standard_body_reports_recipient_and_mid() {
        let bot = bot(BotSettings::new("A").with_port(8080));
        let outgoing = OutgoingMessage::text("user-1", "Hi");
        let raw = SentMessage {
            mid: Some(MessageId::from("ABCDEFGH:3")),
            response: Some("Hi".to_string()),
        };

        let body = bot
            .create_standard_body_response_components(
                &outgoing,
                &FormattedMessage::default(),
                &raw,
            )
            .await;

        assert_eq!(body.recipient_id.as_deref(), Some("user-1"));
        assert_eq!(body.message_id, Some(MessageId::from("ABCDEFGH:3")));
    }

    #[tokio::test]
    async fn embedded_bot_does_not_listen() {
        let bot = bot(BotSettings::new("A").with_server(Router::new()));
        assert!(bot.listen().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn turn_through_app_replies_and_cleans_up() {
        struct Echo;

        #[async_trait]
        impl UpdatePipeline for Echo {
            async fn emit_update(
                &self,
                bot: &dyn Bot,
                update: Update,
            ) -> Result<(), PipelineError> {
                bot.reply(&update, &update.message.text).await;
                Ok(())
            }
        }

        let bot = ActionsOnGoogleBot::new(BotSettings::new("A").with_port(8080), Arc::new(Echo))
            .unwrap();
        let request = serde_json::from_value(json!({
            "conversation": {
                "conversationId": "ABCDEFGH",
                "conversationToken": "{\"data\":{\"turn\":1}}"
            },
            "inputs": [{ "intent": "actions.intent.TEXT", "rawInputs": [{ "query": "hello" }] }]
        }))
        .unwrap();

        let response = bot.actions_app().handle(request).await.unwrap();

        assert_eq!(response.texts(), vec!["hello"]);
        assert_eq!(
            response.conversation_token.as_deref(),
            Some("{\"data\":{\"turn\":2}}")
        );
        assert!(bot.registry().is_empty());
    }
}
