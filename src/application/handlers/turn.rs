//! TurnHandler - runs one conversation turn through the framework.
//!
//! A turn advances the conversation's turn counter, registers the
//! conversation under the turn's message identifier, builds the neutral
//! update and emits it. Pipeline failures are answered with an apology
//! instead of being propagated. The registry entry is released by a scoped
//! guard whatever the outcome.

use std::error::Error;
use std::sync::Arc;

use tracing::{debug, error};

use crate::application::registry::ConversationRegistry;
use crate::domain::conversation::{turn, Conversation};
use crate::ports::{Bot, PipelineError, UpdatePipeline};

/// Reply written when the pipeline fails a turn and no custom message is
/// configured.
pub const DEFAULT_APOLOGY: &str = "I'm sorry, I can't help at the moment. Please try again later";

/// Reply written when an error escapes the turn handler.
pub const ESCAPED_ERROR_APOLOGY: &str = "I'm sorry, I am unable to respond at the moment";

/// How a turn ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The pipeline processed the update.
    Completed,
    /// The pipeline failed; the user got the apology.
    Failed,
}

/// Handler for conversation turns.
pub struct TurnHandler {
    registry: ConversationRegistry,
    pipeline: Arc<dyn UpdatePipeline>,
    apology: String,
}

impl TurnHandler {
    pub fn new(registry: ConversationRegistry, pipeline: Arc<dyn UpdatePipeline>) -> Self {
        Self {
            registry,
            pipeline,
            apology: DEFAULT_APOLOGY.to_string(),
        }
    }

    /// Replaces the apology written when the pipeline fails.
    pub fn with_apology(mut self, apology: impl Into<String>) -> Self {
        self.apology = apology.into();
        self
    }

    pub fn registry(&self) -> &ConversationRegistry {
        &self.registry
    }

    /// Runs one turn of `conversation` for `bot`.
    pub async fn handle(&self, bot: &dyn Bot, conversation: Arc<Conversation>) -> TurnOutcome {
        let current = turn::turn(Some(&*conversation));
        turn::set_turn(Some(&*conversation), Some(turn::next_turn(current)));

        let registration = self.registry.register(
            turn::message_id(Some(&*conversation)),
            Arc::clone(&conversation),
        );

        let outcome = match self.process(bot, Arc::clone(&conversation)).await {
            Ok(()) => TurnOutcome::Completed,
            Err(err) => {
                error!(
                    mid = %registration.mid(),
                    error = %err,
                    "Error processing conversation turn"
                );
                conversation.ask(self.apology.as_str());
                TurnOutcome::Failed
            }
        };

        drop(registration);
        debug!(entries = self.registry.len(), "Conversation registry size");
        outcome
    }

    /// Answers an error that escaped [`TurnHandler::handle`] and drops the
    /// conversation's registry entry if it still belongs to `conversation`.
    pub fn handle_error(&self, conversation: &Arc<Conversation>, err: &(dyn Error + 'static)) {
        error!(
            intent = conversation.intent().unwrap_or_default(),
            error = %err,
            "Unhandled error processing intent"
        );
        conversation.ask(ESCAPED_ERROR_APOLOGY);
        self.registry
            .delete_if(&turn::message_id(Some(&**conversation)), conversation);
    }

    async fn process(
        &self,
        bot: &dyn Bot,
        conversation: Arc<Conversation>,
    ) -> Result<(), PipelineError> {
        let update = bot.format_update(Some(conversation)).await;
        debug!(mid = %update.message.mid, text = %update.message.text, "Emitting update");
        self.pipeline.emit_update(bot, update).await
    }
}
