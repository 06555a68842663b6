//! EchoPipeline - replies to every update with the user's own text.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::message::Update;
use crate::ports::{Bot, PipelineError, UpdatePipeline};

/// Pipeline that echoes the user's text, optionally prefixed.
#[derive(Debug, Clone, Default)]
pub struct EchoPipeline {
    prefix: String,
}

impl EchoPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

#[async_trait]
impl UpdatePipeline for EchoPipeline {
    async fn emit_update(&self, bot: &dyn Bot, update: Update) -> Result<(), PipelineError> {
        let text = format!("{}{}", self.prefix, update.message.text);
        let body = bot.reply(&update, &text).await;
        debug!(message_id = ?body.message_id, "Echoed update");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ActionsOnGoogleBot;
    use crate::config::BotSettings;
    use crate::domain::conversation::{AppRequest, Conversation};
    use crate::domain::message::MessageId;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn echoes_to_registered_conversation() {
        let pipeline = Arc::new(EchoPipeline::with_prefix("You said: "));
        let bot = ActionsOnGoogleBot::new(BotSettings::new("A").with_port(8080), pipeline.clone())
            .unwrap();
        let request: AppRequest = serde_json::from_value(json!({
            "conversation": { "conversationId": "ABCDEFGH" },
            "inputs": [{ "rawInputs": [{ "query": "hello" }] }]
        }))
        .unwrap();
        let conversation = Arc::new(Conversation::new(request));
        let mid = MessageId::from("ABCDEFGH:1");
        bot.registry().put(mid.clone(), Arc::clone(&conversation));

        let mut update = bot.format_update(Some(Arc::clone(&conversation))).await;
        update.message.mid = mid;
        pipeline.emit_update(bot.as_ref(), update).await.unwrap();

        assert_eq!(conversation.replies(), vec!["You said: hello"]);
    }
}
