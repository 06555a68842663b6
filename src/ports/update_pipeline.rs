//! UpdatePipeline port - the host framework's update processing.
//!
//! The adapter hands every inbound update to the pipeline and waits for it.
//! While running, the pipeline may reply through the bot any number of
//! times; those replies land in the still-open conversation.

use async_trait::async_trait;

use super::bot::Bot;
use crate::domain::message::Update;

/// Errors raised while the framework processes an update.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Middleware failed: {0}")]
    Middleware(String),

    #[error("Pipeline unavailable: {0}")]
    Unavailable(String),
}

/// Port for emitting updates into the framework.
#[async_trait]
pub trait UpdatePipeline: Send + Sync {
    /// Processes one update for `bot`.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError` if any middleware fails. Replies already sent
    /// before the failure stay sent.
    async fn emit_update(&self, bot: &dyn Bot, update: Update) -> Result<(), PipelineError>;
}
