//! Application layer - turn orchestration and the conversation registry.
//!
//! This layer coordinates the domain translators with the framework pipeline
//! port.

pub mod handlers;
pub mod registry;

pub use handlers::{TurnHandler, TurnOutcome, DEFAULT_APOLOGY, ESCAPED_ERROR_APOLOGY};
pub use registry::{ConversationRegistry, Registration};
