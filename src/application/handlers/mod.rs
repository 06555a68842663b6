//! Application handlers.

pub mod turn;

pub use turn::{TurnHandler, TurnOutcome, DEFAULT_APOLOGY, ESCAPED_ERROR_APOLOGY};
