//! Domain layer - conversations, turns and the neutral message shapes.

pub mod conversation;
pub mod foundation;
pub mod message;
