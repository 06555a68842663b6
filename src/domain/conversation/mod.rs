//! Conversation module - the platform's per-request session and its turn
//! counter.

mod conversation;
mod request;
pub mod turn;

pub use conversation::{Conversation, ConversationData};
pub use request::{
    AppRequest, Argument, ConversationInfo, ConversationType, Input, RawInput, RawInputs,
    RequestUser,
};
