//! Actions on Google conversation webhook.
//!
//! - `app` - intent dispatch with fallback and catch handlers
//! - `response` - the webhook response payload
//! - `token` - conversation token codec carrying the data bag

mod app;
mod response;
pub mod token;

pub use app::{
    ActionsApp, ActionsAppOptions, ActionsError, HandlerError, MAIN_INTENT, TEXT_INTENT,
};
pub use response::{
    AppResponse, ExpectedInput, ExpectedIntent, InputPrompt, RichResponse, RichResponseItem,
    SimpleResponse,
};
