//! Adapters - Implementations of port interfaces.
//!
//! - `actions` - Actions on Google conversation webhook dispatch
//! - `bot` - the Actions on Google [`crate::ports::Bot`]
//! - `http` - axum fulfillment route and standalone server
//! - `pipeline` - bundled update pipelines

pub mod actions;
pub mod bot;
pub mod http;
pub mod pipeline;

pub use actions::{ActionsApp, ActionsAppOptions, ActionsError, AppResponse, HandlerError};
pub use bot::{ActionsOnGoogleBot, BOT_TYPE};
pub use http::{fulfillment_router, ServerHandle};
pub use pipeline::EchoPipeline;
