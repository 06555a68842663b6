//! HTTP adapters.
//!
//! - `fulfillment` - the conversation webhook route
//! - `server` - standalone server for bots without a host router

pub mod fulfillment;
pub mod server;

pub use fulfillment::{fulfillment_path, fulfillment_router, FulfillmentAppState};
pub use server::{serve, ServerHandle};
