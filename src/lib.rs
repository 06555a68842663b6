//! Actions on Google bot adapter
//!
//! Connects the Actions on Google conversation webhook to a bot framework's
//! update pipeline: requests become framework updates, replies sent for an
//! update are asked on the conversation it came from.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
