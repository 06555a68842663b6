//! HTTP adapter for the conversation webhook.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::{FulfillmentApiError, FulfillmentAppState};
pub use routes::{fulfillment_path, fulfillment_router};
