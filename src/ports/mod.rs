//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the adapter core and the host bot framework. Adapters implement these
//! ports.
//!
//! - `Bot` - What a platform bot offers the framework (formatting, sending)
//! - `UpdatePipeline` - The framework's middleware chain that consumes updates

mod bot;
mod update_pipeline;

pub use bot::{Bot, MessageCapabilities};
pub use update_pipeline::{PipelineError, UpdatePipeline};
