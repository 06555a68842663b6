//! Update pipelines shipped with the crate.

mod echo;

pub use echo::EchoPipeline;
