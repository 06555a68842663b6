//! aog-bot - Actions on Google echo bot
//!
//! Loads `AOG_BOT__*` configuration, serves the fulfillment webhook and
//! answers every utterance with the user's own text.

use std::sync::Arc;

use aog_bot::adapters::{ActionsOnGoogleBot, EchoPipeline};
use aog_bot::config::{AppConfig, LoggingConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let bot = ActionsOnGoogleBot::new(config.bot, Arc::new(EchoPipeline::new()))?;
    let Some(server) = bot.listen().await? else {
        tracing::warn!("No port configured; nothing to serve");
        return Ok(());
    };

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    server.shutdown().await?;

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directive()));

    if config.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
