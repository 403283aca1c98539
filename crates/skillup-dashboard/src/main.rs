//! `skillup-admin`: command line console for `SkillUp` administrators

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use skillup_core::Config;
use skillup_dashboard::AppState;
use tracing::debug;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.format = "json".to_string();
    }
    config.validate().context("invalid configuration")?;

    skillup_core::init_logging(&config.logging).context("failed to initialize logging")?;
    debug!(base_url = %config.api.base_url, "configuration loaded");

    let state = AppState::new(config).context("failed to start the console")?;
    cli::run(cli.command, state).await
}
