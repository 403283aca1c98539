//! Core configuration, errors and logging for the `SkillUp` admin console

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{
    ApiConfig, Config, DashboardConfig, LoggingConfig, RetryConfig, SessionConfig, SettingsConfig,
};
pub use error::{Error, Result};

/// Initialize the logging system
///
/// `RUST_LOG` wins over the configured level. Output goes to stderr so that
/// command output on stdout stays clean.
///
/// # Errors
///
/// Returns an error if the level is not a valid filter or a global
/// subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::Configuration {
            message: format!("invalid log level '{}': {e}", config.level),
        })?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    installed.map_err(|e| Error::Configuration {
        message: format!("failed to install log subscriber: {e}"),
    })?;

    tracing::debug!(level = %config.level, format = %config.format, "logging initialized");
    Ok(())
}
