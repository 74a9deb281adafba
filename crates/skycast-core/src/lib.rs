pub mod config;

pub use config::{
    Config, ConfigError, EndpointConfig, ValidationResult, WeatherConfig, PLACEHOLDER_API_KEY,
};

use anyhow::Result;

/// Initialize logging for the application.
///
/// The TUI owns stdout, so the subscriber writes to stderr. Filtering is
/// controlled through `RUST_LOG` and defaults to `info`.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Skycast core initialized");
    Ok(())
}
