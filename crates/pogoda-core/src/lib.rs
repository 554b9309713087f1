pub mod app;
pub mod config;
pub mod error;

pub use app::App;
pub use config::{CatalogConfig, Config, SearchConfig, SiteConfig, UiConfig, ValidationResult};
pub use error::{AppError, BrowserError, CatalogError, ConfigError};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Logs go to stderr so they never interleave with the terminal session
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    tracing::info!("Pogoda core initialized");
    Ok(())
}
