use anyhow::Result;
use std::sync::Arc;

use pogoda_catalog::{CatalogSource, SearchOptions, UrlBuilder};

use crate::Config;

/// Main application state and lifecycle manager
#[derive(Debug)]
pub struct App {
    config: Arc<Config>,
}

impl App {
    /// Create a new application instance from the on-disk config
    pub fn new() -> Result<Self> {
        let (config, _) = Config::load_validated()?;
        Ok(Self::with_config(config))
    }

    /// Create an application instance around an already loaded config
    pub fn with_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn initialize(&mut self) -> Result<()> {
        tracing::info!(
            "Initializing application (catalog: {:?}, site: {})",
            self.catalog_source(),
            self.config.site.base_url
        );
        Ok(())
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Catalog source selected by config
    pub fn catalog_source(&self) -> CatalogSource {
        CatalogSource::from_optional_path(self.config.catalog.path.as_deref())
    }

    /// Search limits selected by config
    pub fn search_options(&self) -> SearchOptions {
        self.config.search.options()
    }

    /// URL builder rooted at the configured site
    pub fn url_builder(&self) -> UrlBuilder {
        UrlBuilder::new(self.config.site.base_url.clone())
    }
}
