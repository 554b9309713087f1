//! Centralized application services.
//!
//! `AppServices` owns the tokio runtime, the shared catalog snapshot, the
//! search debouncer and the service channels. Models hold an `Arc` to it and
//! poll the channels from the UI thread.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use pogoda_catalog::{CatalogSource, ForecastPeriod, SearchOptions, UrlBuilder};
use pogoda_core::App;

use crate::services::{self, CatalogServiceMessage, SearchDebouncer, SearchServiceMessage, SharedCatalog};

/// Settings the services are built from
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub catalog_source: CatalogSource,
    pub search_options: SearchOptions,
    pub debounce: Duration,
    pub url_builder: UrlBuilder,
    pub default_period: ForecastPeriod,
}

impl ServiceSettings {
    pub fn from_app(app: &App) -> Self {
        let config = app.config();
        Self {
            catalog_source: app.catalog_source(),
            search_options: app.search_options(),
            debounce: config.search.debounce(),
            url_builder: app.url_builder(),
            default_period: config.ui.default_period,
        }
    }
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            catalog_source: CatalogSource::Bundled,
            search_options: SearchOptions::default(),
            debounce: Duration::from_millis(300),
            url_builder: UrlBuilder::default(),
            default_period: ForecastPeriod::default(),
        }
    }
}

/// Application services container.
pub struct AppServices {
    /// Owned runtime, taken on drop
    runtime: Option<tokio::runtime::Runtime>,

    /// Handle used to spawn all service work
    handle: tokio::runtime::Handle,

    /// Cancelled on shutdown; parent of every pending search token
    shutdown_token: CancellationToken,

    settings: ServiceSettings,

    /// Loaded cities, empty until the catalog service reports back
    catalog: SharedCatalog,

    debouncer: SearchDebouncer,

    catalog_service_tx: Sender<CatalogServiceMessage>,
    catalog_service_rx: Mutex<Receiver<CatalogServiceMessage>>,

    search_service_rx: Mutex<Receiver<SearchServiceMessage>>,
}

impl std::fmt::Debug for AppServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppServices")
            .field("owns_runtime", &self.runtime.is_some())
            .field("settings", &self.settings)
            .field("catalog_len", &self.catalog.get().len())
            .finish()
    }
}

impl AppServices {
    /// Build services with their own multi-threaded runtime.
    pub fn new(settings: ServiceSettings) -> Result<Arc<Self>> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("pogoda-tokio")
            .build()
            .context("Failed to create tokio runtime")?;
        let handle = runtime.handle().clone();

        Ok(Arc::new(Self::build(Some(runtime), handle, settings)))
    }

    fn build(
        runtime: Option<tokio::runtime::Runtime>,
        handle: tokio::runtime::Handle,
        settings: ServiceSettings,
    ) -> Self {
        let shutdown_token = CancellationToken::new();
        let catalog = SharedCatalog::default();

        let (catalog_tx, catalog_rx) = std::sync::mpsc::channel();
        let (search_tx, search_rx) = std::sync::mpsc::channel();

        let debouncer = SearchDebouncer::new(
            handle.clone(),
            settings.debounce,
            settings.search_options,
            catalog.clone(),
            search_tx,
            shutdown_token.clone(),
        );

        Self {
            runtime,
            handle,
            shutdown_token,
            settings,
            catalog,
            debouncer,
            catalog_service_tx: catalog_tx,
            catalog_service_rx: Mutex::new(catalog_rx),
            search_service_rx: Mutex::new(search_rx),
        }
    }

    pub fn settings(&self) -> &ServiceSettings {
        &self.settings
    }

    pub fn url_builder(&self) -> &UrlBuilder {
        &self.settings.url_builder
    }

    /// Current catalog snapshot
    pub fn catalog(&self) -> SharedCatalog {
        self.catalog.clone()
    }

    /// Signal application shutdown, cancelling any pending work.
    pub fn shutdown(&self) {
        tracing::info!("AppServices shutdown initiated");
        self.shutdown_token.cancel();
        tracing::info!("AppServices shutdown complete");
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown_token.is_cancelled()
    }

    // =========== Catalog ===========

    /// Start loading the catalog in the background.
    pub fn request_catalog_load(&self) {
        services::request_catalog_load(
            &self.catalog_service_tx,
            &self.handle,
            self.settings.catalog_source.clone(),
            self.catalog.clone(),
            self.shutdown_token.clone(),
        );
    }

    /// Try to receive a message from the catalog service channel (non-blocking).
    pub fn try_recv_catalog_message(&self) -> Option<CatalogServiceMessage> {
        self.catalog_service_rx.lock().try_recv().ok()
    }

    /// Wait up to `timeout` for the catalog service.
    pub fn recv_catalog_message_timeout(&self, timeout: Duration) -> Option<CatalogServiceMessage> {
        recv_timeout(&self.catalog_service_rx, timeout)
    }

    // =========== Search ===========

    /// Queue a debounced search.
    pub fn submit_search(&self, query: &str) {
        if self.is_shut_down() {
            tracing::debug!("Ignoring search after shutdown");
            return;
        }
        self.debouncer.submit(query);
    }

    /// Drop any search still waiting for its debounce window.
    pub fn cancel_search(&self) {
        self.debouncer.cancel();
    }

    /// Try to receive a message from the search service channel (non-blocking).
    pub fn try_recv_search_message(&self) -> Option<SearchServiceMessage> {
        self.search_service_rx.lock().try_recv().ok()
    }

    /// Wait up to `timeout` for the search service.
    pub fn recv_search_message_timeout(&self, timeout: Duration) -> Option<SearchServiceMessage> {
        recv_timeout(&self.search_service_rx, timeout)
    }
}

impl Drop for AppServices {
    fn drop(&mut self) {
        self.shutdown_token.cancel();
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

fn recv_timeout<T>(rx: &Mutex<Receiver<T>>, timeout: Duration) -> Option<T> {
    match rx.lock().recv_timeout(timeout) {
        Ok(msg) => Some(msg),
        Err(RecvTimeoutError::Timeout) => None,
        Err(RecvTimeoutError::Disconnected) => {
            tracing::warn!("Service channel disconnected");
            None
        }
    }
}
