use std::sync::Arc;
use std::time::{Duration, Instant};

use pogoda_catalog::{City, ForecastPeriod};
use pogoda_core::{AppError, BrowserError};

use crate::app_services::AppServices;
use crate::services::{BrowserOpener, CatalogServiceMessage, SearchServiceMessage};

/// Selection state behind the forecast screen.
///
/// All mutation happens on the thread driving the UI; background results
/// arrive through [`WeatherModel::poll_messages`].
#[derive(Debug)]
pub struct WeatherModel {
    cities: Arc<Vec<City>>,
    catalog_loaded: bool,
    catalog_warning: Option<AppError>,
    query: String,
    search_results: Vec<City>,
    is_searching: bool,
    selected_city: Option<City>,
    selected_period: ForecastPeriod,
    services: Arc<AppServices>,
}

impl WeatherModel {
    /// Create the model and start loading the catalog
    pub fn new(services: Arc<AppServices>) -> Self {
        let selected_period = services.settings().default_period;
        services.request_catalog_load();

        Self {
            cities: Arc::new(Vec::new()),
            catalog_loaded: false,
            catalog_warning: None,
            query: String::new(),
            search_results: Vec::new(),
            is_searching: false,
            selected_city: None,
            selected_period,
            services,
        }
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Why the catalog came back empty, if it did
    pub fn catalog_warning(&self) -> Option<&AppError> {
        self.catalog_warning.as_ref()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn search_results(&self) -> &[City] {
        &self.search_results
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub fn selected_city(&self) -> Option<&City> {
        self.selected_city.as_ref()
    }

    pub fn selected_period(&self) -> ForecastPeriod {
        self.selected_period
    }

    /// Search results while a query is typed, the whole catalog otherwise
    pub fn display_list(&self) -> &[City] {
        if self.query.is_empty() {
            &self.cities
        } else {
            &self.search_results
        }
    }

    /// True if `query` is long enough to be searched
    pub fn accepts_query(&self, query: &str) -> bool {
        self.services.settings().search_options.accepts(query)
    }

    /// Record a new query and hand it to the debounced search
    pub fn search_cities(&mut self, query: &str) {
        self.query = query.to_string();

        if !self.accepts_query(query) {
            self.services.cancel_search();
            self.search_results.clear();
            self.is_searching = false;
            return;
        }

        self.is_searching = true;
        self.services.submit_search(query);
    }

    pub fn clear_search(&mut self) {
        self.services.cancel_search();
        self.query.clear();
        self.search_results.clear();
        self.is_searching = false;
    }

    pub fn select_city(&mut self, city: Option<City>) {
        if let Some(city) = &city {
            tracing::debug!("Selected city: {} ({})", city.name_ru, city.dockey);
            self.services.cancel_search();
            self.search_results.clear();
            self.is_searching = false;
        }
        self.selected_city = city;
    }

    /// Select the entry at `index` of [`WeatherModel::display_list`]
    pub fn select_index(&mut self, index: usize) -> Option<&City> {
        let city = self.display_list().get(index).cloned()?;
        self.select_city(Some(city));
        self.selected_city.as_ref()
    }

    pub fn select_period(&mut self, period: ForecastPeriod) {
        tracing::debug!("Selected period: {}", period.id());
        self.selected_period = period;
    }

    /// URL for the current selection, if a city is selected
    pub fn forecast_url(&self) -> Option<String> {
        let city = self.selected_city.as_ref()?;
        Some(self.services.url_builder().build(city, self.selected_period))
    }

    /// Open the forecast for the current selection.
    ///
    /// Does nothing without a selected city. Launch failures are logged and
    /// returned for display; they never abort the session.
    pub fn open_forecast(&self, opener: &dyn BrowserOpener) -> Result<String, AppError> {
        let url = self
            .forecast_url()
            .ok_or(AppError::Browser(BrowserError::NothingSelected))?;

        tracing::info!("Opening forecast URL: {}", url);
        match opener.open(&url) {
            Ok(()) => Ok(url),
            Err(e) => {
                tracing::warn!("Failed to open browser: {}", e);
                Err(e.into())
            }
        }
    }

    /// Apply every message the services have sent so far.
    /// Returns true if anything changed.
    pub fn poll_messages(&mut self) -> bool {
        let mut changed = false;

        while let Some(msg) = self.services.try_recv_catalog_message() {
            self.apply_catalog_message(msg);
            changed = true;
        }

        while let Some(msg) = self.services.try_recv_search_message() {
            changed |= self.apply_search_message(msg);
        }

        changed
    }

    /// Block until the catalog has loaded or `timeout` elapses.
    pub fn wait_for_catalog(&mut self, timeout: Duration) -> bool {
        if self.catalog_loaded {
            return true;
        }
        if let Some(msg) = self.services.recv_catalog_message_timeout(timeout) {
            self.apply_catalog_message(msg);
        }
        self.catalog_loaded
    }

    /// Block until results for the current query arrive or `timeout` elapses.
    pub fn wait_for_search(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;

        while self.is_searching {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.services.recv_search_message_timeout(remaining) {
                Some(msg) => {
                    self.apply_search_message(msg);
                }
                None => break,
            }
        }

        !self.is_searching
    }

    fn apply_catalog_message(&mut self, msg: CatalogServiceMessage) {
        match msg {
            CatalogServiceMessage::Loaded { cities, warning } => {
                tracing::info!("Catalog ready with {} cities", cities.len());
                self.cities = cities;
                self.catalog_warning = warning.map(AppError::Catalog);
                self.catalog_loaded = true;
            }
        }
    }

    fn apply_search_message(&mut self, msg: SearchServiceMessage) -> bool {
        match msg {
            SearchServiceMessage::Results { query, cities } => {
                // Results for a query the user has since changed are stale
                if query != self.query || !self.is_searching {
                    tracing::trace!("Dropping stale results for {:?}", query);
                    return false;
                }
                self.search_results = cities;
                self.is_searching = false;
                true
            }
        }
    }
}
