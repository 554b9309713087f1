//! Search backend: debounced catalog filtering.
//!
//! Every submitted query cancels the one still waiting, so only the last
//! query of a burst is searched. Results are sent via mpsc.

use std::time::Duration;

use parking_lot::Mutex;
use pogoda_catalog::{search_cities_with, City, SearchOptions};
use tokio_util::sync::CancellationToken;

use super::catalog_service::SharedCatalog;

/// Messages sent from the debouncer back to the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchServiceMessage {
    /// Matches for `query`, in catalog order
    Results { query: String, cities: Vec<City> },
}

#[derive(Debug)]
pub struct SearchDebouncer {
    runtime: tokio::runtime::Handle,
    delay: Duration,
    options: SearchOptions,
    catalog: SharedCatalog,
    tx: std::sync::mpsc::Sender<SearchServiceMessage>,
    shutdown: CancellationToken,
    pending: Mutex<Option<CancellationToken>>,
}

impl SearchDebouncer {
    pub fn new(
        runtime: tokio::runtime::Handle,
        delay: Duration,
        options: SearchOptions,
        catalog: SharedCatalog,
        tx: std::sync::mpsc::Sender<SearchServiceMessage>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            runtime,
            delay,
            options,
            catalog,
            tx,
            shutdown,
            pending: Mutex::new(None),
        }
    }

    /// Submit a query. Short queries are answered immediately with no
    /// results; anything else is searched after the debounce delay unless
    /// another query arrives first.
    pub fn submit(&self, query: impl Into<String>) {
        let query = query.into();
        let token = self.shutdown.child_token();
        self.replace_pending(Some(token.clone()));

        if !self.options.accepts(&query) {
            let _ = self.tx.send(SearchServiceMessage::Results {
                query,
                cities: Vec::new(),
            });
            return;
        }

        let tx = self.tx.clone();
        let catalog = self.catalog.clone();
        let delay = self.delay;
        let options = self.options;

        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::trace!("Search for {:?} superseded", query);
                    return;
                }
                _ = tokio::time::sleep(delay) => {}
            }

            let cities = catalog.get();
            let results = search_cities_with(&query, &cities, options);
            tracing::debug!("Search {:?} matched {} cities", query, results.len());

            // A newer query may have arrived while filtering
            if token.is_cancelled() {
                return;
            }
            let _ = tx.send(SearchServiceMessage::Results {
                query,
                cities: results,
            });
        });
    }

    /// Drop the query still waiting, if any
    pub fn cancel(&self) {
        self.replace_pending(None);
    }

    fn replace_pending(&self, next: Option<CancellationToken>) {
        let previous = std::mem::replace(&mut *self.pending.lock(), next);
        if let Some(previous) = previous {
            previous.cancel();
        }
    }
}
