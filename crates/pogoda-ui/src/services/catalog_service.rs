//! Catalog backend: loads the city list once, off the UI thread.
//! The result is published to the shared snapshot and sent via mpsc.

use std::sync::Arc;

use parking_lot::RwLock;
use pogoda_catalog::{catalog, CatalogSource, City};
use pogoda_core::CatalogError;
use tokio_util::sync::CancellationToken;

/// Read-mostly handle to the loaded catalog.
///
/// Written once when loading finishes; searches clone the inner `Arc`.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Arc<Vec<City>>>>,
}

impl SharedCatalog {
    pub fn new(cities: Vec<City>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(cities))),
        }
    }

    /// Current snapshot
    pub fn get(&self) -> Arc<Vec<City>> {
        self.inner.read().clone()
    }

    pub fn set(&self, cities: Arc<Vec<City>>) {
        *self.inner.write() = cities;
    }
}

/// Messages sent from the loader back to the UI thread
#[derive(Debug)]
pub enum CatalogServiceMessage {
    /// Loading finished. `cities` is empty when the source was unusable,
    /// in which case `warning` says why.
    Loaded {
        cities: Arc<Vec<City>>,
        warning: Option<CatalogError>,
    },
}

/// Request the catalog load.
/// Publishes into `shared` and sends `Loaded` on the channel when complete.
pub fn request_load(
    tx: &std::sync::mpsc::Sender<CatalogServiceMessage>,
    runtime: &tokio::runtime::Handle,
    source: CatalogSource,
    shared: SharedCatalog,
    shutdown: CancellationToken,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let (cities, warning) = tokio::select! {
            biased;
            _ = shutdown.cancelled() => {
                tracing::debug!("Catalog load abandoned on shutdown");
                return;
            }
            loaded = catalog::load_with_cause(&source) => loaded,
        };
        let warning = warning.map(CatalogError::from);

        let cities = Arc::new(cities);
        shared.set(cities.clone());
        let _ = tx.send(CatalogServiceMessage::Loaded { cities, warning });
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn shared_catalog_starts_empty() {
        assert!(SharedCatalog::default().get().is_empty());
    }

    #[test]
    fn shared_catalog_set_replaces_snapshot() {
        let shared = SharedCatalog::default();
        let before = shared.get();
        shared.set(Arc::new(vec![City::new("omsk", "Omsk", "Омск", "Omsk Oblast")]));
        assert!(before.is_empty());
        assert_eq!(shared.get().len(), 1);
    }

    /// Run a load on the current runtime and wait for its message
    async fn load_and_wait(source: CatalogSource, shared: SharedCatalog) -> CatalogServiceMessage {
        let (tx, rx) = std::sync::mpsc::channel();
        request_load(
            &tx,
            &tokio::runtime::Handle::current(),
            source,
            shared,
            CancellationToken::new(),
        );
        tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_file_warns_not_found() {
        let shared = SharedCatalog::default();
        let msg = load_and_wait(
            CatalogSource::File(PathBuf::from("/no/such/cities.json")),
            shared.clone(),
        )
        .await;

        let CatalogServiceMessage::Loaded { cities, warning } = msg;
        assert!(cities.is_empty());
        assert!(shared.get().is_empty());
        assert!(matches!(warning, Some(CatalogError::NotFound(_))));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_array_warns_empty() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "[]").unwrap();
        let msg = load_and_wait(
            CatalogSource::File(file.path().to_path_buf()),
            SharedCatalog::default(),
        )
        .await;

        let CatalogServiceMessage::Loaded { cities, warning } = msg;
        assert!(cities.is_empty());
        assert!(matches!(warning, Some(CatalogError::Empty)));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn cancelled_load_sends_nothing() {
        let (tx, rx) = std::sync::mpsc::channel();
        let shutdown = CancellationToken::new();
        shutdown.cancel();
        request_load(
            &tx,
            &tokio::runtime::Handle::current(),
            CatalogSource::Bundled,
            SharedCatalog::default(),
            shutdown,
        );
        drop(tx);

        let got = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(2)))
            .await
            .unwrap();
        assert!(got.is_err());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn request_load_publishes_and_notifies() {
        let shared = SharedCatalog::default();
        let msg = load_and_wait(CatalogSource::Bundled, shared.clone()).await;

        let CatalogServiceMessage::Loaded { cities, warning } = msg;
        assert!(warning.is_none());
        assert!(!cities.is_empty());
        assert_eq!(cities.len(), shared.get().len());
    }
}
