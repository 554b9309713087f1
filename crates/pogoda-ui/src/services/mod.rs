pub mod browser_service;
pub mod catalog_service;
pub mod search_service;

pub use browser_service::{BrowserError, BrowserOpener, SystemBrowser};
pub use catalog_service::{
    request_load as request_catalog_load, CatalogServiceMessage, SharedCatalog,
};
pub use search_service::{SearchDebouncer, SearchServiceMessage};
