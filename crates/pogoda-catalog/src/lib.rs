//! City catalog for Pogoda
//!
//! Loads the bundled list of Russian cities, filters it by a text query and
//! builds forecast page URLs for a city and period.

pub mod types;
pub mod catalog;
pub mod search;
pub mod url;

pub use types::*;
pub use catalog::{load_bundled, load_cities, load_with_cause, parse_cities, CatalogSource};
pub use search::{search_cities, search_cities_with, SearchOptions, MAX_RESULTS, MIN_QUERY_CHARS};
pub use url::{build_url, UrlBuilder, BASE_URL};
