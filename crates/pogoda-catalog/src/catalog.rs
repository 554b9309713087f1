//! City catalog loading.
//!
//! Any failure to read or decode the catalog yields an empty list. The
//! cause is logged and handed back alongside the list.

use crate::types::{CatalogError, City};
use std::path::{Path, PathBuf};

/// Catalog compiled into the binary
const BUNDLED_CATALOG: &str = include_str!("../data/russian-cities.json");

/// Where the city list comes from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogSource {
    #[default]
    Bundled,
    File(PathBuf),
}

impl CatalogSource {
    /// Use `path` when given, the bundled list otherwise
    pub fn from_optional_path(path: Option<&Path>) -> Self {
        match path {
            Some(p) => Self::File(p.to_path_buf()),
            None => Self::Bundled,
        }
    }
}

/// Decode a JSON array of cities, surfacing the error
pub fn try_parse(json: &str) -> Result<Vec<City>, CatalogError> {
    Ok(serde_json::from_str(json)?)
}

/// Decode a JSON array of cities; malformed input gives an empty list
pub fn parse_cities(json: &str) -> Vec<City> {
    match try_parse(json) {
        Ok(cities) => cities,
        Err(e) => {
            tracing::warn!("Discarding malformed city catalog: {}", e);
            Vec::new()
        }
    }
}

/// The catalog shipped with the application
pub fn load_bundled() -> Vec<City> {
    parse_cities(BUNDLED_CATALOG)
}

/// Read and decode a catalog file
pub async fn try_load_file(path: &Path) -> Result<Vec<City>, CatalogError> {
    let contents = tokio::fs::read_to_string(path).await?;
    try_parse(&contents)
}

/// Load the catalog from `source`, never failing.
///
/// An unusable source gives an empty list together with the reason. A
/// source that decodes to zero cities is reported as [`CatalogError::Empty`].
pub async fn load_with_cause(source: &CatalogSource) -> (Vec<City>, Option<CatalogError>) {
    let loaded = match source {
        CatalogSource::Bundled => try_parse(BUNDLED_CATALOG),
        CatalogSource::File(path) => try_load_file(path).await,
    };

    let (cities, cause) = match loaded {
        Ok(cities) if cities.is_empty() => (cities, Some(CatalogError::Empty)),
        Ok(cities) => (cities, None),
        Err(e) => (Vec::new(), Some(e)),
    };

    match &cause {
        Some(e) => tracing::warn!("City catalog unusable ({:?}): {}", source, e),
        None => tracing::info!("Loaded {} cities", cities.len()),
    }
    (cities, cause)
}

/// Load the catalog from `source`. Never fails.
pub async fn load_cities(source: &CatalogSource) -> Vec<City> {
    load_with_cause(source).await.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_is_not_empty() {
        let cities = load_bundled();
        assert!(!cities.is_empty());
        assert!(cities.iter().any(|c| c.dockey == "moscow"));
    }

    #[test]
    fn test_bundled_dockeys_are_unique() {
        let cities = load_bundled();
        let mut keys: Vec<_> = cities.iter().map(|c| c.dockey.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), cities.len());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let json = r#"[{"dockey":"omsk","name-en":"Omsk","name-ru":"Омск","Federal subject":"Omsk Oblast","coords":{"lat":54.98,"lon":73.37}}]"#;
        let cities = parse_cities(json);
        assert_eq!(cities.len(), 1);
        assert_eq!(cities[0].name_ru, "Омск");
    }

    #[test]
    fn test_malformed_json_yields_empty_list() {
        assert!(parse_cities("{not json").is_empty());
        assert!(parse_cities("").is_empty());
    }

    #[test]
    fn test_wrong_shape_yields_empty_list() {
        assert!(parse_cities(r#"{"dockey":"omsk"}"#).is_empty());
        assert!(parse_cities(r#"[{"dockey":"omsk"}]"#).is_empty());
    }

    #[test]
    fn test_try_parse_reports_cause() {
        assert!(matches!(try_parse("[1, 2]"), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_source_from_optional_path() {
        assert_eq!(CatalogSource::from_optional_path(None), CatalogSource::Bundled);
        assert_eq!(
            CatalogSource::from_optional_path(Some(Path::new("/tmp/cities.json"))),
            CatalogSource::File(PathBuf::from("/tmp/cities.json"))
        );
    }

    #[tokio::test]
    async fn test_missing_file_yields_empty_list() {
        let source = CatalogSource::File(PathBuf::from("/definitely/not/here/cities.json"));
        assert!(load_cities(&source).await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_cause_is_io() {
        let source = CatalogSource::File(PathBuf::from("/definitely/not/here/cities.json"));
        let (cities, cause) = load_with_cause(&source).await;
        assert!(cities.is_empty());
        assert!(matches!(cause, Some(CatalogError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[tokio::test]
    async fn test_bundled_has_no_cause() {
        let (cities, cause) = load_with_cause(&CatalogSource::Bundled).await;
        assert_eq!(cities, load_bundled());
        assert!(cause.is_none());
    }
}
