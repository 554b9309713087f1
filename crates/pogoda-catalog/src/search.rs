//! Substring search over the city catalog.

use crate::types::City;

/// Queries shorter than this return nothing
pub const MIN_QUERY_CHARS: usize = 2;

/// Upper bound on returned matches
pub const MAX_RESULTS: usize = 30;

/// Tunable search limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    pub min_query_chars: usize,
    pub max_results: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            min_query_chars: MIN_QUERY_CHARS,
            max_results: MAX_RESULTS,
        }
    }
}

impl SearchOptions {
    /// True if `query` is long enough to be searched
    pub fn accepts(&self, query: &str) -> bool {
        query.chars().count() >= self.min_query_chars
    }
}

/// Cities whose Russian name, English name or region contains `query`,
/// ignoring case. Catalog order is preserved.
pub fn search_cities(query: &str, cities: &[City]) -> Vec<City> {
    search_cities_with(query, cities, SearchOptions::default())
}

pub fn search_cities_with(query: &str, cities: &[City], options: SearchOptions) -> Vec<City> {
    if !options.accepts(query) {
        return Vec::new();
    }

    let lower_query = query.to_lowercase();
    cities
        .iter()
        .filter(|city| city.matches_lowercase(&lower_query))
        .take(options.max_results)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<City> {
        vec![
            City::new("moscow", "Moscow", "Москва", "Moscow"),
            City::new("balashikha", "Balashikha", "Балашиха", "Moscow Oblast"),
            City::new("kazan", "Kazan", "Казань", "Tatarstan"),
            City::new("naberezhnye-chelny", "Naberezhnye Chelny", "Набережные Челны", "Tatarstan"),
        ]
    }

    #[test]
    fn test_short_query_is_empty() {
        let cities = sample();
        assert!(search_cities("", &cities).is_empty());
        assert!(search_cities("M", &cities).is_empty());
        assert!(search_cities("К", &cities).is_empty());
    }

    #[test]
    fn test_two_cyrillic_chars_are_enough() {
        let cities = sample();
        let results = search_cities("Ка", &cities);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].dockey, "kazan");
    }

    #[test]
    fn test_case_insensitive_on_all_fields() {
        let cities = sample();
        assert_eq!(search_cities("MOSCOW", &cities).len(), 2);
        assert_eq!(search_cities("москва", &cities).len(), 1);
        assert_eq!(search_cities("TATAR", &cities).len(), 2);
    }

    #[test]
    fn test_preserves_catalog_order() {
        let cities = sample();
        let keys: Vec<_> = search_cities("tatarstan", &cities)
            .into_iter()
            .map(|c| c.dockey)
            .collect();
        assert_eq!(keys, vec!["kazan", "naberezhnye-chelny"]);
    }

    #[test]
    fn test_caps_at_max_results() {
        let cities: Vec<City> = (0..100)
            .map(|i| City::new(format!("city-{i}"), format!("Town {i}"), format!("Город {i}"), "Region"))
            .collect();
        let results = search_cities("town", &cities);
        assert_eq!(results.len(), MAX_RESULTS);
        assert_eq!(results[0].dockey, "city-0");
        assert_eq!(results[29].dockey, "city-29");
    }

    #[test]
    fn test_no_match() {
        assert!(search_cities("zzz", &sample()).is_empty());
    }

    #[test]
    fn test_custom_options() {
        let options = SearchOptions {
            min_query_chars: 3,
            max_results: 1,
        };
        assert!(search_cities_with("Мо", &sample(), options).is_empty());
        assert_eq!(search_cities_with("mos", &sample(), options).len(), 1);
    }
}
