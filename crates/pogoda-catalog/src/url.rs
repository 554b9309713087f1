//! Forecast page URLs.

use crate::types::{City, ForecastPeriod};

/// Root of the forecast site
pub const BASE_URL: &str = "https://yandex.ru/pogoda/ru";

/// `BASE_URL/<dockey>/<period path>`. No escaping or validation.
pub fn build_url(city: &City, period: ForecastPeriod) -> String {
    UrlBuilder::default().build(city, period)
}

/// URL builder with a configurable site root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlBuilder {
    base: String,
}

impl Default for UrlBuilder {
    fn default() -> Self {
        Self {
            base: BASE_URL.to_string(),
        }
    }
}

impl UrlBuilder {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn build(&self, city: &City, period: ForecastPeriod) -> String {
        let url = format!("{}/{}/{}", self.base, city.dockey, period.path());

        tracing::debug!(
            city = %city.name_ru,
            dockey = %city.dockey,
            period = period.display_name(),
            "Built forecast URL: {}",
            url
        );

        url
    }
}
