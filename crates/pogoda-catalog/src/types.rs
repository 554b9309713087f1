use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A city entry from the bundled catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// Path segment identifying the city on the forecast site
    pub dockey: String,
    #[serde(rename = "name-en")]
    pub name_en: String,
    #[serde(rename = "name-ru")]
    pub name_ru: String,
    #[serde(rename = "Federal subject")]
    pub federal_subject: String,
}

impl City {
    pub fn new(
        dockey: impl Into<String>,
        name_en: impl Into<String>,
        name_ru: impl Into<String>,
        federal_subject: impl Into<String>,
    ) -> Self {
        Self {
            dockey: dockey.into(),
            name_en: name_en.into(),
            name_ru: name_ru.into(),
            federal_subject: federal_subject.into(),
        }
    }

    /// True if the Russian name, English name or region contains `query`,
    /// ignoring case.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.matches_lowercase(&query)
    }

    /// Same as [`City::matches_query`] for a query that is already lowercase.
    pub(crate) fn matches_lowercase(&self, lower_query: &str) -> bool {
        self.name_ru.to_lowercase().contains(lower_query)
            || self.name_en.to_lowercase().contains(lower_query)
            || self.federal_subject.to_lowercase().contains(lower_query)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name_ru, self.federal_subject)
    }
}

/// Forecast window offered by the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ForecastPeriod {
    #[default]
    #[serde(rename = "today")]
    Today,
    #[serde(rename = "tomorrow")]
    Tomorrow,
    #[serde(rename = "3-days")]
    ThreeDays,
    #[serde(rename = "5-days")]
    FiveDays,
    #[serde(rename = "week")]
    Week,
    #[serde(rename = "2-weeks")]
    TwoWeeks,
}

impl ForecastPeriod {
    /// Every period, in display order
    pub const ALL: [ForecastPeriod; 6] = [
        Self::Today,
        Self::Tomorrow,
        Self::ThreeDays,
        Self::FiveDays,
        Self::Week,
        Self::TwoWeeks,
    ];

    /// Label shown to the user
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Today => "Сегодня",
            Self::Tomorrow => "Завтра",
            Self::ThreeDays => "На 3 дня",
            Self::FiveDays => "На 5 дней",
            Self::Week => "На неделю",
            Self::TwoWeeks => "На 2 недели",
        }
    }

    /// URL path fragment appended after the city dockey
    pub fn path(&self) -> &'static str {
        match self {
            Self::Today => "details/today",
            Self::Tomorrow => "details/tomorrow",
            Self::ThreeDays => "details/3-day-weather",
            Self::FiveDays => "details/5-day-weather",
            Self::Week => "details/7-day-weather",
            Self::TwoWeeks => "details/14-day-weather",
        }
    }

    /// Stable identifier used in config files and terminal commands
    pub fn id(&self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Tomorrow => "tomorrow",
            Self::ThreeDays => "3-days",
            Self::FiveDays => "5-days",
            Self::Week => "week",
            Self::TwoWeeks => "2-weeks",
        }
    }
}

impl fmt::Display for ForecastPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ForecastPeriod {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|p| p.id() == needle)
            .ok_or_else(|| CatalogError::UnknownPeriod(s.to_string()))
    }
}

/// Catalog errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Catalog contains no cities")]
    Empty,
    #[error("Unknown forecast period: {0}")]
    UnknownPeriod(String),
}
