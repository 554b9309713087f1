//! Centralized error types for the Pogoda application.
//!
//! Every failure in this application degrades to an empty result or a
//! no-op, so these types exist for logging and for the short messages the
//! front-end prints.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Catalog(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Browser(e) => e.user_message(),
        }
    }
}

/// City catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog file not found: {0}")]
    NotFound(String),

    #[error("Catalog is malformed: {0}")]
    Malformed(String),

    #[error("Catalog is empty")]
    Empty,
}

impl CatalogError {
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogError::NotFound(_) => "Список городов не найден. Проверьте catalog.path в настройках.",
            CatalogError::Malformed(_) => "Список городов повреждён. Проверьте catalog.path в настройках.",
            CatalogError::Empty => "Список городов пуст.",
        }
    }
}

impl From<pogoda_catalog::CatalogError> for CatalogError {
    fn from(e: pogoda_catalog::CatalogError) -> Self {
        match e {
            pogoda_catalog::CatalogError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                CatalogError::NotFound(io.to_string())
            }
            pogoda_catalog::CatalogError::Empty => CatalogError::Empty,
            other => CatalogError::Malformed(other.to_string()),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    /// Classify a failure from `Config::load_validated`
    pub fn from_load_error(e: &anyhow::Error) -> Self {
        if e.chain().any(|cause| cause.is::<toml::de::Error>()) {
            ConfigError::ParseError(format!("{:#}", e))
        } else {
            ConfigError::Invalid(format!("{:#}", e))
        }
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Недопустимые настройки. Проверьте файл конфигурации.",
            ConfigError::ParseError(_) => "Файл конфигурации повреждён. Проверьте его синтаксис.",
        }
    }
}

/// Errors raised while handing a URL to the system browser.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Failed to launch browser: {0}")]
    LaunchFailed(String),

    #[error("No city selected")]
    NothingSelected,
}

impl BrowserError {
    pub fn user_message(&self) -> &'static str {
        match self {
            BrowserError::LaunchFailed(_) => "Не удалось открыть браузер.",
            BrowserError::NothingSelected => "Сначала выберите город.",
        }
    }
}
