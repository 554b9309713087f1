//! Browser backend: hands a forecast URL to the system browser.

use thiserror::Error;

/// Error type for browser operations
#[derive(Error, Debug, Clone)]
pub enum BrowserError {
    #[error("Browser launch error: {0}")]
    Launch(String),
}

/// Something that can show a URL to the user
pub trait BrowserOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), BrowserError>;
}

/// Opens URLs in the platform's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl BrowserOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<(), BrowserError> {
        webbrowser::open(url).map_err(|e| BrowserError::Launch(e.to_string()))
    }
}
