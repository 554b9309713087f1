//! Maps UI service errors to pogoda_core::AppError for consistent user-facing messages.

use crate::services::browser_service::BrowserError as UiBrowserError;
use pogoda_core::{AppError, BrowserError};

impl From<UiBrowserError> for AppError {
    fn from(e: UiBrowserError) -> Self {
        match e {
            UiBrowserError::Launch(s) => AppError::Browser(BrowserError::LaunchFailed(s)),
        }
    }
}
