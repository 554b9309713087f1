//! Presentation layer for Pogoda.
//!
//! Background services (catalog load, debounced search, browser launch),
//! the `WeatherModel` holding selection state, and a terminal front-end
//! driving it.

pub mod app_services;
pub mod error_mapping;
pub mod models;
pub mod services;
pub mod terminal;

pub use app_services::{AppServices, ServiceSettings};
pub use models::WeatherModel;
pub use services::{BrowserOpener, SystemBrowser};
pub use terminal::{Command, Terminal};
