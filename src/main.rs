use anyhow::Result;

use pogoda_core::{App, AppError, Config, ConfigError};
use pogoda_ui::{AppServices, ServiceSettings, SystemBrowser, Terminal, WeatherModel};

fn main() -> Result<()> {
    // Initialize core
    pogoda_core::init()?;

    // A broken config file should not keep the user from the forecast
    let mut app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            let err = AppError::Config(ConfigError::from_load_error(&e));
            tracing::warn!("{}", err);
            eprintln!("{} Используются настройки по умолчанию.", err.user_message());
            App::with_config(Config::default())
        }
    };
    app.initialize()?;

    tracing::info!("Pogoda application started");

    let services = AppServices::new(ServiceSettings::from_app(&app))?;
    let model = WeatherModel::new(services.clone());

    let browser = SystemBrowser;
    let stdin = std::io::stdin();
    let mut terminal = Terminal::new(stdin.lock(), std::io::stdout(), model, &browser);
    let result = terminal.run();

    // Graceful shutdown
    services.shutdown();
    app.shutdown()?;

    result
}
