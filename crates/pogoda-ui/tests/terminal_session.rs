//! End-to-end terminal sessions against the bundled catalog.

#![allow(clippy::unwrap_used)]

use std::io::Cursor;
use std::sync::Mutex;
use std::time::Duration;

use pogoda_catalog::{CatalogSource, ForecastPeriod};
use pogoda_ui::services::BrowserError;
use pogoda_ui::{AppServices, BrowserOpener, ServiceSettings, Terminal, WeatherModel};

/// Opener that records URLs instead of launching anything
#[derive(Default)]
struct RecordingBrowser {
    opened: Mutex<Vec<String>>,
}

impl BrowserOpener for RecordingBrowser {
    fn open(&self, url: &str) -> Result<(), BrowserError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

struct BrokenBrowser;

impl BrowserOpener for BrokenBrowser {
    fn open(&self, _url: &str) -> Result<(), BrowserError> {
        Err(BrowserError::Launch("no display".into()))
    }
}

fn model_with(settings: ServiceSettings) -> WeatherModel {
    let services = AppServices::new(settings).unwrap();
    WeatherModel::new(services)
}

fn model() -> WeatherModel {
    model_with(ServiceSettings {
        debounce: Duration::from_millis(10),
        ..Default::default()
    })
}

fn run_session(model: WeatherModel, opener: &dyn BrowserOpener, script: &str) -> String {
    let mut output = Vec::new();
    {
        let mut terminal = Terminal::new(Cursor::new(script.to_string()), &mut output, model, opener);
        terminal.run().unwrap();
    }
    String::from_utf8(output).unwrap()
}

#[test]
fn test_search_select_and_open() {
    let browser = RecordingBrowser::default();
    let output = run_session(model(), &browser, "Казань\n:1\n:p week\n:open\n:q\n");

    assert!(output.contains("Казань (Tatarstan)"), "{output}");
    assert!(output.contains("Город: Казань"), "{output}");
    assert!(output.contains("Период: На неделю"), "{output}");
    assert_eq!(
        *browser.opened.lock().unwrap(),
        vec!["https://yandex.ru/pogoda/ru/kazan/details/7-day-weather".to_string()]
    );
}

#[test]
fn test_open_without_city_is_noop() {
    let browser = RecordingBrowser::default();
    let output = run_session(model(), &browser, ":open\n");

    assert!(output.contains("Сначала выберите город."), "{output}");
    assert!(browser.opened.lock().unwrap().is_empty());
}

#[test]
fn test_browser_failure_keeps_session_alive() {
    let output = run_session(model(), &BrokenBrowser, "Омск\n:1\n:open\n:url\n");

    assert!(output.contains("Не удалось открыть браузер."), "{output}");
    assert!(output.contains("https://yandex.ru/pogoda/ru/omsk/details/today"), "{output}");
}

#[test]
fn test_short_query_prompts_for_more() {
    let browser = RecordingBrowser::default();
    let output = run_session(model(), &browser, "К\n");
    assert!(output.contains("Введите хотя бы две буквы."), "{output}");
}

#[test]
fn test_default_period_from_settings() {
    let browser = RecordingBrowser::default();
    let model = model_with(ServiceSettings {
        debounce: Duration::from_millis(10),
        default_period: ForecastPeriod::Tomorrow,
        ..Default::default()
    });
    run_session(model, &browser, "Tomsk\n:1\n:open\n");

    assert_eq!(
        *browser.opened.lock().unwrap(),
        vec!["https://yandex.ru/pogoda/ru/tomsk/details/tomorrow".to_string()]
    );
}

#[test]
fn test_missing_catalog_file_reports_and_continues() {
    let browser = RecordingBrowser::default();
    let model = model_with(ServiceSettings {
        catalog_source: CatalogSource::File("/no/such/cities.json".into()),
        debounce: Duration::from_millis(10),
        ..Default::default()
    });
    let output = run_session(model, &browser, "Москва\n:q\n");

    assert!(output.contains("Список городов не найден."), "{output}");
    assert!(output.contains("Ничего не найдено."), "{output}");
}

#[test]
fn test_unknown_selection() {
    let browser = RecordingBrowser::default();
    let output = run_session(model(), &browser, "Kazan\n:9\n");
    assert!(output.contains("Нет результата №9"), "{output}");
}

#[test]
fn test_banner_and_help_are_russian() {
    let browser = RecordingBrowser::default();
    let output = run_session(model(), &browser, ":help\n:bogus\n");

    assert!(output.contains("Загружено городов: 90."), "{output}");
    assert!(output.contains("выбрать результат N"), "{output}");
    assert!(output.contains("Неизвестная команда: :bogus."), "{output}");
}
