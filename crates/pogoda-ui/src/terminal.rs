//! Line-oriented front-end for the forecast picker.
//!
//! Plain text is a search query. Commands start with `:`.

use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Result;
use pogoda_catalog::ForecastPeriod;
use pogoda_core::BrowserError;

use crate::models::WeatherModel;
use crate::services::BrowserOpener;

const CATALOG_WAIT: Duration = Duration::from_secs(10);

/// Rows printed when listing the catalog without a query
const PREVIEW_ROWS: usize = 10;

const HELP: &str = "\
Введите хотя бы две буквы, чтобы найти город.
  :N          выбрать результат N
  :p          список периодов прогноза
  :p N|id     выбрать период (например, :p 3 или :p week)
  :url        показать ссылку на прогноз
  :open       открыть прогноз в браузере
  :clear      очистить поиск
  :help       эта справка
  :q          выход";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Select(usize),
    ListPeriods,
    SelectPeriod(String),
    ShowUrl,
    Open,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return Command::Search(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        let head = parts.next().unwrap_or_default();
        let arg = parts.collect::<Vec<_>>().join(" ");

        match head {
            "q" | "quit" | "exit" => Command::Quit,
            "h" | "help" | "?" => Command::Help,
            "clear" | "c" => Command::Clear,
            "open" | "o" => Command::Open,
            "url" | "u" => Command::ShowUrl,
            "p" | "period" if arg.is_empty() => Command::ListPeriods,
            "p" | "period" => Command::SelectPeriod(arg),
            n => match n.parse::<usize>() {
                Ok(n) if n > 0 => Command::Select(n - 1),
                _ => Command::Unknown(line.to_string()),
            },
        }
    }
}

/// Resolve `:p` arguments given as a 1-based index or a period id
pub fn parse_period(arg: &str) -> Option<ForecastPeriod> {
    if let Ok(n) = arg.trim().parse::<usize>() {
        return n.checked_sub(1).and_then(|i| ForecastPeriod::ALL.get(i).copied());
    }
    arg.parse().ok()
}

pub struct Terminal<'a, R, W> {
    input: R,
    output: W,
    model: WeatherModel,
    opener: &'a dyn BrowserOpener,
    search_wait: Duration,
}

impl<'a, R: BufRead, W: Write> Terminal<'a, R, W> {
    pub fn new(input: R, output: W, model: WeatherModel, opener: &'a dyn BrowserOpener) -> Self {
        Self {
            input,
            output,
            model,
            opener,
            search_wait: Duration::from_secs(5),
        }
    }

    pub fn model(&self) -> &WeatherModel {
        &self.model
    }

    /// Read commands until `:q` or end of input.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Прогноз погоды (Яндекс.Погода)")?;

        if !self.model.wait_for_catalog(CATALOG_WAIT) {
            writeln!(self.output, "Загрузка городов...")?;
        } else if let Some(warning) = self.model.catalog_warning() {
            writeln!(self.output, "{}", warning.user_message())?;
        } else {
            writeln!(self.output, "Загружено городов: {}. Команды: :help.", self.model.cities().len())?;
        }

        let mut line = String::new();
        loop {
            self.print_prompt()?;

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }

            self.model.poll_messages();
            if !self.handle(Command::parse(&line))? {
                break;
            }
        }

        Ok(())
    }

    /// Apply one command. Returns false when the session should end.
    pub fn handle(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Help => writeln!(self.output, "{HELP}")?,
            Command::Search(query) if query.is_empty() => {}
            Command::Search(query) => self.search(&query)?,
            Command::Select(index) => self.select(index)?,
            Command::ListPeriods => self.list_periods()?,
            Command::SelectPeriod(arg) => match parse_period(&arg) {
                Some(period) => {
                    self.model.select_period(period);
                    writeln!(self.output, "Период: {}", period)?;
                }
                None => writeln!(self.output, "Неизвестный период: {arg}")?,
            },
            Command::ShowUrl => match self.model.forecast_url() {
                Some(url) => writeln!(self.output, "{url}")?,
                None => writeln!(self.output, "{}", BrowserError::NothingSelected.user_message())?,
            },
            Command::Open => match self.model.open_forecast(self.opener) {
                Ok(url) => writeln!(self.output, "Открыто: {url}")?,
                Err(e) => writeln!(self.output, "{}", e.user_message())?,
            },
            Command::Clear => {
                self.model.clear_search();
                writeln!(self.output, "Поиск очищен.")?;
                self.print_list()?;
            }
            Command::Unknown(line) => {
                writeln!(self.output, "Неизвестная команда: {line}. Команды: :help.")?
            }
        }
        Ok(true)
    }

    fn search(&mut self, query: &str) -> Result<()> {
        self.model.search_cities(query);

        if !self.model.accepts_query(query) {
            writeln!(self.output, "Введите хотя бы две буквы.")?;
            return Ok(());
        }

        if !self.model.wait_for_search(self.search_wait) {
            writeln!(self.output, "Поиск занимает слишком много времени, попробуйте ещё раз.")?;
            return Ok(());
        }

        self.print_list()
    }

    fn select(&mut self, index: usize) -> Result<()> {
        match self.model.select_index(index) {
            Some(city) => {
                let line = format!("Город: {} [{}]", city, city.dockey);
                writeln!(self.output, "{line}")?;
            }
            None => writeln!(self.output, "Нет результата №{}", index + 1)?,
        }
        Ok(())
    }

    fn list_periods(&mut self) -> Result<()> {
        let selected = self.model.selected_period();
        for (i, period) in ForecastPeriod::ALL.iter().enumerate() {
            let marker = if *period == selected { '*' } else { ' ' };
            writeln!(self.output, "{marker} {}. {} ({})", i + 1, period, period.id())?;
        }
        Ok(())
    }

    fn print_list(&mut self) -> Result<()> {
        let list = self.model.display_list();
        if list.is_empty() {
            writeln!(self.output, "Ничего не найдено.")?;
            return Ok(());
        }

        let selected = self.model.selected_city().map(|c| c.dockey.clone());
        let rows = if self.model.query().is_empty() {
            PREVIEW_ROWS
        } else {
            list.len()
        };

        for (i, city) in list.iter().take(rows).enumerate() {
            let marker = if selected.as_deref() == Some(city.dockey.as_str()) { '*' } else { ' ' };
            writeln!(self.output, "{marker} {:>2}. {} / {}", i + 1, city, city.name_en)?;
        }
        Ok(())
    }

    fn print_prompt(&mut self) -> Result<()> {
        let city = self
            .model
            .selected_city()
            .map(|c| c.name_ru.as_str())
            .unwrap_or("-");
        write!(self.output, "[{} | {}] > ", city, self.model.selected_period())?;
        self.output.flush()?;
        Ok(())
    }
}
