use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};

use dashboard_core::{
    Config, JsonFileStore, SnapshotProvider, ViewOutput, WeatherView,
    nav::{self, Route},
    provider::provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "dashboard", version, about = "Weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com API key in the config file.
    Configure,

    /// Show the dashboard for a date (defaults to today).
    Show {
        /// City to select instead of the first favorite.
        #[arg(long)]
        city: Option<String>,

        /// ISO date, e.g. 2026-08-26.
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Add a city to the favorites and show its dashboard.
    Add {
        /// City name, e.g. "hamburg".
        city: String,
    },

    /// List the favorite cities.
    Cities,

    /// Resolve a dashboard path, e.g. /weather/2026-08-26, and render it.
    /// Unknown paths fall back to today.
    Open { path: String },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let today = Local::now().date_naive();

        match self.command.unwrap_or(Command::Show { city: None, date: None }) {
            Command::Configure => configure(),
            Command::Show { city, date } => show(city, date.unwrap_or(today), today).await,
            Command::Add { city } => add(&city, today).await,
            Command::Cities => cities(),
            Command::Open { path } => {
                match nav::resolve(&path, today) {
                    Route::Dated(date) => show(None, date, today).await,
                    Route::CityDated { city, date } => show(Some(city), date, today).await,
                }
            }
        }
    }
}

fn configure() -> Result<()> {
    let key = inquire::Text::new("WeatherAPI.com API key:").prompt()?;

    let mut config = Config::load()?;
    config.set_api_key(key.trim().to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: Option<String>, date: NaiveDate, today: NaiveDate) -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let mut view = WeatherView::mount(JsonFileStore::default_location()?)?;
    if let Some(city) = city {
        view.select_city(&city);
    }

    print_nav(today);
    fetch_and_render(&mut view, &provider, date, today).await
}

async fn add(city: &str, today: NaiveDate) -> Result<()> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;

    let mut view = WeatherView::mount(JsonFileStore::default_location()?)?;

    // Duplicate or empty input is a silent no-op.
    if view.add_city(city)?.is_none() {
        return Ok(());
    }

    print_nav(today);
    fetch_and_render(&mut view, &provider, today, today).await
}

fn cities() -> Result<()> {
    let view = WeatherView::mount(JsonFileStore::default_location()?)?;

    for city in view.cities() {
        if city == view.selected_city() {
            println!("* {city}");
        } else {
            println!("  {city}");
        }
    }

    Ok(())
}

fn print_nav(today: NaiveDate) {
    let links = nav::nav_links(today)
        .into_iter()
        .map(|link| format!("{} -> {}", link.label, link.target))
        .collect::<Vec<_>>()
        .join("  |  ");

    println!("{links}\n");
}

async fn fetch_and_render(
    view: &mut WeatherView<JsonFileStore>,
    provider: &dyn SnapshotProvider,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    println!("Loading...");
    view.refresh(provider).await;

    for line in output_lines(view, date, today) {
        println!("{line}");
    }

    Ok(())
}

/// Project a resolved view into output lines, following a window redirect
/// once. If the local "today" is itself outside the provider's forecast
/// window (timezone skew), the second redirect is reported rather than
/// followed again.
fn output_lines<S: dashboard_core::CityStore>(
    view: &WeatherView<S>,
    date: NaiveDate,
    today: NaiveDate,
) -> Vec<String> {
    match view.render(date, today) {
        // refresh resolves the fetch before rendering, so Loading cannot
        // surface here.
        ViewOutput::Loading => Vec::new(),
        ViewOutput::Error(message) => vec![message],
        ViewOutput::Page(page) => vec![page],
        ViewOutput::Redirect(path) => {
            // Requested date fell outside the forecast window.
            let mut lines = vec![format!("-> {path}")];
            match view.render(today, today) {
                ViewOutput::Page(page) => lines.push(page),
                ViewOutput::Error(message) => lines.push(message),
                ViewOutput::Redirect(next) => {
                    lines.push(format!("-> {next} (not in the fetched forecast window)"));
                }
                ViewOutput::Loading => {}
            }
            lines
        }
    }
}
