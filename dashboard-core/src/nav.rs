//! Navigation shell: the three date links and the path router.
//!
//! Link targets are plain strings built by interpolation, mirroring the
//! `/weather/{date}` and `/weather/{city}/{date}` paths of the dashboard.

use chrono::{Days, NaiveDate};

/// One navigation link of the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub target: String,
}

/// Today, tomorrow and the day after, in ISO date form.
pub fn nav_dates(today: NaiveDate) -> [NaiveDate; 3] {
    [today, today + Days::new(1), today + Days::new(2)]
}

/// The shell's three links, each pointing at a date-scoped weather path.
pub fn nav_links(today: NaiveDate) -> Vec<NavLink> {
    let [today, tomorrow, after_tomorrow] = nav_dates(today);

    vec![
        NavLink { label: "Today", target: weather_path(today) },
        NavLink { label: "Tomorrow", target: weather_path(tomorrow) },
        NavLink { label: "After Tomorrow", target: weather_path(after_tomorrow) },
    ]
}

pub fn weather_path(date: NaiveDate) -> String {
    format!("/weather/{date}")
}

pub fn city_weather_path(city: &str, date: NaiveDate) -> String {
    format!("/weather/{city}/{date}")
}

/// A recognized dashboard path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/weather/{date}` — the selected city is implied.
    Dated(NaiveDate),
    /// `/weather/{city}/{date}`.
    CityDated { city: String, date: NaiveDate },
}

impl Route {
    pub fn parse(path: &str) -> Option<Self> {
        let mut segments = path.strip_prefix('/')?.split('/');

        if segments.next()? != "weather" {
            return None;
        }

        let first = segments.next()?;
        match (segments.next(), segments.next()) {
            (None, _) => first.parse().ok().map(Route::Dated),
            (Some(second), None) => {
                let date = second.parse().ok()?;
                if first.is_empty() {
                    return None;
                }
                Some(Route::CityDated { city: first.to_string(), date })
            }
            _ => None,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dated(date) => weather_path(*date),
            Route::CityDated { city, date } => city_weather_path(city, *date),
        }
    }
}

/// Route a path, falling back to today's path for anything unmatched.
/// Total by construction: the catch-all has no failure mode.
pub fn resolve(path: &str, today: NaiveDate) -> Route {
    Route::parse(path).unwrap_or(Route::Dated(today))
}
