//! Text projection of a weather snapshot.
//!
//! Display policy: temperatures and wind speeds are rounded to the nearest
//! whole unit for display only; humidity, cloud and moon-illumination
//! percentages pass through exactly as received. The underlying snapshot is
//! never modified.

use std::fmt::Write;

use crate::model::{ForecastDay, WeatherSnapshot};
use crate::nav::city_weather_path;

/// Nearest whole unit, halves toward positive infinity (17.4 → 17,
/// 17.5 → 18, -17.5 → -17).
pub fn round_whole(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Clock part of a provider-local `"YYYY-MM-DD HH:MM"` timestamp.
fn clock_time(time: &str) -> &str {
    time.split(' ').nth(1).unwrap_or(time)
}

/// Render the full page: header, favorites, current conditions, per-day
/// forecast summaries (each a link to its date-scoped route) and the hourly
/// breakdown for the matched day.
pub fn page(
    snapshot: &WeatherSnapshot,
    cities: &[String],
    selected: &str,
    day: &ForecastDay,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Weather in {}", snapshot.location.name);

    let favorites = cities
        .iter()
        .map(|city| {
            if city == selected { format!("[{city}]") } else { city.clone() }
        })
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "Cities: {favorites}");

    let _ = writeln!(out, "Region: {}", snapshot.location.region);
    let _ = writeln!(out, "Country: {}", snapshot.location.country);
    let _ = writeln!(out, "Local Time: {}", snapshot.location.localtime);

    let current = &snapshot.current;
    let _ = writeln!(out, "\nCurrent Weather");
    let _ = writeln!(out, "Temperature: {}°C", round_whole(current.temp_c));
    let _ = writeln!(out, "Condition: {}", current.condition.text);
    let _ = writeln!(out, "Wind: {} kph {}", round_whole(current.wind_kph), current.wind_dir);
    let _ = writeln!(out, "Humidity: {}%", current.humidity);
    let _ = writeln!(out, "Cloud: {}%", current.cloud);
    let _ = writeln!(out, "Feels Like: {}°C", round_whole(current.feelslike_c));
    let _ = writeln!(out, "Visibility: {} km", current.vis_km);

    let _ = writeln!(out, "\nForecast");
    for entry in &snapshot.forecast.forecastday {
        let _ = writeln!(out, "{} -> {}", entry.date, city_weather_path(selected, entry.date));
        let _ = writeln!(out, "  Max Temp: {}°C", round_whole(entry.day.maxtemp_c));
        let _ = writeln!(out, "  Min Temp: {}°C", round_whole(entry.day.mintemp_c));
        let _ = writeln!(out, "  Max Wind: {} kph", round_whole(entry.day.maxwind_kph));
        let _ = writeln!(out, "  Condition: {}", entry.day.condition.text);
        let _ = writeln!(out, "  Astro");
        let _ = writeln!(out, "  Sunrise: {}", entry.astro.sunrise);
        let _ = writeln!(out, "  Sunset: {}", entry.astro.sunset);
        let _ = writeln!(out, "  Moonrise: {}", entry.astro.moonrise);
        let _ = writeln!(out, "  Moonset: {}", entry.astro.moonset);
        let _ = writeln!(out, "  Moon Phase: {}", entry.astro.moon_phase);
        let _ = writeln!(out, "  Moon Illumination: {}%", entry.astro.moon_illumination);
    }

    let _ = writeln!(out, "\nHourly Forecast for {}", day.date);
    for hour in &day.hour {
        let _ = writeln!(out, "Time: {}", clock_time(&hour.time));
        let _ = writeln!(out, "  Temp: {}°C", round_whole(hour.temp_c));
        let _ = writeln!(out, "  Condition: {}", hour.condition.text);
        let _ = writeln!(out, "  Wind: {} kph {}", round_whole(hour.wind_kph), hour.wind_dir);
        let _ = writeln!(out, "  Humidity: {}%", hour.humidity);
        let _ = writeln!(out, "  Cloud: {}%", hour.cloud);
        let _ = writeln!(out, "  Feels Like: {}°C", round_whole(hour.feelslike_c));
    }

    out
}
