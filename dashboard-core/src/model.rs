//! Domain model: the weather snapshot for one city.
//!
//! Field names and units (Celsius, kph, km, percent) are passed through
//! verbatim from WeatherAPI.com; nothing here converts or validates units.
//! A snapshot is an immutable projection of the provider's response — it is
//! replaced wholesale when the selected city changes, never mutated.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub tz_id: String,
    pub localtime_epoch: i64,
    pub localtime: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub is_day: u8,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_degree: i32,
    pub wind_dir: String,
    pub humidity: u8,
    pub cloud: u8,
    pub feelslike_c: f64,
    pub vis_km: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub maxwind_kph: f64,
    pub condition: Condition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
    pub moonrise: String,
    pub moonset: String,
    pub moon_phase: String,
    pub moon_illumination: f64,
    pub is_moon_up: u8,
    pub is_sun_up: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourReading {
    pub time_epoch: i64,
    /// Provider-local timestamp, e.g. `"2026-08-26 14:00"`.
    pub time: String,
    pub temp_c: f64,
    pub is_day: u8,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_dir: String,
    #[serde(default)]
    pub snow_cm: f64,
    pub humidity: u8,
    pub cloud: u8,
    pub feelslike_c: f64,
}

/// One entry of the forecast window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub date_epoch: i64,
    pub day: DaySummary,
    pub astro: Astro,
    pub hour: Vec<HourReading>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

/// Current conditions plus the multi-day forecast for one city.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub forecast: Forecast,
}

impl WeatherSnapshot {
    /// Forecast entry for a calendar date, if the date falls inside the
    /// fetched window.
    pub fn day_for(&self, date: NaiveDate) -> Option<&ForecastDay> {
        self.forecast.forecastday.iter().find(|d| d.date == date)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn day_for_finds_matching_date() {
        let start = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let snapshot = fixtures::snapshot("kiel", start);

        let day = snapshot.day_for(start + chrono::Days::new(1));
        assert_eq!(day.map(|d| d.date), Some(NaiveDate::from_ymd_opt(2026, 8, 27).unwrap()));
    }

    #[test]
    fn day_for_is_none_outside_window() {
        let start = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let snapshot = fixtures::snapshot("kiel", start);

        assert!(snapshot.day_for(start + chrono::Days::new(3)).is_none());
        assert!(snapshot.day_for(start - chrono::Days::new(1)).is_none());
    }

    #[test]
    fn snapshot_deserializes_provider_fields_verbatim() {
        let json = serde_json::json!({
            "location": {
                "name": "Kiel", "region": "Schleswig-Holstein", "country": "Germany",
                "lat": 54.32, "lon": 10.13, "tz_id": "Europe/Berlin",
                "localtime_epoch": 1756200000, "localtime": "2026-08-26 13:37"
            },
            "current": {
                "temp_c": 17.4, "is_day": 1,
                "condition": { "text": "Partly cloudy", "icon": "//cdn/116.png", "code": 1003 },
                "wind_kph": 14.3, "wind_degree": 310, "wind_dir": "NW",
                "humidity": 71, "cloud": 25, "feelslike_c": 16.5, "vis_km": 10.0
            },
            "forecast": { "forecastday": [] }
        });

        let snapshot: WeatherSnapshot =
            serde_json::from_value(json).expect("provider-shaped JSON must deserialize");

        assert_eq!(snapshot.location.tz_id, "Europe/Berlin");
        assert_eq!(snapshot.current.condition.code, 1003);
        assert_eq!(snapshot.current.humidity, 71);
        assert!(snapshot.forecast.forecastday.is_empty());
    }
}
