//! WeatherAPI.com client.
//!
//! Every snapshot is assembled from two calls: `current.json` and
//! `forecast.json`. The forecast response carries its own location/current
//! blocks, but the dedicated current call is authoritative for "right now",
//! so its values overwrite the forecast's before the snapshot is returned.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::model::{CurrentConditions, Location, WeatherSnapshot};

use super::{FetchError, SnapshotProvider};

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    forecast_days: u8,
    http: Client,
}

/// `current.json` payload: location plus the current block.
#[derive(Debug, Deserialize)]
struct CurrentResponse {
    location: Location,
    current: CurrentConditions,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: String, forecast_days: u8) -> Self {
        Self { api_key, base_url, forecast_days, http: Client::new() }
    }

    async fn fetch_current(&self, city: &str) -> Result<CurrentResponse, FetchError> {
        let endpoint = "current";
        let url = format!("{}/current.json", self.base_url);

        let body = self
            .get_body(endpoint, &url, &[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("aqi", "yes"),
            ])
            .await?;

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }

    async fn fetch_forecast(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let endpoint = "forecast";
        let url = format!("{}/forecast.json", self.base_url);
        let days = self.forecast_days.to_string();

        let body = self
            .get_body(endpoint, &url, &[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("days", days.as_str()),
                ("aqi", "yes"),
                ("alerts", "yes"),
            ])
            .await?;

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { endpoint, source })
    }

    async fn get_body(
        &self,
        endpoint: &'static str,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<String, FetchError> {
        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(FetchError::Status { endpoint, status, body: truncate_body(&body) });
        }

        Ok(body)
    }
}

#[async_trait]
impl SnapshotProvider for WeatherApiProvider {
    async fn fetch_snapshot(&self, city: &str) -> anyhow::Result<WeatherSnapshot> {
        debug!(city, days = self.forecast_days, "fetching weather snapshot");

        let current = self.fetch_current(city).await?;
        let mut snapshot = self.fetch_forecast(city).await?;

        // The current call wins for location and right-now conditions.
        snapshot.location = current.location;
        snapshot.current = current.current;

        debug!(
            city,
            forecast_days = snapshot.forecast.forecastday.len(),
            "weather snapshot ready"
        );

        Ok(snapshot)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_body_keeps_short_bodies_intact() {
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn truncate_body_caps_long_bodies() {
        let long = "x".repeat(500);
        let truncated = truncate_body(&long);

        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }
}
