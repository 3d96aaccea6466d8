use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::{Config, model::WeatherSnapshot};

pub mod weatherapi;

/// Source of weather snapshots. The dashboard talks to WeatherAPI.com through
/// this seam; tests substitute canned implementations.
#[async_trait]
pub trait SnapshotProvider: Send + Sync + Debug {
    /// Fetch the merged current-plus-forecast snapshot for a city.
    async fn fetch_snapshot(&self, city: &str) -> anyhow::Result<WeatherSnapshot>;
}

/// Failure classes of a provider fetch. All of them are terminal for the
/// render cycle that issued the request; there is no retry policy.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to reach the weather provider ({endpoint}): {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Weather provider {endpoint} request failed with status {status}: {body}")]
    Status { endpoint: &'static str, status: reqwest::StatusCode, body: String },

    #[error("Failed to parse weather provider {endpoint} JSON: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Construct the live provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<weatherapi::WeatherApiProvider> {
    let api_key = config.api_key()?;

    Ok(weatherapi::WeatherApiProvider::new(
        api_key.to_owned(),
        config.base_url.clone(),
        config.forecast_days,
    ))
}
