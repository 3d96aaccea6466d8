//! Core library for the weather `dashboard`.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com client behind a provider abstraction
//! - The favorite-city store
//! - Date-scoped navigation and routing
//! - The view-state machine and text page rendering
//!
//! It is used by `dashboard-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod model;
pub mod nav;
pub mod provider;
pub mod render;
pub mod store;
pub mod view;

pub use config::Config;
pub use model::{ForecastDay, WeatherSnapshot};
pub use nav::{NavLink, Route};
pub use provider::{SnapshotProvider, weatherapi::WeatherApiProvider};
pub use store::{CityStore, Favorites, JsonFileStore, MemoryStore};
pub use view::{FetchState, FetchTicket, ViewOutput, WeatherView};
