//! Favorite-city storage.
//!
//! The list lives under a single key: one JSON document holding an array of
//! city names. [`CityStore`] is the injectable seam over that key-value pair;
//! [`Favorites`] keeps the in-memory copy and writes through on every change.

use anyhow::{Context, Result};
use std::{
    fmt::Debug,
    fs,
    path::PathBuf,
    sync::Mutex,
};

use crate::config::Config;

/// Seed city used when no list has been persisted yet.
pub const DEFAULT_CITY: &str = "kiel";

/// Persistent home of the favorite-city list.
pub trait CityStore: Send + Sync + Debug {
    /// The stored list, or `None` when nothing has been written yet.
    fn load(&self) -> Result<Option<Vec<String>>>;

    /// Overwrite the stored list wholesale.
    fn save(&self, cities: &[String]) -> Result<()>;
}

/// File-backed store: one JSON array in the platform data directory.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the default platform location.
    pub fn default_location() -> Result<Self> {
        let dirs = Config::project_dirs()?;
        Ok(Self::new(dirs.data_dir().join("cities.json")))
    }
}

impl CityStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<String>>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read city list: {}", self.path.display()))?;

        let cities: Vec<String> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse city list: {}", self.path.display()))?;

        Ok(Some(cities))
    }

    fn save(&self, cities: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string(cities).context("Failed to serialize city list")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write city list: {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), count = cities.len(), "persisted city list");

        Ok(())
    }
}

/// In-memory store, used as the fake in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cities: Mutex<Option<Vec<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(cities: Vec<String>) -> Self {
        Self { cities: Mutex::new(Some(cities)) }
    }

    /// Last persisted value, if any.
    pub fn persisted(&self) -> Option<Vec<String>> {
        self.cities.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl<S: CityStore> CityStore for std::sync::Arc<S> {
    fn load(&self) -> Result<Option<Vec<String>>> {
        S::load(self)
    }

    fn save(&self, cities: &[String]) -> Result<()> {
        S::save(self, cities)
    }
}

impl CityStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<String>>> {
        Ok(self.persisted())
    }

    fn save(&self, cities: &[String]) -> Result<()> {
        *self.cities.lock().unwrap_or_else(|e| e.into_inner()) = Some(cities.to_vec());
        Ok(())
    }
}

/// The ordered, de-duplicated favorite-city list with its backing store.
#[derive(Debug)]
pub struct Favorites<S: CityStore> {
    cities: Vec<String>,
    store: S,
}

impl<S: CityStore> Favorites<S> {
    /// Hydrate from the store, seeding a one-element default when the store
    /// is empty. The seed is not persisted until the first mutation.
    pub fn hydrate(store: S) -> Result<Self> {
        let cities = match store.load()? {
            Some(cities) if !cities.is_empty() => cities,
            _ => vec![DEFAULT_CITY.to_string()],
        };

        Ok(Self { cities, store })
    }

    pub fn cities(&self) -> &[String] {
        &self.cities
    }

    /// Head of the list: the initially selected city.
    pub fn first(&self) -> &str {
        &self.cities[0]
    }

    /// Append a city and persist the whole list. Empty input and exact
    /// duplicates (case-sensitive) are silent no-ops; returns whether the
    /// list actually changed.
    pub fn add(&mut self, input: &str) -> Result<bool> {
        let name = input.trim();
        if name.is_empty() || self.cities.iter().any(|c| c == name) {
            return Ok(false);
        }

        self.cities.push(name.to_string());
        self.store.save(&self.cities)?;

        Ok(true)
    }
}
