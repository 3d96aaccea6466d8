//! Weather view: selected city, favorites and the fetch-state machine.
//!
//! Each fetch lives in an explicit tagged state, so "error present but data
//! also present" cannot be represented. Fetch completions carry the ticket
//! they were issued with; a ticket whose city no longer matches the current
//! selection is discarded, so a stale response can never overwrite the page
//! for the city the user is actually looking at.

use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

use crate::{
    model::WeatherSnapshot,
    nav::city_weather_path,
    provider::SnapshotProvider,
    render,
    store::{CityStore, Favorites},
};

/// Per-city fetch lifecycle: Idle → Loading → { Ready | Failed }.
#[derive(Debug, Clone)]
pub enum FetchState {
    /// Nothing requested yet (before the first city selection).
    Idle,
    Loading { city: String },
    Ready { city: String, snapshot: WeatherSnapshot },
    /// Holds only the fact of failure; any prior snapshot is dropped.
    Failed { city: String, message: String },
}

/// Handle tying a fetch completion back to the selection that requested it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub city: String,
}

/// What the view asks its host to do for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewOutput {
    Loading,
    Error(String),
    /// Navigate to this path and render again.
    Redirect(String),
    Page(String),
}

pub struct WeatherView<S: CityStore> {
    favorites: Favorites<S>,
    selected: String,
    state: FetchState,
}

impl<S: CityStore> WeatherView<S> {
    /// Hydrate the favorites from the injected store; the initial selection
    /// is the head of the list. No fetch is issued yet.
    pub fn mount(store: S) -> Result<Self> {
        let favorites = Favorites::hydrate(store)?;
        let selected = favorites.first().to_string();

        Ok(Self { favorites, selected, state: FetchState::Idle })
    }

    pub fn selected_city(&self) -> &str {
        &self.selected
    }

    pub fn cities(&self) -> &[String] {
        self.favorites.cities()
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    /// Select a city and enter `Loading`. Re-selecting the current city also
    /// reloads; there is no memoized short-circuit.
    pub fn select_city(&mut self, city: &str) -> FetchTicket {
        self.selected = city.to_string();
        self.state = FetchState::Loading { city: city.to_string() };

        FetchTicket { city: city.to_string() }
    }

    /// Add a city to the favorites and navigate to it. Empty input and
    /// duplicates are silent no-ops that leave the selection untouched.
    pub fn add_city(&mut self, input: &str) -> Result<Option<FetchTicket>> {
        if !self.favorites.add(input)? {
            return Ok(None);
        }

        Ok(Some(self.select_city(input.trim())))
    }

    /// Apply a fetch outcome. Completions whose ticket no longer matches the
    /// selected city are dropped.
    pub fn complete_fetch(&mut self, ticket: FetchTicket, result: Result<WeatherSnapshot>) {
        if ticket.city != self.selected {
            debug!(stale = %ticket.city, selected = %self.selected, "discarding stale fetch");
            return;
        }

        self.state = match result {
            Ok(snapshot) => FetchState::Ready { city: ticket.city, snapshot },
            Err(err) => {
                FetchState::Failed { city: ticket.city, message: format!("{err:#}") }
            }
        };
    }

    /// Select the current city, fetch its snapshot and apply the result.
    /// Convenience for hosts that drive one fetch at a time.
    pub async fn refresh(&mut self, provider: &dyn SnapshotProvider) {
        let city = self.selected.clone();
        let ticket = self.select_city(&city);
        let result = provider.fetch_snapshot(&ticket.city).await;
        self.complete_fetch(ticket, result);
    }

    /// Project the current state into output for a date-scoped route. Dates
    /// outside the fetched forecast window redirect to today under the
    /// selected city instead of rendering partial data.
    pub fn render(&self, date: NaiveDate, today: NaiveDate) -> ViewOutput {
        match &self.state {
            FetchState::Idle | FetchState::Loading { .. } => ViewOutput::Loading,
            FetchState::Failed { message, .. } => {
                ViewOutput::Error(format!("An error has occurred: {message}"))
            }
            FetchState::Ready { snapshot, .. } => match snapshot.day_for(date) {
                None => ViewOutput::Redirect(city_weather_path(&self.selected, today)),
                Some(day) => ViewOutput::Page(render::page(
                    snapshot,
                    self.favorites.cities(),
                    &self.selected,
                    day,
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures;
    use crate::store::MemoryStore;
    use anyhow::anyhow;
    use chrono::Days;

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("test date must be valid ISO")
    }

    fn mounted(cities: &[&str]) -> WeatherView<MemoryStore> {
        let store = MemoryStore::seeded(cities.iter().map(|c| c.to_string()).collect());
        WeatherView::mount(store).expect("mount must succeed")
    }

    #[test]
    fn mount_selects_head_of_favorites_and_stays_idle() {
        let view = mounted(&["kiel", "hamburg"]);

        assert_eq!(view.selected_city(), "kiel");
        assert!(matches!(view.state(), FetchState::Idle));
    }

    #[test]
    fn select_city_enters_loading() {
        let mut view = mounted(&["kiel"]);

        let ticket = view.select_city("kiel");

        assert_eq!(ticket.city, "kiel");
        assert!(matches!(view.state(), FetchState::Loading { city } if city == "kiel"));
        assert_eq!(view.render(date("2026-08-26"), date("2026-08-26")), ViewOutput::Loading);
    }

    #[test]
    fn successful_fetch_reaches_ready() {
        let today = date("2026-08-26");
        let mut view = mounted(&["kiel"]);

        let ticket = view.select_city("kiel");
        view.complete_fetch(ticket, Ok(fixtures::snapshot("Kiel", today)));

        assert!(matches!(view.state(), FetchState::Ready { city, .. } if city == "kiel"));
        assert!(matches!(view.render(today, today), ViewOutput::Page(_)));
    }

    #[test]
    fn failed_fetch_renders_error_and_nothing_else() {
        let today = date("2026-08-26");
        let mut view = mounted(&["kiel"]);

        let ticket = view.select_city("kiel");
        view.complete_fetch(ticket, Err(anyhow!("connection refused")));

        let output = view.render(today, today);
        assert_eq!(
            output,
            ViewOutput::Error("An error has occurred: connection refused".to_string())
        );
    }

    #[test]
    fn failure_drops_a_previously_ready_snapshot() {
        let today = date("2026-08-26");
        let mut view = mounted(&["kiel"]);

        let ticket = view.select_city("kiel");
        view.complete_fetch(ticket, Ok(fixtures::snapshot("Kiel", today)));

        // Re-entering the same city re-fetches; the failure replaces the data.
        let ticket = view.select_city("kiel");
        view.complete_fetch(ticket, Err(anyhow!("boom")));

        assert!(matches!(view.state(), FetchState::Failed { .. }));
        assert!(matches!(view.render(today, today), ViewOutput::Error(_)));
    }

    #[test]
    fn stale_completion_is_discarded() {
        let today = date("2026-08-26");
        let mut view = mounted(&["kiel"]);

        let kiel_ticket = view.select_city("kiel");
        let hamburg_ticket = view.select_city("hamburg");

        // The kiel response lands after the user already switched to hamburg.
        view.complete_fetch(kiel_ticket, Ok(fixtures::snapshot("Kiel", today)));
        assert!(matches!(view.state(), FetchState::Loading { city } if city == "hamburg"));

        view.complete_fetch(hamburg_ticket, Ok(fixtures::snapshot("Hamburg", today)));
        assert!(
            matches!(view.state(), FetchState::Ready { snapshot, .. }
                if snapshot.location.name == "Hamburg")
        );
    }

    #[test]
    fn date_outside_window_redirects_to_today_under_city() {
        let today = date("2026-08-26");
        let mut view = mounted(&["kiel"]);

        let ticket = view.select_city("kiel");
        view.complete_fetch(ticket, Ok(fixtures::snapshot("Kiel", today)));

        let outside = today + Days::new(5);
        assert_eq!(
            view.render(outside, today),
            ViewOutput::Redirect("/weather/kiel/2026-08-26".to_string())
        );
    }

    #[test]
    fn add_city_appends_selects_and_starts_loading() {
        let mut view = mounted(&["kiel"]);

        let ticket = view.add_city("hamburg").expect("add must succeed");

        assert_eq!(ticket, Some(FetchTicket { city: "hamburg".to_string() }));
        assert_eq!(view.cities(), ["kiel", "hamburg"]);
        assert_eq!(view.selected_city(), "hamburg");
        assert!(matches!(view.state(), FetchState::Loading { city } if city == "hamburg"));
    }

    #[test]
    fn add_duplicate_city_changes_nothing() {
        let mut view = mounted(&["kiel"]);

        let ticket = view.add_city("kiel").expect("add must succeed");

        assert_eq!(ticket, None);
        assert_eq!(view.cities(), ["kiel"]);
        assert_eq!(view.selected_city(), "kiel");
        assert!(matches!(view.state(), FetchState::Idle));
    }

    #[test]
    fn add_empty_city_changes_nothing() {
        let mut view = mounted(&["kiel"]);

        assert_eq!(view.add_city("  ").expect("add must succeed"), None);
        assert!(matches!(view.state(), FetchState::Idle));
    }

    #[test]
    fn adding_a_city_persists_fetches_and_renders_it() {
        use std::sync::Arc;

        let today = date("2026-08-26");
        let store = Arc::new(MemoryStore::seeded(vec!["kiel".to_string()]));
        let mut view = WeatherView::mount(Arc::clone(&store)).expect("mount must succeed");

        let ticket = view.add_city("hamburg").expect("add must succeed");
        let ticket = ticket.expect("a new city starts a fetch");

        assert_eq!(
            store.persisted(),
            Some(vec!["kiel".to_string(), "hamburg".to_string()])
        );
        assert_eq!(view.render(today, today), ViewOutput::Loading);

        view.complete_fetch(ticket, Ok(fixtures::snapshot("Hamburg", today)));

        match view.render(today, today) {
            ViewOutput::Page(page) => {
                assert!(page.contains("Weather in Hamburg"));
                assert!(page.contains("Cities: kiel [hamburg]"));
            }
            other => panic!("expected a page, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn refresh_drives_a_full_fetch_cycle() {
        #[derive(Debug)]
        struct CannedProvider;

        #[async_trait::async_trait]
        impl SnapshotProvider for CannedProvider {
            async fn fetch_snapshot(&self, city: &str) -> Result<WeatherSnapshot> {
                Ok(fixtures::snapshot(city, "2026-08-26".parse().unwrap()))
            }
        }

        let mut view = mounted(&["kiel"]);
        view.refresh(&CannedProvider).await;

        assert!(matches!(view.state(), FetchState::Ready { .. }));
    }
}
