// src/app.rs
//
// Shared by every worker thread. State transitions happen under the session
// lock; backend calls never do.

use std::collections::VecDeque;
use std::time::Instant;

use tracing::warn;

use crate::backend::{ListingsBackend, PlacesQuery};
use crate::config::AppConfig;
use crate::domain::{Listing, PlacesPage};
use crate::errors::ServerError;
use crate::map::{self, MapControl};
use crate::session::SessionStore;
use crate::state::{Action, Effect, SelectionState};

pub struct App {
    config: AppConfig,
    backend: Box<dyn ListingsBackend>,
    sessions: SessionStore,
    htmx: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, backend: Box<dyn ListingsBackend>) -> Self {
        Self {
            config,
            backend,
            sessions: SessionStore::new(),
            htmx: None,
        }
    }

    /// The htmx library served at `/static/htmx.js`.
    pub fn with_htmx(mut self, source: String) -> Self {
        self.htmx = Some(source);
        self
    }

    pub fn htmx(&self) -> Option<&str> {
        self.htmx.as_deref()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Apply `action` and every action its effects lead to, then bring the
    /// map's markers in line with the resulting state.
    pub fn dispatch(
        &self,
        session: &str,
        action: Action,
        map: &mut dyn MapControl,
    ) -> Result<(), ServerError> {
        let mut queue = VecDeque::from([action]);

        while let Some(action) = queue.pop_front() {
            let effects = self
                .sessions
                .with_session(session, |state| state.apply(action, Instant::now()))?;

            for effect in effects {
                match effect {
                    Effect::FetchListings { request } => {
                        queue.push_back(Action::ListingsLoaded {
                            request,
                            result: self.fetch_listings(),
                        });
                    }
                    Effect::FetchPlaces { request, query } => {
                        queue.push_back(Action::PlacesLoaded {
                            request,
                            result: self.fetch_places(&query),
                        });
                    }
                    Effect::Camera(camera) => camera.apply(map),
                }
            }
        }

        self.sessions
            .with_session(session, |state| map::sync_markers(state, map))
    }

    /// Read-only access for rendering. Expired warnings are cleared first.
    pub fn read<F, T>(&self, session: &str, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&SelectionState) -> T,
    {
        self.sessions.with_session(session, |state| {
            state.tick(Instant::now());
            f(state)
        })
    }

    fn fetch_listings(&self) -> Result<Vec<Listing>, String> {
        self.backend
            .active_listings(self.config.listings_limit)
            .map_err(|e| {
                warn!(error = %e, "listings fetch failed");
                e.to_string()
            })
    }

    fn fetch_places(&self, query: &PlacesQuery) -> Result<PlacesPage, String> {
        self.backend.nearby_places(query).map_err(|e| {
            warn!(error = %e, category = query.category.as_str(), "places fetch failed");
            e.to_string()
        })
    }
}
