// src/state/nearby.rs

use crate::domain::geo::haversine_km;
use crate::domain::{Coordinates, Place, PlaceCategory, PlacesPage};

/// Places shown per category; the panel has room for no more.
pub const MAX_PLACES: usize = 5;

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct NearbyPlace {
    pub place: Place,
    /// Great-circle distance from the listing, 0 when the place has no location.
    pub distance_km: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingFetch {
    request: RequestId,
    continuation: bool,
}

/// The nearby-places list of one panel, for its currently selected category.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NearbyPlaces {
    category: PlaceCategory,
    places: Vec<NearbyPlace>,
    next_page_token: Option<String>,
    pending: Option<PendingFetch>,
    error: Option<String>,
    loaded: bool,
}

impl NearbyPlaces {
    pub fn category(&self) -> PlaceCategory {
        self.category
    }

    pub fn places(&self) -> &[NearbyPlace] {
        &self.places
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// True once a search for the current category has finished (or was
    /// skipped for lack of coordinates).
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_waiting_for(&self, request: RequestId) -> bool {
        self.pending.map(|p| p.request) == Some(request)
    }

    pub fn can_load_more(&self) -> bool {
        self.next_page_token.is_some() && self.pending.is_none() && self.places.len() < MAX_PLACES
    }

    /// Start a fresh search, dropping whatever was shown before.
    pub fn begin(&mut self, category: PlaceCategory, request: RequestId) {
        *self = NearbyPlaces {
            category,
            pending: Some(PendingFetch {
                request,
                continuation: false,
            }),
            ..NearbyPlaces::default()
        };
    }

    /// Switch category without searching. Used when the listing has nowhere
    /// to search from.
    pub fn skip(&mut self, category: PlaceCategory) {
        *self = NearbyPlaces {
            category,
            loaded: true,
            ..NearbyPlaces::default()
        };
    }

    /// Claim the continuation token for a "load more" request.
    pub fn begin_more(&mut self, request: RequestId) -> Option<String> {
        if !self.can_load_more() {
            return None;
        }
        self.pending = Some(PendingFetch {
            request,
            continuation: true,
        });
        self.error = None;
        self.next_page_token.clone()
    }

    /// Merge a fetched page. First pages replace, continuations append; the
    /// merged list is sorted by distance and capped at `MAX_PLACES`.
    pub fn apply_page(&mut self, origin: Coordinates, page: PlacesPage) {
        let continuation = self.pending.map(|p| p.continuation).unwrap_or(false);
        self.pending = None;
        self.loaded = true;
        self.error = None;

        let fresh = with_distances(origin, page.results);
        if continuation {
            self.places.extend(fresh);
        } else {
            self.places = fresh;
        }

        sort_by_distance(&mut self.places);
        self.places.truncate(MAX_PLACES);

        self.next_page_token = page
            .next_page_token
            .filter(|_| self.places.len() < MAX_PLACES);
    }

    /// A failed fetch keeps what was already shown.
    pub fn fail(&mut self, message: String) {
        self.pending = None;
        self.loaded = true;
        self.error = Some(message);
    }
}

pub fn with_distances(origin: Coordinates, places: Vec<Place>) -> Vec<NearbyPlace> {
    places
        .into_iter()
        .map(|place| {
            let distance_km = place
                .location()
                .map(|loc| haversine_km(origin, loc))
                .unwrap_or(0.0);
            NearbyPlace { place, distance_km }
        })
        .collect()
}

pub fn sort_by_distance(places: &mut [NearbyPlace]) {
    places.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
}
