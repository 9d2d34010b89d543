mod backend_error;
mod client;

pub use backend_error::BackendError;
pub use client::HttpBackend;

use crate::domain::{Coordinates, Listing, PlaceCategory, PlacesPage};

/// One nearby-places request. `page_token` continues a previous search.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesQuery {
    pub category: PlaceCategory,
    pub location: Coordinates,
    pub radius_m: u32,
    pub page_token: Option<String>,
}

impl PlacesQuery {
    pub fn first_page(category: PlaceCategory, location: Coordinates) -> Self {
        Self {
            category,
            location,
            radius_m: category.radius_m(),
            page_token: None,
        }
    }
}

/// The REST API the browser reads listings and places from.
pub trait ListingsBackend: Send + Sync {
    fn active_listings(&self, limit: u32) -> Result<Vec<Listing>, BackendError>;

    fn nearby_places(&self, query: &PlacesQuery) -> Result<PlacesPage, BackendError>;
}
