// client.rs
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::{BackendError, ListingsBackend, PlacesQuery};
use crate::domain::{Listing, PlacesPage};

const USER_AGENT: &str = concat!("listing_map/", env!("CARGO_PKG_VERSION"));

/// Blocking HTTP client for the listings/places API.
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, BackendError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        // A trailing slash keeps any path prefix when joining endpoint paths.
        let base = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| BackendError::InvalidUrl(format!("{base_url}: {e}")))?;

        Ok(Self { client, base })
    }

    pub fn listings_url(&self, limit: u32) -> Result<Url, BackendError> {
        let mut url = self
            .base
            .join("api/listings/active")
            .map_err(|e| BackendError::InvalidUrl(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        Ok(url)
    }

    pub fn places_url(&self, query: &PlacesQuery) -> Result<Url, BackendError> {
        let mut url = self
            .base
            .join(&format!("api/places/{}", query.category.endpoint()))
            .map_err(|e| BackendError::InvalidUrl(e.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(
                "location",
                &format!("{},{}", query.location.lat, query.location.lng),
            );
            pairs.append_pair("radius", &query.radius_m.to_string());
            if let Some(token) = &query.page_token {
                pairs.append_pair("pagetoken", token);
            }
        }

        Ok(url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, BackendError> {
        let start = Instant::now();

        let resp: Response = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "backend returned an error status");
            return Err(BackendError::Status(status.as_u16()));
        }

        let body = resp
            .json::<T>()
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        tracing::debug!(%url, elapsed = ?start.elapsed(), "backend request complete");
        Ok(body)
    }
}

impl ListingsBackend for HttpBackend {
    fn active_listings(&self, limit: u32) -> Result<Vec<Listing>, BackendError> {
        let listings: Vec<Listing> = self.get_json(self.listings_url(limit)?)?;
        tracing::info!(count = listings.len(), "fetched active listings");
        Ok(listings)
    }

    fn nearby_places(&self, query: &PlacesQuery) -> Result<PlacesPage, BackendError> {
        let page: PlacesPage = self.get_json(self.places_url(query)?)?;
        tracing::info!(
            category = query.category.as_str(),
            count = page.results.len(),
            has_more = page.next_page_token.is_some(),
            "fetched nearby places"
        );
        Ok(page)
    }
}
