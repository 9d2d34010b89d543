use crate::app::App;
use crate::backend::{BackendError, ListingsBackend, PlacesQuery};
use crate::config::AppConfig;
use crate::domain::place::Geometry;
use crate::domain::{Coordinates, Listing, MediaItem, Place, PlacesPage};
use crate::router::handle;
use astra::{Body, Response};
use http::{Method, Request};
use std::io::Read;
use std::sync::{Arc, Mutex};

pub const ORIGIN: Coordinates = Coordinates {
    lat: 30.2672,
    lng: -97.7431,
};

/// Canned backend. Records every places query it receives.
#[derive(Default)]
pub struct FakeBackend {
    pub listings: Vec<Listing>,
    pub listings_status: Option<u16>,
    pub first_page: Option<PlacesPage>,
    pub next_page: Option<PlacesPage>,
    pub place_queries: Arc<Mutex<Vec<PlacesQuery>>>,
}

impl ListingsBackend for FakeBackend {
    fn active_listings(&self, limit: u32) -> Result<Vec<Listing>, BackendError> {
        match self.listings_status {
            Some(code) => Err(BackendError::Status(code)),
            None => Ok(self.listings.iter().take(limit as usize).cloned().collect()),
        }
    }

    fn nearby_places(&self, query: &PlacesQuery) -> Result<PlacesPage, BackendError> {
        if let Ok(mut seen) = self.place_queries.lock() {
            seen.push(query.clone());
        }
        let page = match query.page_token {
            None => &self.first_page,
            Some(_) => &self.next_page,
        };
        page.clone().ok_or(BackendError::Status(500))
    }
}

pub fn sample_listing(key: &str, price: f64) -> Listing {
    let mut listing = Listing::with_key(key);
    listing.list_price = Some(price);
    listing.street_number = Some("100".into());
    listing.street_name = Some("Congress Ave".into());
    listing.city = Some("Austin".into());
    listing.state_or_province = Some("TX".into());
    listing.postal_code = Some("78701".into());
    listing.bedrooms_total = Some(3.0);
    listing.bathrooms_total = Some(2.0);
    listing.living_area = Some(1_800.0);
    listing.coordinates = Some(ORIGIN);
    listing.media = (0..3)
        .map(|i| MediaItem {
            media_url: format!("https://img.example/{key}/{i}.jpg"),
        })
        .collect();
    listing
}

pub fn sample_listings(n: usize) -> Vec<Listing> {
    (0..n)
        .map(|i| sample_listing(&format!("L{i}"), 400_000.0 + 50_000.0 * i as f64))
        .collect()
}

/// A place `km` kilometres due north of `ORIGIN`.
pub fn place_north(name: &str, km: f64) -> Place {
    let d_lat = (km / crate::domain::geo::EARTH_RADIUS_KM).to_degrees();
    Place {
        place_id: Some(format!("id-{name}")),
        name: name.to_string(),
        vicinity: Some("Austin".into()),
        geometry: Some(Geometry {
            location: Some(Coordinates {
                lat: ORIGIN.lat + d_lat,
                lng: ORIGIN.lng,
            }),
        }),
        rating: Some(4.5),
        user_ratings_total: Some(80),
        types: vec!["restaurant".into()],
        website: None,
    }
}

pub fn test_app(backend: FakeBackend) -> App {
    App::new(AppConfig::default(), Box::new(backend))
}

pub fn body_string(resp: Response) -> String {
    let mut body = String::new();
    resp.into_body().reader().read_to_string(&mut body).unwrap();
    body
}

/// Load the page once and return the session cookie it hands out.
pub fn start_session(app: &App) -> String {
    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, app).expect("Failed to load page");

    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .expect("missing session cookie")
        .to_str()
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

pub fn get(app: &App, cookie: &str, uri: &str) -> (u16, String) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Cookie", cookie)
        .body(Body::empty())
        .unwrap();
    send(app, req)
}

pub fn post(app: &App, cookie: &str, uri: &str, form: &str) -> (u16, String) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Cookie", cookie)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(form.as_bytes().to_vec()))
        .unwrap();
    send(app, req)
}

fn send(app: &App, req: Request<Body>) -> (u16, String) {
    match handle(req, app) {
        Ok(resp) => (resp.status().as_u16(), body_string(resp)),
        Err(err) => {
            let resp = crate::responses::error_to_response(err);
            (resp.status().as_u16(), body_string(resp))
        }
    }
}
