use std::sync::{Arc, Mutex};

use crate::domain::PlacesPage;
use crate::tests::utils::{place_north, post, sample_listings, start_session, test_app, FakeBackend};

fn backend() -> (FakeBackend, Arc<Mutex<Vec<crate::backend::PlacesQuery>>>) {
    let queries = Arc::new(Mutex::new(Vec::new()));
    let backend = FakeBackend {
        listings: sample_listings(1),
        first_page: Some(PlacesPage {
            results: vec![
                place_north("Far Cafe", 2.0),
                place_north("Near Diner", 0.5),
                place_north("Mid Grill", 1.2),
            ],
            next_page_token: Some("page-2".into()),
        }),
        next_page: Some(PlacesPage {
            results: vec![place_north("Closest Deli", 0.1)],
            next_page_token: None,
        }),
        place_queries: Arc::clone(&queries),
        ..FakeBackend::default()
    };
    (backend, queries)
}

#[test]
fn nearby_tab_lists_places_by_distance() {
    let (backend, queries) = backend();
    let app = test_app(backend);
    let cookie = start_session(&app);
    post(&app, &cookie, "/listings/toggle", "");
    post(&app, &cookie, "/listings/open", "key=L0");

    let (status, body) = post(&app, &cookie, "/panels/live/tab", "tab=nearby");

    assert_eq!(status, 200);
    let near = body.find("Near Diner").unwrap();
    let mid = body.find("Mid Grill").unwrap();
    let far = body.find("Far Cafe").unwrap();
    assert!(near < mid && mid < far);
    assert!(body.contains("0.3 mi"));
    assert!(body.contains("0.7 mi"));
    assert!(body.contains("1.2 mi"));
    assert!(body.contains("4.5 ★ (80 reviews)"));
    assert!(body.contains("Load More Results"));

    let seen = queries.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].radius_m, 1000);
}

#[test]
fn load_more_appends_and_resorts() {
    let (backend, queries) = backend();
    let app = test_app(backend);
    let cookie = start_session(&app);
    post(&app, &cookie, "/listings/toggle", "");
    post(&app, &cookie, "/listings/open", "key=L0");
    post(&app, &cookie, "/panels/live/tab", "tab=nearby");

    let (_, body) = post(&app, &cookie, "/panels/live/nearby/more", "");

    let closest = body.find("Closest Deli").unwrap();
    let near = body.find("Near Diner").unwrap();
    assert!(closest < near);
    assert!(!body.contains("Load More Results"));

    let seen = queries.lock().unwrap();
    assert_eq!(seen[1].page_token.as_deref(), Some("page-2"));
}

#[test]
fn category_switch_uses_its_radius() {
    let (backend, queries) = backend();
    let app = test_app(backend);
    let cookie = start_session(&app);
    post(&app, &cookie, "/listings/toggle", "");
    post(&app, &cookie, "/listings/open", "key=L0");

    let (_, body) = post(&app, &cookie, "/panels/live/nearby", "category=hospital");

    assert!(body.contains("Nearby Hospitals"));
    let seen = queries.lock().unwrap();
    assert_eq!(seen.last().map(|q| q.radius_m), Some(2000));
}

#[test]
fn failed_places_fetch_shows_error() {
    let app = test_app(FakeBackend {
        listings: sample_listings(1),
        ..FakeBackend::default()
    });
    let cookie = start_session(&app);
    post(&app, &cookie, "/listings/toggle", "");
    post(&app, &cookie, "/listings/open", "key=L0");

    let (status, body) = post(&app, &cookie, "/panels/live/tab", "tab=nearby");

    assert_eq!(status, 200);
    assert!(body.contains("Error: Failed to fetch nearby restaurants"));
}

#[test]
fn view_on_map_frames_place_and_listing() {
    let (backend, _) = backend();
    let app = test_app(backend);
    let cookie = start_session(&app);
    post(&app, &cookie, "/listings/toggle", "");
    post(&app, &cookie, "/listings/open", "key=L0");
    post(&app, &cookie, "/panels/live/tab", "tab=nearby");

    let (_, body) = post(&app, &cookie, "/panels/live/nearby/0/view", "");

    assert!(body.contains(r#""op":"fit_bounds""#));
    assert!(body.contains(r#""padding":100"#));
    assert!(body.contains(r#""kind":"place""#));
    assert!(body.contains(r#""highlighted":true"#));
}
