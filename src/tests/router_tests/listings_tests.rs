use crate::router::handle;
use crate::tests::utils::{
    body_string, get, post, sample_listing, sample_listings, start_session, test_app, FakeBackend,
};
use astra::Body;
use http::{Method, Request};

#[test]
fn home_page_sets_session_cookie() {
    let app = test_app(FakeBackend::default());

    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &app).expect("Failed to handle request");

    assert_eq!(resp.status(), 200);
    let cookie = resp.headers().get("Set-Cookie").unwrap().to_str().unwrap();
    assert!(cookie.starts_with("map_session="));
    assert!(cookie.contains("HttpOnly"));

    let body = body_string(resp);
    assert!(body.contains("<!DOCTYPE html>"));
    assert!(body.contains("Show Active Listings"));
    assert!(body.contains("id=\"map\""));
}

#[test]
fn returning_session_gets_no_new_cookie() {
    let app = test_app(FakeBackend::default());
    let cookie = start_session(&app);

    let req = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header("Cookie", &cookie)
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &app).unwrap();

    assert!(resp.headers().get("Set-Cookie").is_none());
    assert_eq!(app.sessions().len(), 1);
}

#[test]
fn toggle_listings_returns_overlay_with_markers() {
    let mut listings = sample_listings(2);
    listings.push(sample_listing("big", 1_250_000.0));
    let app = test_app(FakeBackend {
        listings,
        ..FakeBackend::default()
    });
    let cookie = start_session(&app);

    let (status, body) = post(&app, &cookie, "/listings/toggle", "");

    assert_eq!(status, 200);
    assert!(body.contains("Hide Active Listings"));
    assert!(body.contains(r#""op":"place_markers""#));
    assert!(body.contains("$1.3M"));
    assert!(body.contains("$450K"));
    // Fragment only, for htmx to swap in.
    assert!(!body.contains("<html"));
}

#[test]
fn toggling_off_clears_markers() {
    let app = test_app(FakeBackend {
        listings: sample_listings(2),
        ..FakeBackend::default()
    });
    let cookie = start_session(&app);
    post(&app, &cookie, "/listings/toggle", "");

    let (_, body) = post(&app, &cookie, "/listings/toggle", "");

    assert!(body.contains("Show Active Listings"));
    assert!(body.contains(r#"{"op":"place_markers","markers":[]}"#));
}

#[test]
fn failed_listings_fetch_shows_message() {
    let app = test_app(FakeBackend {
        listings_status: Some(503),
        ..FakeBackend::default()
    });
    let cookie = start_session(&app);

    let (status, body) = post(&app, &cookie, "/listings/toggle", "");

    assert_eq!(status, 200);
    assert!(body.contains("Failed to fetch listings. Please try again."));
}

#[test]
fn scene_lists_markers_as_json() {
    let app = test_app(FakeBackend {
        listings: sample_listings(3),
        ..FakeBackend::default()
    });
    let cookie = start_session(&app);
    post(&app, &cookie, "/listings/toggle", "");

    let (status, body) = get(&app, &cookie, "/map/scene");

    assert_eq!(status, 200);
    let scene: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(scene["zoom"], 12);
    assert_eq!(scene["markers"].as_array().unwrap().len(), 3);
    assert_eq!(scene["markers"][0]["label"], "$400K");
    assert!(scene["info_window"].is_null());
}

#[test]
fn marker_click_opens_and_closes_info_box() {
    let app = test_app(FakeBackend {
        listings: sample_listings(2),
        ..FakeBackend::default()
    });
    let cookie = start_session(&app);
    post(&app, &cookie, "/listings/toggle", "");

    let (_, body) = post(&app, &cookie, "/listings/info", "key=L1");
    assert!(body.contains("id=\"info-box\""));
    assert!(body.contains("100 Congress Ave, Austin, TX 78701"));
    assert!(body.contains(r#""op":"show_info_window","key":"L1""#));

    let (_, body) = post(&app, &cookie, "/info-box/step", "step=next");
    assert!(body.contains("https://img.example/L1/1.jpg"));

    let (_, body) = post(&app, &cookie, "/listings/info", "key=L1");
    assert!(!body.contains("id=\"info-box\""));
    assert!(body.contains(r#""op":"close_info_window""#));
}

#[test]
fn missing_form_field_is_bad_request() {
    let app = test_app(FakeBackend::default());
    let cookie = start_session(&app);

    let (status, body) = post(&app, &cookie, "/listings/info", "");
    assert_eq!(status, 400);
    assert!(body.contains("Missing field: key"));
}

#[test]
fn unknown_routes_are_not_found() {
    let app = test_app(FakeBackend::default());
    let cookie = start_session(&app);

    assert_eq!(get(&app, &cookie, "/nope").0, 404);
    assert_eq!(post(&app, &cookie, "/panels/abc/close", "").0, 404);
}

#[test]
fn static_assets_are_served() {
    let app = test_app(FakeBackend::default());
    let cookie = start_session(&app);

    let (status, body) = get(&app, &cookie, "/static/map.js");
    assert_eq!(status, 200);
    assert!(body.contains("initListingMap"));
}
