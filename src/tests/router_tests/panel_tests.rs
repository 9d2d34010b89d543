use crate::tests::utils::{get, post, sample_listings, start_session, test_app, FakeBackend};
use crate::app::App;

fn app_with_listings(n: usize) -> (App, String) {
    let app = test_app(FakeBackend {
        listings: sample_listings(n),
        ..FakeBackend::default()
    });
    let cookie = start_session(&app);
    post(&app, &cookie, "/listings/toggle", "");
    (app, cookie)
}

#[test]
fn open_panel_zooms_to_listing() {
    let (app, cookie) = app_with_listings(2);
    post(&app, &cookie, "/listings/info", "key=L0");

    let (status, body) = post(&app, &cookie, "/listings/open", "key=L0");

    assert_eq!(status, 200);
    assert!(body.contains("id=\"panel-live\""));
    assert!(!body.contains("id=\"info-box\""));
    assert!(body.contains(r#"{"op":"set_zoom","zoom":18}"#));
}

#[test]
fn pin_then_unpin_round_trip() {
    let (app, cookie) = app_with_listings(3);
    post(&app, &cookie, "/listings/open", "key=L0");
    let (_, body) = post(&app, &cookie, "/panels/live/pin", "");
    assert!(body.contains("id=\"panel-1\""));
    assert!(!body.contains("id=\"panel-live\""));

    post(&app, &cookie, "/listings/open", "key=L1");
    let (_, body) = post(&app, &cookie, "/panels/1/unpin", "");

    // L0 is live again and L1 took a new pinned slot.
    assert!(body.contains("id=\"panel-live\""));
    assert!(body.contains("id=\"panel-2\""));
    assert!(!body.contains("id=\"panel-1\""));
    assert!(body.contains("right: 500px; width: 500px;"));
}

#[test]
fn collapsed_panels_shift_the_live_panel() {
    let (app, cookie) = app_with_listings(2);
    post(&app, &cookie, "/listings/open", "key=L0");
    post(&app, &cookie, "/panels/live/pin", "");
    post(&app, &cookie, "/panels/1/expand", "");

    let (_, body) = post(&app, &cookie, "/listings/open", "key=L1");

    assert!(body.contains("right: 0px; width: 150px;"));
    assert!(body.contains("right: 150px; width: 500px;"));
}

#[test]
fn pinning_past_the_limit_shows_warning() {
    let (app, cookie) = app_with_listings(11);
    for i in 0..10 {
        post(&app, &cookie, "/listings/open", &format!("key=L{i}"));
        post(&app, &cookie, "/panels/live/pin", "");
    }
    post(&app, &cookie, "/listings/open", "key=L10");

    let (_, body) = post(&app, &cookie, "/panels/live/pin", "");

    assert!(body.contains("You can only pin up to 10 listings at once."));
    assert!(body.contains("id=\"panel-live\""));
    assert_eq!(body.matches("listing-panel pinned").count(), 10);

    let (status, warning) = get(&app, &cookie, "/warning");
    assert_eq!(status, 200);
    assert!(warning.contains("max-panels-warning"));
}

#[test]
fn gallery_navigation_by_index_step_and_scroll() {
    let (app, cookie) = app_with_listings(1);
    post(&app, &cookie, "/listings/open", "key=L0");

    let (_, body) = post(&app, &cookie, "/panels/live/image", "index=2");
    assert!(body.contains("3 / 3"));

    let (_, body) = post(&app, &cookie, "/panels/live/image/step", "step=next");
    assert!(body.contains("1 / 3"));

    let (_, body) = post(
        &app,
        &cookie,
        "/panels/live/thumbnails/scroll",
        "scroll_left=120&client_width=230",
    );
    assert!(body.contains("2 / 3"));

    let (_, body) = post(
        &app,
        &cookie,
        "/panels/live/thumbnails/scroll",
        "direction=right&scroll_left=120&client_width=230",
    );
    assert!(body.contains("3 / 3"));
}

#[test]
fn hide_close_and_dismiss() {
    let (app, cookie) = app_with_listings(2);
    post(&app, &cookie, "/listings/open", "key=L0");
    post(&app, &cookie, "/panels/live/pin", "");
    post(&app, &cookie, "/listings/open", "key=L1");

    let (_, body) = post(&app, &cookie, "/panels/live/visibility", "");
    assert!(body.contains("translateX(100%)"));

    let (_, body) = post(&app, &cookie, "/dismiss", "");
    assert!(!body.contains("id=\"panel-live\""));
    assert!(body.contains("id=\"panel-1\""));

    let (_, body) = post(&app, &cookie, "/panels/1/close", "");
    assert!(!body.contains("id=\"panel-1\""));
}

#[test]
fn live_panel_cannot_be_unpinned() {
    let (app, cookie) = app_with_listings(1);
    post(&app, &cookie, "/listings/open", "key=L0");

    let (status, _) = post(&app, &cookie, "/panels/live/unpin", "");
    assert_eq!(status, 400);
}

#[test]
fn tabs_switch_panel_body() {
    let (app, cookie) = app_with_listings(1);
    post(&app, &cookie, "/listings/open", "key=L0");

    let (_, body) = post(&app, &cookie, "/panels/live/tab", "tab=financial");
    assert!(body.contains("Financial Information"));
    assert!(body.contains("Price/Sq Ft"));

    let (status, _) = post(&app, &cookie, "/panels/live/tab", "tab=reviews");
    assert_eq!(status, 400);
}
