use crate::router::handle;
use crate::tests::utils::{body_string, get, post, start_session, test_app, FakeBackend};
use astra::Body;
use http::{Method, Request};

fn cookieless_get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn assets_and_unknown_paths_create_no_sessions() {
    let app = test_app(FakeBackend::default());

    for _ in 0..50 {
        for uri in ["/static/map.css", "/static/map.js", "/robots.txt", "/healthz"] {
            if let Ok(resp) = handle(cookieless_get(uri), &app) {
                assert!(resp.headers().get("Set-Cookie").is_none());
            }
        }
    }

    assert_eq!(app.sessions().len(), 0);
}

#[test]
fn page_load_creates_exactly_one_session() {
    let app = test_app(FakeBackend::default());
    let cookie = start_session(&app);

    get(&app, &cookie, "/static/map.css");
    get(&app, &cookie, "/map/scene");
    get(&app, &cookie, "/");

    assert_eq!(app.sessions().len(), 1);
}

#[test]
fn htmx_is_served_locally_when_loaded() {
    let app = test_app(FakeBackend::default()).with_htmx("var htmx = {};".to_string());

    let resp = handle(cookieless_get("/static/htmx.js"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/javascript"
    );
    assert_eq!(body_string(resp), "var htmx = {};");

    let bare = test_app(FakeBackend::default());
    assert!(handle(cookieless_get("/static/htmx.js"), &bare).is_err());
}

#[test]
fn oversized_form_is_rejected() {
    let app = test_app(FakeBackend::default());
    let cookie = start_session(&app);
    let form = format!("key={}", "a".repeat(16 * 1024));

    let (status, body) = post(&app, &cookie, "/listings/info", &form);

    assert_eq!(status, 400);
    assert!(body.contains("Form body too large"));
}
