use maud::{html, Markup, DOCTYPE};
use url::Url;

use crate::config::AppConfig;

const MAPS_LOADER: &str = "https://maps.googleapis.com/maps/api/js";

fn maps_loader_url(config: &AppConfig) -> Option<String> {
    if config.map_api_key.is_empty() {
        return None;
    }
    Url::parse_with_params(
        MAPS_LOADER,
        &[
            ("key", config.map_api_key.as_str()),
            ("callback", "initListingMap"),
            ("libraries", "marker"),
            ("loading", "async"),
        ],
    )
    .ok()
    .map(String::from)
}

/// Full-screen map with the htmx overlay on top. Every htmx request on the
/// page swaps `#overlay` unless an element says otherwise.
pub fn map_layout(title: &str, config: &AppConfig, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/static/map.css";
                script src="/static/htmx.js" defer {}
                script src="/static/map.js" defer {}
                @if let Some(src) = maps_loader_url(config) {
                    script src=(src) async defer {}
                }
            }
            body hx-target="#overlay" hx-swap="outerHTML" {
                div id="map"
                    data-scene-url="/map/scene"
                    data-map-id=(config.map_style_id)
                {}
                (content)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loader_only_with_api_key() {
        let mut config = AppConfig::default();
        assert!(maps_loader_url(&config).is_none());

        config.map_api_key = "abc 123".into();
        let url = maps_loader_url(&config).unwrap();
        assert!(url.starts_with(MAPS_LOADER));
        assert!(url.contains("key=abc+123"));
    }

    #[test]
    fn scripts_are_served_from_static() {
        let html = map_layout("Map", &AppConfig::default(), html! {}).into_string();
        assert!(html.contains(r#"src="/static/htmx.js""#));
        assert!(!html.contains("unpkg.com"));
    }
}
