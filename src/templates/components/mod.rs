use maud::{html, Markup};
use serde_json::{Map, Value};

pub mod controls;
pub mod error;
pub mod gallery;
pub mod info_box;
pub mod nearby;
pub mod panel;

pub use controls::{capacity_warning, listings_controls};
pub use error::error_page;
pub use info_box::info_box;
pub use panel::{live_panel, pinned_panel};

/// JSON object for an `hx-vals` attribute.
pub fn hx_vals<const N: usize>(pairs: [(&str, String); N]) -> String {
    let map: Map<String, Value> = pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), Value::String(v)))
        .collect();
    Value::Object(map).to_string()
}

/// Small button that posts to `url` and swaps the overlay.
pub fn post_button(url: &str, class: &str, title: &str, vals: Option<String>, label: Markup) -> Markup {
    html! {
        button type="button" class=(class) title=(title) hx-post=(url) hx-vals=[vals] {
            (label)
        }
    }
}

pub fn tag_list(items: &[String], class: &str) -> Markup {
    html! {
        div class="tag-list" {
            @for item in items {
                span class=(class) { (item) }
            }
        }
    }
}
