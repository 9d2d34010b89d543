use std::time::Duration;

use maud::{html, Markup};

use crate::state::{SelectionState, MAX_PANELS};

pub fn listings_controls(state: &SelectionState) -> Markup {
    let label = if state.is_loading() {
        "Loading..."
    } else if state.show_listings() {
        "Hide Active Listings"
    } else {
        "Show Active Listings"
    };

    html! {
        div class="map-controls" {
            button type="button" class="action-button" hx-post="/listings/toggle" { (label) }
            @if state.is_loading() {
                (loading_indicator(None))
            }
            @if let Some(message) = state.error() {
                div class="error-message" { (message) }
            }
        }
    }
}

pub fn loading_indicator(message: Option<&str>) -> Markup {
    html! {
        div class="loading-indicator" {
            div class="spinner" {}
            @if let Some(message) = message {
                p { (message) }
            }
        }
    }
}

/// The panel-limit warning. While it is up, the element asks the server to
/// re-render it once the remaining time has passed.
pub fn capacity_warning(remaining: Option<Duration>) -> Markup {
    html! {
        @match remaining {
            Some(left) => {
                div id="capacity-warning"
                    class="max-panels-warning"
                    hx-get="/warning"
                    hx-trigger=(format!("load delay:{}ms", left.as_millis()))
                    hx-target="this"
                    hx-swap="outerHTML"
                {
                    p {
                        "You can only pin up to " (MAX_PANELS)
                        " listings at once. Please close a panel before adding another."
                    }
                }
            }
            None => { div id="capacity-warning" {} }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_polls_after_remaining_time() {
        let html = capacity_warning(Some(Duration::from_millis(4200))).into_string();
        assert!(html.contains("load delay:4200ms"));
        assert!(html.contains("up to 10 listings"));

        let cleared = capacity_warning(None).into_string();
        assert!(!cleared.contains("max-panels-warning"));
    }

    #[test]
    fn button_label_follows_visibility() {
        let state = SelectionState::default();
        let html = listings_controls(&state).into_string();
        assert!(html.contains("Show Active Listings"));
    }
}
