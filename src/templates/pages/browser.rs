use std::time::Instant;

use maud::{html, Markup, PreEscaped};

use crate::config::AppConfig;
use crate::map::CommandBuffer;
use crate::state::SelectionState;
use crate::templates::components::{
    capacity_warning, info_box, listings_controls, live_panel, pinned_panel,
};
use crate::templates::map_layout;

pub fn browser_page(state: &SelectionState, config: &AppConfig, now: Instant) -> Markup {
    map_layout(
        "Listing Map",
        config,
        overlay(state, now, &CommandBuffer::default()),
    )
}

/// Everything drawn over the map. POST handlers return just this fragment,
/// with the map calls of that request embedded for the map script to replay.
pub fn overlay(state: &SelectionState, now: Instant, commands: &CommandBuffer) -> Markup {
    let layout = state.layout();
    // Keep a stray "</script>" inside listing text from ending the block.
    let commands_json = commands.to_json().replace("</", "<\\/");

    html! {
        div id="overlay" {
            (listings_controls(state))
            (capacity_warning(state.warning_remaining(now)))

            @if let Some(info) = state.info_box() {
                (info_box(info))
            }

            div class="panels" {
                @for (panel, placement) in state.pinned().iter().zip(&layout.pinned) {
                    (pinned_panel(panel, *placement))
                }
                @if let (Some(live), Some(placement)) = (state.live(), layout.live) {
                    (live_panel(live, placement))
                }
            }

            script type="application/json" id="map-commands" {
                (PreEscaped(commands_json))
            }
        }
    }
}
