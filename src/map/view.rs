// src/map/view.rs

use serde::Serialize;

use super::{MapControl, Marker, MarkerKind};
use crate::config::AppConfig;
use crate::domain::format::{format_marker_price, format_price};
use crate::domain::{Coordinates, Listing};
use crate::state::SelectionState;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoWindow {
    pub key: String,
    pub position: Coordinates,
}

/// Everything the provider needs to draw the map from scratch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapScene {
    pub center: Coordinates,
    pub zoom: u8,
    pub markers: Vec<Marker>,
    pub info_window: Option<InfoWindow>,
}

pub fn scene(state: &SelectionState, config: &AppConfig) -> MapScene {
    MapScene {
        center: config.default_center,
        zoom: config.default_zoom,
        markers: markers(state),
        info_window: info_window(state),
    }
}

/// Push the current markers and info window through the map capability.
pub fn sync_markers(state: &SelectionState, map: &mut dyn MapControl) {
    map.place_markers(markers(state));
    match info_window(state) {
        Some(window) => map.show_info_window(&window.key, window.position),
        None => map.close_info_window(),
    }
}

fn markers(state: &SelectionState) -> Vec<Marker> {
    let highlighted = state.highlighted_listing();

    let mut markers: Vec<Marker> = state
        .listings()
        .iter()
        .filter_map(|listing| {
            listing_marker(listing, highlighted == Some(listing.listing_key.as_str()))
        })
        .collect();

    if let Some(place) = state.focused_place() {
        markers.push(Marker {
            key: place
                .place_id
                .clone()
                .unwrap_or_else(|| "focused-place".to_string()),
            kind: MarkerKind::Place,
            position: place.position,
            label: place.name.clone(),
            title: place.name.clone(),
            highlighted: true,
        });
    }

    markers
}

/// Listings the geocoder could not place get no marker.
fn listing_marker(listing: &Listing, highlighted: bool) -> Option<Marker> {
    let position = listing.coordinates?;
    Some(Marker {
        key: listing.listing_key.clone(),
        kind: MarkerKind::Listing,
        position,
        label: format_marker_price(listing.list_price),
        title: format_price(listing.list_price),
        highlighted,
    })
}

fn info_window(state: &SelectionState) -> Option<InfoWindow> {
    let info = state.info_box()?;
    Some(InfoWindow {
        key: info.listing.listing_key.clone(),
        position: info.listing.coordinates?,
    })
}
