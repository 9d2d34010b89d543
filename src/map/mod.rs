// src/map/mod.rs
//
// The map provider runs in the browser. The server drives it through
// `MapControl`; `CommandBuffer` records the calls so they can ride along
// with the next response.

mod view;

pub use view::{scene, sync_markers};

use serde::Serialize;

use crate::domain::Coordinates;

/// Zoom used when focusing on a single listing or place.
pub const DETAIL_ZOOM: u8 = 18;
/// Padding kept around fitted bounds, in pixels.
pub const FIT_PADDING_PX: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Listing,
    Place,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub key: String,
    pub kind: MarkerKind,
    pub position: Coordinates,
    /// Text drawn on the marker itself.
    pub label: String,
    /// Hover text.
    pub title: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    /// Smallest box containing every point. `None` for no points.
    pub fn around<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        points.into_iter().fold(None, |acc: Option<Bounds>, p| {
            Some(match acc {
                None => Bounds {
                    north: p.lat,
                    south: p.lat,
                    east: p.lng,
                    west: p.lng,
                },
                Some(b) => Bounds {
                    north: b.north.max(p.lat),
                    south: b.south.min(p.lat),
                    east: b.east.max(p.lng),
                    west: b.west.min(p.lng),
                },
            })
        })
    }
}

/// What the map provider is asked to do.
pub trait MapControl {
    fn place_markers(&mut self, markers: Vec<Marker>);
    fn pan_to(&mut self, position: Coordinates);
    fn set_zoom(&mut self, zoom: u8);
    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32);
    fn show_info_window(&mut self, key: &str, position: Coordinates);
    fn close_info_window(&mut self);
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MapCommand {
    PlaceMarkers { markers: Vec<Marker> },
    PanTo { position: Coordinates },
    SetZoom { zoom: u8 },
    FitBounds { bounds: Bounds, padding: u32 },
    ShowInfoWindow { key: String, position: Coordinates },
    CloseInfoWindow,
}

/// Records map calls in order, for the browser-side provider to replay.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CommandBuffer {
    commands: Vec<MapCommand>,
}

impl CommandBuffer {
    #[cfg(test)]
    pub fn commands(&self) -> &[MapCommand] {
        &self.commands
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail.
        serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string())
    }
}

impl MapControl for CommandBuffer {
    fn place_markers(&mut self, markers: Vec<Marker>) {
        self.commands.push(MapCommand::PlaceMarkers { markers });
    }

    fn pan_to(&mut self, position: Coordinates) {
        self.commands.push(MapCommand::PanTo { position });
    }

    fn set_zoom(&mut self, zoom: u8) {
        self.commands.push(MapCommand::SetZoom { zoom });
    }

    fn fit_bounds(&mut self, bounds: Bounds, padding_px: u32) {
        self.commands.push(MapCommand::FitBounds {
            bounds,
            padding: padding_px,
        });
    }

    fn show_info_window(&mut self, key: &str, position: Coordinates) {
        self.commands.push(MapCommand::ShowInfoWindow {
            key: key.to_string(),
            position,
        });
    }

    fn close_info_window(&mut self) {
        self.commands.push(MapCommand::CloseInfoWindow);
    }
}

/// A camera change requested by a state transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMove {
    /// Centre on one point at detail zoom.
    FocusOn(Coordinates),
    /// Keep both a place and the listing it was found for on screen.
    Frame {
        place: Coordinates,
        listing: Coordinates,
    },
}

impl CameraMove {
    pub fn apply(&self, map: &mut dyn MapControl) {
        match *self {
            CameraMove::FocusOn(position) => {
                map.pan_to(position);
                map.set_zoom(DETAIL_ZOOM);
            }
            CameraMove::Frame { place, listing } => {
                if let Some(bounds) = Bounds::around([place, listing]) {
                    map.fit_bounds(bounds, FIT_PADDING_PX);
                }
            }
        }
    }
}
