// src/domain/transit.rs

use super::Place;

pub const DEFAULT_TRANSIT_ICON: &str = "🚏";

/// Exact place types reported by the provider, checked before any name match.
const TYPE_ICONS: &[(&[&str], &str)] = &[
    (&["subway_station"], "🚇"),
    (&["train_station"], "🚆"),
    (&["bus_station", "bus_stop"], "🚌"),
    (&["tram_station"], "🚊"),
    (&["ferry_terminal"], "⛴️"),
    (&["airport"], "✈️"),
    (&["taxi_stand"], "🚕"),
    (&["parking"], "🅿️"),
];

// Order matters: "station" sits under train, so "Bus Station" resolves
// to the bus icon only through its place type.
const KEYWORD_ICONS: &[(&[&str], &str)] = &[
    (&["subway", "metro", "underground", "tube", "subte", "u-bahn"], "🚇"),
    (&["train", "railway", "rail", "station", "amtrak", "railroad"], "🚆"),
    (&["bus", "shuttle", "coach", "omnibus"], "🚌"),
    (&["tram", "light rail", "streetcar", "trolley", "transit", "lrt"], "🚊"),
    (
        &["ferry", "boat", "port", "pier", "dock", "harbor", "waterway", "water taxi"],
        "⛴️",
    ),
    (&["airport", "terminal", "aerodrome", "aviation", "planes"], "✈️"),
    (&["taxi", "cab", "ride", "uber", "lyft", "hired"], "🚕"),
    (&["bike", "bicycle", "cycling", "bikeshare", "cycle"], "🚲"),
    (&["cable car", "gondola", "lift", "aerial tramway", "ski lift"], "🚡"),
    (&["monorail"], "🚝"),
    (&["parking", "park", "garage"], "🅿️"),
    (&["car rental", "car sharing", "carshare", "rental car", "car"], "🚗"),
];

/// Icon for a transit result: by place type first, then by keywords in the
/// name, then the generic stop glyph.
pub fn transit_icon(place: &Place) -> &'static str {
    for (types, icon) in TYPE_ICONS {
        if place.types.iter().any(|t| types.contains(&t.as_str())) {
            return *icon;
        }
    }

    let name = place.name.to_lowercase();
    KEYWORD_ICONS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| name.contains(k)))
        .map(|(_, icon)| *icon)
        .unwrap_or(DEFAULT_TRANSIT_ICON)
}
