// src/layout.rs
//
// Panels stack leftwards from the right edge of the screen: pinned panels in
// insertion order, then the live panel outermost.

pub const EXPANDED_WIDTH: u32 = 500;
pub const COLLAPSED_WIDTH: u32 = 150;

pub fn panel_width(expanded: bool) -> u32 {
    if expanded {
        EXPANDED_WIDTH
    } else {
        COLLAPSED_WIDTH
    }
}

/// Distance of a panel's right edge from the screen's right edge, and its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelPlacement {
    pub right_px: u32,
    pub width_px: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelLayout {
    pub pinned: Vec<PanelPlacement>,
    pub live: Option<PanelPlacement>,
}

/// Each pinned panel is offset by the widths of the pinned panels before it;
/// the live panel is offset by all of them.
pub fn compute_layout<I>(pinned_expanded: I, live_expanded: Option<bool>) -> PanelLayout
where
    I: IntoIterator<Item = bool>,
{
    let mut offset = 0;
    let pinned = pinned_expanded
        .into_iter()
        .map(|expanded| {
            let placement = PanelPlacement {
                right_px: offset,
                width_px: panel_width(expanded),
            };
            offset += placement.width_px;
            placement
        })
        .collect();

    let live = live_expanded.map(|expanded| PanelPlacement {
        right_px: offset,
        width_px: panel_width(expanded),
    });

    PanelLayout { pinned, live }
}
