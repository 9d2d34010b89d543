// src/state/panel.rs

use crate::domain::Listing;

use super::nearby::NearbyPlaces;

/// Pinned panel ids are handed out in creation order and never reused.
pub type PanelId = u64;

/// Addresses either the live panel or one pinned panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelRef {
    Live,
    Pinned(PanelId),
}

impl PanelRef {
    /// `live` or a numeric pinned-panel id, as used in URLs.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw == "live" {
            return Some(PanelRef::Live);
        }
        raw.parse().ok().map(PanelRef::Pinned)
    }

    pub fn path_segment(self) -> String {
        match self {
            PanelRef::Live => "live".to_string(),
            PanelRef::Pinned(id) => id.to_string(),
        }
    }

    /// DOM id of the rendered panel.
    pub fn dom_id(self) -> String {
        format!("panel-{}", self.path_segment())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelTab {
    #[default]
    Details,
    Amenities,
    Financial,
    Nearby,
}

impl PanelTab {
    pub const ALL: [PanelTab; 4] = [
        PanelTab::Details,
        PanelTab::Amenities,
        PanelTab::Financial,
        PanelTab::Nearby,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PanelTab::Details => "details",
            PanelTab::Amenities => "amenities",
            PanelTab::Financial => "financial",
            PanelTab::Nearby => "nearby",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PanelTab::Details => "Details",
            PanelTab::Amenities => "Amenities",
            PanelTab::Financial => "Financial",
            PanelTab::Nearby => "Nearby Places",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == raw)
    }
}

/// Everything a detail panel shows, independent of where it sits.
/// Moves as a unit between the live slot and the pinned list.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub listing: Listing,
    pub selected_image_index: usize,
    pub is_expanded: bool,
    pub tab: PanelTab,
    pub nearby: NearbyPlaces,
}

impl PanelView {
    pub fn new(listing: Listing) -> Self {
        Self {
            listing,
            selected_image_index: 0,
            is_expanded: true,
            tab: PanelTab::default(),
            nearby: NearbyPlaces::default(),
        }
    }

    pub fn image_count(&self) -> usize {
        self.listing.image_count()
    }

    pub fn current_image(&self) -> Option<&str> {
        self.listing.image_url(self.selected_image_index)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PinnedPanel {
    pub id: PanelId,
    pub view: PanelView,
}

impl PinnedPanel {
    pub fn listing(&self) -> &Listing {
        &self.view.listing
    }

    pub fn selected_image_index(&self) -> usize {
        self.view.selected_image_index
    }

    pub fn is_expanded(&self) -> bool {
        self.view.is_expanded
    }
}

/// The single unpinned panel. It can be slid out of view without closing.
#[derive(Debug, Clone, PartialEq)]
pub struct LivePanel {
    pub view: PanelView,
    pub is_visible: bool,
}

/// Compact marker-click popup with its own image carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoBox {
    pub listing: Listing,
    pub image_index: usize,
}

impl InfoBox {
    pub fn new(listing: Listing) -> Self {
        Self {
            listing,
            image_index: 0,
        }
    }
}
