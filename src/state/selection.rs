// src/state/selection.rs
//
// The one owner of per-session browser state. Every user interaction and
// every fetch result is an `Action`; `apply` mutates the state and returns
// the side effects the caller must run.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::backend::PlacesQuery;
use crate::domain::{Coordinates, Listing, PlaceCategory, PlacesPage};
use crate::layout::{compute_layout, PanelLayout};
use crate::map::CameraMove;

use super::gallery::{
    clamp_index, first_mostly_visible, predict_after_arrow, step_index, ScrollDirection, Step,
    StripMetrics,
};
use super::nearby::RequestId;
use super::panel::{InfoBox, LivePanel, PanelId, PanelRef, PanelTab, PanelView, PinnedPanel};
use super::warning::CapacityWarning;

pub const MAX_PANELS: usize = 10;
pub const LISTINGS_ERROR: &str = "Failed to fetch listings. Please try again.";

/// A nearby place the user asked to see on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusedPlace {
    pub position: Coordinates,
    pub name: String,
    pub place_id: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Action {
    ToggleListings,
    ListingsLoaded {
        request: RequestId,
        result: Result<Vec<Listing>, String>,
    },
    OpenInfoBox {
        key: String,
    },
    StepInfoBoxImage(Step),
    PromoteToPanel {
        key: String,
    },
    PinCurrent,
    Unpin(PanelId),
    CloseLive,
    ClosePinned(PanelId),
    ToggleExpand(PanelRef),
    ToggleLiveVisibility,
    SetImageIndex {
        panel: PanelRef,
        index: usize,
    },
    StepImage {
        panel: PanelRef,
        step: Step,
    },
    ThumbnailsScrolled {
        panel: PanelRef,
        strip: StripMetrics,
    },
    ThumbnailArrow {
        panel: PanelRef,
        direction: ScrollDirection,
        strip: StripMetrics,
    },
    Dismiss,
    SelectTab {
        panel: PanelRef,
        tab: PanelTab,
    },
    SelectPlaceCategory {
        panel: PanelRef,
        category: PlaceCategory,
    },
    LoadMorePlaces(PanelRef),
    PlacesLoaded {
        request: RequestId,
        result: Result<PlacesPage, String>,
    },
    ViewPlaceOnMap {
        panel: PanelRef,
        index: usize,
    },
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::ToggleListings => "toggle_listings",
            Action::ListingsLoaded { .. } => "listings_loaded",
            Action::OpenInfoBox { .. } => "open_info_box",
            Action::StepInfoBoxImage(_) => "step_info_box_image",
            Action::PromoteToPanel { .. } => "promote_to_panel",
            Action::PinCurrent => "pin_current",
            Action::Unpin(_) => "unpin",
            Action::CloseLive => "close_live",
            Action::ClosePinned(_) => "close_pinned",
            Action::ToggleExpand(_) => "toggle_expand",
            Action::ToggleLiveVisibility => "toggle_live_visibility",
            Action::SetImageIndex { .. } => "set_image_index",
            Action::StepImage { .. } => "step_image",
            Action::ThumbnailsScrolled { .. } => "thumbnails_scrolled",
            Action::ThumbnailArrow { .. } => "thumbnail_arrow",
            Action::Dismiss => "dismiss",
            Action::SelectTab { .. } => "select_tab",
            Action::SelectPlaceCategory { .. } => "select_place_category",
            Action::LoadMorePlaces(_) => "load_more_places",
            Action::PlacesLoaded { .. } => "places_loaded",
            Action::ViewPlaceOnMap { .. } => "view_place_on_map",
        }
    }
}

/// Work a transition asks for. Fetch results come back as actions carrying
/// the same request id.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    FetchListings { request: RequestId },
    FetchPlaces { request: RequestId, query: PlacesQuery },
    Camera(CameraMove),
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    show_listings: bool,
    listings: Vec<Listing>,
    loading: bool,
    error: Option<String>,
    listings_request: Option<RequestId>,
    next_request: RequestId,
    live: Option<LivePanel>,
    info_box: Option<InfoBox>,
    pinned: Vec<PinnedPanel>,
    next_panel_id: PanelId,
    warning: CapacityWarning,
    focused_place: Option<FocusedPlace>,
    highlighted_listing: Option<String>,
}

impl SelectionState {
    pub fn apply(&mut self, action: Action, now: Instant) -> Vec<Effect> {
        debug!(action = action.name(), "applying action");

        match action {
            Action::ToggleListings => self.toggle_listings(),
            Action::ListingsLoaded { request, result } => {
                self.listings_loaded(request, result);
                Vec::new()
            }
            Action::OpenInfoBox { key } => {
                self.open_info_box(&key);
                Vec::new()
            }
            Action::StepInfoBoxImage(step) => {
                self.step_info_box_image(step);
                Vec::new()
            }
            Action::PromoteToPanel { key } => self.promote_to_panel(&key),
            Action::PinCurrent => {
                self.pin_current(now);
                Vec::new()
            }
            Action::Unpin(id) => {
                self.unpin(id, now);
                Vec::new()
            }
            Action::CloseLive => {
                self.live = None;
                Vec::new()
            }
            Action::ClosePinned(id) => {
                self.close_pinned(id);
                Vec::new()
            }
            Action::ToggleExpand(panel) => {
                self.toggle_expand(panel);
                Vec::new()
            }
            Action::ToggleLiveVisibility => {
                if let Some(live) = self.live.as_mut() {
                    live.is_visible = !live.is_visible;
                }
                Vec::new()
            }
            Action::SetImageIndex { panel, index } => {
                self.set_image_index(panel, index);
                Vec::new()
            }
            Action::StepImage { panel, step } => {
                if let Some(view) = self.panel_mut(panel) {
                    view.selected_image_index =
                        step_index(view.selected_image_index, step, view.image_count());
                }
                Vec::new()
            }
            Action::ThumbnailsScrolled { panel, strip } => {
                if let Some(count) = self.panel(panel).map(PanelView::image_count) {
                    self.set_image_index(panel, first_mostly_visible(strip, count));
                }
                Vec::new()
            }
            Action::ThumbnailArrow {
                panel,
                direction,
                strip,
            } => {
                if let Some(count) = self.panel(panel).map(PanelView::image_count) {
                    let first = first_mostly_visible(strip, count);
                    self.set_image_index(panel, predict_after_arrow(first, direction, count));
                }
                Vec::new()
            }
            Action::Dismiss => {
                self.info_box = None;
                self.live = None;
                Vec::new()
            }
            Action::SelectTab { panel, tab } => self.select_tab(panel, tab),
            Action::SelectPlaceCategory { panel, category } => {
                self.select_place_category(panel, category)
            }
            Action::LoadMorePlaces(panel) => self.load_more_places(panel),
            Action::PlacesLoaded { request, result } => {
                self.places_loaded(request, result);
                Vec::new()
            }
            Action::ViewPlaceOnMap { panel, index } => self.view_place_on_map(panel, index),
        }
    }

    pub fn show_listings(&self) -> bool {
        self.show_listings
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn live(&self) -> Option<&LivePanel> {
        self.live.as_ref()
    }

    pub fn info_box(&self) -> Option<&InfoBox> {
        self.info_box.as_ref()
    }

    pub fn pinned(&self) -> &[PinnedPanel] {
        &self.pinned
    }

    pub fn focused_place(&self) -> Option<&FocusedPlace> {
        self.focused_place.as_ref()
    }

    pub fn highlighted_listing(&self) -> Option<&str> {
        self.highlighted_listing.as_deref()
    }

    pub fn warning_remaining(&self, now: Instant) -> Option<Duration> {
        self.warning.remaining(now)
    }

    pub fn tick(&mut self, now: Instant) {
        self.warning.tick(now);
    }

    pub fn layout(&self) -> PanelLayout {
        compute_layout(
            self.pinned.iter().map(PinnedPanel::is_expanded),
            self.live.as_ref().map(|live| live.view.is_expanded),
        )
    }

    pub fn panel(&self, panel: PanelRef) -> Option<&PanelView> {
        match panel {
            PanelRef::Live => self.live.as_ref().map(|live| &live.view),
            PanelRef::Pinned(id) => self.pinned.iter().find(|p| p.id == id).map(|p| &p.view),
        }
    }

    pub fn panel_mut(&mut self, panel: PanelRef) -> Option<&mut PanelView> {
        match panel {
            PanelRef::Live => self.live.as_mut().map(|live| &mut live.view),
            PanelRef::Pinned(id) => self
                .pinned
                .iter_mut()
                .find(|p| p.id == id)
                .map(|p| &mut p.view),
        }
    }

    fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        self.next_request
    }

    fn next_panel_id(&mut self) -> PanelId {
        self.next_panel_id += 1;
        self.next_panel_id
    }

    fn find_listing(&self, key: &str) -> Option<&Listing> {
        self.listings
            .iter()
            .chain(self.info_box.as_ref().map(|info| &info.listing))
            .find(|listing| listing.listing_key == key)
    }

    fn toggle_listings(&mut self) -> Vec<Effect> {
        if self.show_listings {
            self.show_listings = false;
            self.listings.clear();
            self.loading = false;
            self.error = None;
            self.listings_request = None;
            self.live = None;
            self.info_box = None;
            self.highlighted_listing = None;
            return Vec::new();
        }

        self.show_listings = true;
        self.loading = true;
        self.error = None;
        let request = self.next_request_id();
        self.listings_request = Some(request);
        vec![Effect::FetchListings { request }]
    }

    fn listings_loaded(&mut self, request: RequestId, result: Result<Vec<Listing>, String>) {
        if self.listings_request != Some(request) {
            warn!(request, "dropping stale listings result");
            return;
        }
        self.listings_request = None;
        self.loading = false;

        match result {
            Ok(listings) => {
                self.listings = listings;
                self.error = None;
            }
            Err(reason) => {
                debug!(%reason, "listings fetch failed");
                self.error = Some(LISTINGS_ERROR.to_string());
            }
        }
    }

    /// Clicking the marker of the listing already shown closes the box.
    fn open_info_box(&mut self, key: &str) {
        if self
            .info_box
            .as_ref()
            .is_some_and(|info| info.listing.listing_key == key)
        {
            self.info_box = None;
            return;
        }

        match self.listings.iter().find(|l| l.listing_key == key) {
            Some(listing) => self.info_box = Some(InfoBox::new(listing.clone())),
            None => warn!(key, "info box requested for unknown listing"),
        }
    }

    fn step_info_box_image(&mut self, step: Step) {
        if let Some(info) = self.info_box.as_mut() {
            info.image_index = step_index(info.image_index, step, info.listing.image_count());
        }
    }

    fn promote_to_panel(&mut self, key: &str) -> Vec<Effect> {
        let Some(listing) = self.find_listing(key).cloned() else {
            warn!(key, "panel requested for unknown listing");
            return Vec::new();
        };

        self.info_box = None;
        let coordinates = listing.coordinates;
        self.live = Some(LivePanel {
            view: PanelView::new(listing),
            is_visible: true,
        });

        coordinates
            .map(|position| vec![Effect::Camera(CameraMove::FocusOn(position))])
            .unwrap_or_default()
    }

    /// Appends `view` as a pinned panel unless its listing is already pinned.
    fn push_pinned(&mut self, mut view: PanelView) {
        let key = &view.listing.listing_key;
        if self.pinned.iter().any(|p| &p.listing().listing_key == key) {
            debug!(key = %key, "listing already pinned");
            return;
        }
        view.is_expanded = true;
        let id = self.next_panel_id();
        self.pinned.push(PinnedPanel { id, view });
    }

    fn pin_current(&mut self, now: Instant) {
        if self.live.is_none() {
            return;
        }
        if self.pinned.len() >= MAX_PANELS {
            warn!(max = MAX_PANELS, "pin rejected, panel limit reached");
            self.warning.raise(now);
            return;
        }
        if let Some(live) = self.live.take() {
            self.push_pinned(live.view);
        }
    }

    /// The capacity check uses the pinned count before the unpinned panel
    /// leaves, so at capacity the previous live panel is dropped.
    fn unpin(&mut self, id: PanelId, now: Instant) {
        let Some(position) = self.pinned.iter().position(|p| p.id == id) else {
            warn!(id, "unpin requested for unknown panel");
            return;
        };
        let count_before = self.pinned.len();
        let panel = self.pinned.remove(position);

        if let Some(previous) = self.live.take() {
            if count_before < MAX_PANELS {
                self.push_pinned(previous.view);
            } else {
                warn!(
                    key = %previous.view.listing.listing_key,
                    "panel limit reached, dropping live panel"
                );
                self.warning.raise(now);
            }
        }

        self.live = Some(LivePanel {
            view: panel.view,
            is_visible: true,
        });
    }

    fn close_pinned(&mut self, id: PanelId) {
        let before = self.pinned.len();
        self.pinned.retain(|p| p.id != id);
        if self.pinned.len() == before {
            warn!(id, "close requested for unknown panel");
        }
    }

    fn toggle_expand(&mut self, panel: PanelRef) {
        if let Some(view) = self.panel_mut(panel) {
            view.is_expanded = !view.is_expanded;
        }
    }

    fn set_image_index(&mut self, panel: PanelRef, index: usize) {
        if let Some(view) = self.panel_mut(panel) {
            view.selected_image_index = clamp_index(index, view.image_count());
        }
    }

    fn select_tab(&mut self, panel: PanelRef, tab: PanelTab) -> Vec<Effect> {
        let Some(view) = self.panel_mut(panel) else {
            return Vec::new();
        };
        view.tab = tab;

        let idle = !view.nearby.is_loaded() && !view.nearby.is_loading();
        if tab == PanelTab::Nearby && idle {
            let category = view.nearby.category();
            return self.start_nearby(panel, category);
        }
        Vec::new()
    }

    fn select_place_category(&mut self, panel: PanelRef, category: PlaceCategory) -> Vec<Effect> {
        let Some(view) = self.panel_mut(panel) else {
            return Vec::new();
        };
        view.tab = PanelTab::Nearby;

        let nearby = &view.nearby;
        if nearby.category() == category && (nearby.is_loaded() || nearby.is_loading()) {
            return Vec::new();
        }
        self.start_nearby(panel, category)
    }

    fn start_nearby(&mut self, panel: PanelRef, category: PlaceCategory) -> Vec<Effect> {
        let request = self.next_request_id();
        let Some(view) = self.panel_mut(panel) else {
            return Vec::new();
        };

        match view.listing.coordinates {
            Some(location) => {
                view.nearby.begin(category, request);
                vec![Effect::FetchPlaces {
                    request,
                    query: PlacesQuery::first_page(category, location),
                }]
            }
            None => {
                debug!(key = %view.listing.listing_key, "listing has no coordinates, skipping places");
                view.nearby.skip(category);
                Vec::new()
            }
        }
    }

    fn load_more_places(&mut self, panel: PanelRef) -> Vec<Effect> {
        let request = self.next_request_id();
        let Some(view) = self.panel_mut(panel) else {
            return Vec::new();
        };
        let Some(location) = view.listing.coordinates else {
            return Vec::new();
        };
        let Some(token) = view.nearby.begin_more(request) else {
            return Vec::new();
        };

        let category = view.nearby.category();
        vec![Effect::FetchPlaces {
            request,
            query: PlacesQuery {
                page_token: Some(token),
                ..PlacesQuery::first_page(category, location)
            },
        }]
    }

    /// Results for a closed panel or a superseded search find no waiting
    /// panel and are dropped.
    fn places_loaded(&mut self, request: RequestId, result: Result<PlacesPage, String>) {
        let waiting = self
            .live
            .iter_mut()
            .map(|live| &mut live.view)
            .chain(self.pinned.iter_mut().map(|p| &mut p.view))
            .find(|view| view.nearby.is_waiting_for(request));

        let Some(view) = waiting else {
            warn!(request, "dropping stale places result");
            return;
        };

        let category = view.nearby.category();
        match (result, view.listing.coordinates) {
            (Ok(page), Some(origin)) => view.nearby.apply_page(origin, page),
            (Ok(_), None) => view.nearby.skip(category),
            (Err(reason), _) => {
                debug!(%reason, category = category.as_str(), "places fetch failed");
                view.nearby.fail(format!(
                    "Failed to fetch nearby {}",
                    category.label().to_lowercase()
                ));
            }
        }
    }

    fn view_place_on_map(&mut self, panel: PanelRef, index: usize) -> Vec<Effect> {
        let Some(view) = self.panel(panel) else {
            return Vec::new();
        };
        let Some(nearby) = view.nearby.places().get(index) else {
            warn!(index, "no nearby place at index");
            return Vec::new();
        };
        let Some(position) = nearby.place.location() else {
            warn!(name = %nearby.place.name, "place has no coordinates");
            return Vec::new();
        };

        let focused = FocusedPlace {
            position,
            name: nearby.place.name.clone(),
            place_id: nearby.place.place_id.clone(),
        };
        let listing_key = view.listing.listing_key.clone();
        let camera = match view.listing.coordinates {
            Some(listing) => CameraMove::Frame {
                place: position,
                listing,
            },
            None => CameraMove::FocusOn(position),
        };

        self.focused_place = Some(focused);
        self.highlighted_listing = Some(listing_key);
        vec![Effect::Camera(camera)]
    }
}
