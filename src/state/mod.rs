pub mod gallery;
pub mod nearby;
pub mod panel;
pub mod selection;
pub mod warning;

pub use nearby::NearbyPlace;
pub use panel::{InfoBox, LivePanel, PanelRef, PanelTab, PanelView, PinnedPanel};
pub use selection::{Action, Effect, SelectionState, MAX_PANELS};
