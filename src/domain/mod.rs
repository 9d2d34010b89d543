pub mod format;
pub mod geo;
pub mod listing;
pub mod place;
pub mod transit;

pub use listing::{Coordinates, FeatureList, Listing, MediaItem};
pub use place::{Place, PlaceCategory, PlacesPage};

use serde::{Deserialize, Deserializer};

/// For fields the feed sends either missing or as an explicit `null`.
/// Pair with `#[serde(default)]` to cover the missing case.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
