// src/domain/place.rs

use serde::{Deserialize, Serialize};

use super::{null_as_default, Coordinates};

/// One result of a nearby-places search, as proxied by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Place {
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub vicinity: Option<String>,
    pub geometry: Option<Geometry>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Geometry {
    pub location: Option<Coordinates>,
}

impl Place {
    pub fn location(&self) -> Option<Coordinates> {
        self.geometry.as_ref().and_then(|g| g.location)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlacesPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<Place>,
    pub next_page_token: Option<String>,
}

/// What kind of place a nearby search looks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    #[default]
    Restaurant,
    School,
    Grocery,
    Hospital,
    Transportation,
}

impl PlaceCategory {
    /// Display order of the category strip.
    pub const ALL: [PlaceCategory; 5] = [
        PlaceCategory::Restaurant,
        PlaceCategory::School,
        PlaceCategory::Grocery,
        PlaceCategory::Hospital,
        PlaceCategory::Transportation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlaceCategory::Restaurant => "restaurant",
            PlaceCategory::School => "school",
            PlaceCategory::Grocery => "grocery",
            PlaceCategory::Hospital => "hospital",
            PlaceCategory::Transportation => "transportation",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == raw)
    }

    /// Path segment under `/api/places/`.
    pub fn endpoint(self) -> &'static str {
        match self {
            PlaceCategory::Restaurant => "nearby",
            PlaceCategory::School => "schools",
            PlaceCategory::Grocery => "grocery",
            PlaceCategory::Hospital => "hospitals",
            PlaceCategory::Transportation => "transportation",
        }
    }

    /// Search radius in metres.
    pub fn radius_m(self) -> u32 {
        match self {
            PlaceCategory::Restaurant => 1000,
            PlaceCategory::School => 1500,
            PlaceCategory::Grocery => 1500,
            PlaceCategory::Hospital => 2000,
            PlaceCategory::Transportation => 1000,
        }
    }

    /// Short label for the category strip.
    pub fn tab_label(self) -> &'static str {
        match self {
            PlaceCategory::Restaurant => "Restaurants",
            PlaceCategory::School => "Schools",
            PlaceCategory::Grocery => "Grocery",
            PlaceCategory::Hospital => "Hospitals",
            PlaceCategory::Transportation => "Transit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlaceCategory::Restaurant => "Restaurants",
            PlaceCategory::School => "Schools",
            PlaceCategory::Grocery => "Grocery Stores",
            PlaceCategory::Hospital => "Hospitals",
            PlaceCategory::Transportation => "Public Transit",
        }
    }

    pub fn loading_message(self) -> &'static str {
        match self {
            PlaceCategory::Restaurant => "Loading nearby restaurants...",
            PlaceCategory::School => "Loading nearby schools...",
            PlaceCategory::Grocery => "Loading nearby grocery stores...",
            PlaceCategory::Hospital => "Loading nearby hospitals...",
            PlaceCategory::Transportation => "Loading nearby public transportation...",
        }
    }

    pub fn no_results_message(self) -> &'static str {
        match self {
            PlaceCategory::Restaurant => "No restaurants found nearby",
            PlaceCategory::School => "No schools found nearby",
            PlaceCategory::Grocery => "No grocery stores found nearby",
            PlaceCategory::Hospital => "No hospitals found nearby",
            PlaceCategory::Transportation => "No public transportation found nearby",
        }
    }

    pub fn is_transit(self) -> bool {
        self == PlaceCategory::Transportation
    }
}
