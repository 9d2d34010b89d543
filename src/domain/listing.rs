// src/domain/listing.rs

use serde::{Deserialize, Deserializer, Serialize};

// Listing (RESO-style record, PascalCase on the wire)
//  ├── ListingKey            unique, required
//  ├── address parts         StreetNumber, StreetName, City, StateOrProvince, PostalCode
//  ├── price fields          ListPrice, ClosePrice, OriginalListPrice
//  ├── room counts / sizes   BedroomsTotal, BathroomsTotal, LivingArea, LotSizeArea
//  ├── feature lists         string or array of strings
//  ├── Media[]               MediaURL
//  └── coordinates           { lat, lng }  (added by the backend's geocoder)

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub media_url: String,
}

#[derive(Deserialize)]
struct RawMediaItem {
    #[serde(rename = "MediaURL", default)]
    media_url: Option<String>,
}

/// `Media` may be missing, `null`, or hold items without a URL. Only items
/// with a usable URL are kept.
fn media_items<'de, D>(deserializer: D) -> Result<Vec<MediaItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Option<RawMediaItem>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .flatten()
        .filter_map(|item| item.media_url)
        .filter(|url| !url.trim().is_empty())
        .map(|media_url| MediaItem { media_url })
        .collect())
}

/// A list-valued feed field. The feed sends some of these as a single
/// string and some as arrays; both end up here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "OneOrMany")]
pub struct FeatureList(pub Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    Many(Vec<String>),
    One(String),
    Empty,
}

impl From<OneOrMany> for FeatureList {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::Many(items) => {
                FeatureList(items.into_iter().filter(|s| !s.trim().is_empty()).collect())
            }
            OneOrMany::One(item) if item.trim().is_empty() => FeatureList::default(),
            OneOrMany::One(item) => FeatureList(vec![item]),
            OneOrMany::Empty => FeatureList::default(),
        }
    }
}

impl FeatureList {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// `Y`/`N` flags, which some feeds send as booleans instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "FlagRepr")]
pub struct YesNo(pub bool);

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagRepr {
    Bool(bool),
    Text(String),
}

impl From<FlagRepr> for YesNo {
    fn from(value: FlagRepr) -> Self {
        match value {
            FlagRepr::Bool(b) => YesNo(b),
            FlagRepr::Text(s) => YesNo(matches!(s.trim(), "Y" | "y" | "Yes" | "yes" | "true")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Listing {
    pub listing_key: String,
    pub listing_id: Option<String>,
    pub standard_status: Option<String>,
    pub property_type: Option<String>,

    // Address
    pub street_number: Option<String>,
    pub street_name: Option<String>,
    pub city: Option<String>,
    pub state_or_province: Option<String>,
    pub postal_code: Option<String>,

    // Price
    pub list_price: Option<f64>,
    pub close_price: Option<f64>,
    pub original_list_price: Option<f64>,

    // Size and rooms
    pub bedrooms_total: Option<f64>,
    pub bathrooms_total: Option<f64>,
    pub living_area: Option<f64>,
    pub lot_size_area: Option<f64>,
    pub lot_size_units: Option<String>,
    pub year_built: Option<u32>,
    pub stories: Option<f64>,
    pub parking_total: Option<f64>,
    pub garage_spaces: Option<f64>,
    pub fireplaces_total: Option<f64>,
    #[serde(rename = "PoolPrivateYN")]
    pub pool_private: Option<YesNo>,
    #[serde(rename = "WaterfrontYN")]
    pub waterfront: Option<YesNo>,

    // Dates
    pub list_date: Option<String>,
    pub close_date: Option<String>,
    pub days_on_market: Option<u32>,

    pub public_remarks: Option<String>,

    // Features and amenities
    #[serde(default)]
    pub appliances: FeatureList,
    #[serde(default)]
    pub interior_features: FeatureList,
    #[serde(default)]
    pub exterior_features: FeatureList,
    #[serde(default)]
    pub community_features: FeatureList,
    #[serde(default)]
    pub security_features: FeatureList,
    #[serde(default)]
    pub association_amenities: FeatureList,
    #[serde(default)]
    pub utilities: FeatureList,
    #[serde(default)]
    pub water_source: FeatureList,
    #[serde(default)]
    pub sewer: FeatureList,
    #[serde(default)]
    pub heating: FeatureList,
    #[serde(default)]
    pub cooling: FeatureList,
    #[serde(default)]
    pub lot_features: FeatureList,
    #[serde(default)]
    pub view: FeatureList,
    #[serde(default)]
    pub waterfront_features: FeatureList,

    // Financial
    pub tax_annual_amount: Option<f64>,
    pub tax_year: Option<u32>,
    pub association_fee: Option<f64>,
    pub association_fee_frequency: Option<String>,
    pub financing_proposed: Option<String>,
    #[serde(default)]
    pub financing_available: FeatureList,

    #[serde(default, deserialize_with = "media_items")]
    pub media: Vec<MediaItem>,
    #[serde(rename = "coordinates")]
    pub coordinates: Option<Coordinates>,
}

impl Listing {
    /// A listing with only its key set. Everything else is optional in the
    /// feed, so this is also what a sparse record deserializes to.
    #[cfg(test)]
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            listing_key: key.into(),
            listing_id: None,
            standard_status: None,
            property_type: None,
            street_number: None,
            street_name: None,
            city: None,
            state_or_province: None,
            postal_code: None,
            list_price: None,
            close_price: None,
            original_list_price: None,
            bedrooms_total: None,
            bathrooms_total: None,
            living_area: None,
            lot_size_area: None,
            lot_size_units: None,
            year_built: None,
            stories: None,
            parking_total: None,
            garage_spaces: None,
            fireplaces_total: None,
            pool_private: None,
            waterfront: None,
            list_date: None,
            close_date: None,
            days_on_market: None,
            public_remarks: None,
            appliances: FeatureList::default(),
            interior_features: FeatureList::default(),
            exterior_features: FeatureList::default(),
            community_features: FeatureList::default(),
            security_features: FeatureList::default(),
            association_amenities: FeatureList::default(),
            utilities: FeatureList::default(),
            water_source: FeatureList::default(),
            sewer: FeatureList::default(),
            heating: FeatureList::default(),
            cooling: FeatureList::default(),
            lot_features: FeatureList::default(),
            view: FeatureList::default(),
            waterfront_features: FeatureList::default(),
            tax_annual_amount: None,
            tax_year: None,
            association_fee: None,
            association_fee_frequency: None,
            financing_proposed: None,
            financing_available: FeatureList::default(),
            media: Vec::new(),
            coordinates: None,
        }
    }

    pub fn image_count(&self) -> usize {
        self.media.len()
    }

    pub fn image_url(&self, index: usize) -> Option<&str> {
        self.media.get(index).map(|m| m.media_url.as_str())
    }

    /// Whole dollars per square foot, when both inputs are present.
    pub fn price_per_sqft(&self) -> Option<i64> {
        match (self.list_price, self.living_area) {
            (Some(price), Some(area)) if price > 0.0 && area > 0.0 => {
                Some((price / area).round() as i64)
            }
            _ => None,
        }
    }

    pub fn has_financial_data(&self) -> bool {
        [
            self.list_price,
            self.close_price,
            self.original_list_price,
            self.tax_annual_amount,
            self.association_fee,
        ]
        .iter()
        .any(|v| v.map(|x| x != 0.0).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_and_mixed_shape_records() {
        let json = r#"{
            "ListingKey": "abc123",
            "ListPrice": 1250000,
            "BedroomsTotal": 3,
            "BathroomsTotal": 2.5,
            "Heating": "Central",
            "Cooling": ["Ceiling Fan(s)", "Central Air"],
            "Appliances": null,
            "PoolPrivateYN": "Y",
            "WaterfrontYN": false,
            "Media": [{"MediaURL": "https://img/1.jpg"}, {"MediaURL": "https://img/2.jpg"}],
            "coordinates": {"lat": 30.26, "lng": -97.74},
            "SomethingElse": {"ignored": true}
        }"#;

        let listing: Listing = serde_json::from_str(json).unwrap();

        assert_eq!(listing.listing_key, "abc123");
        assert_eq!(listing.list_price, Some(1_250_000.0));
        assert_eq!(listing.heating.0, vec!["Central".to_string()]);
        assert_eq!(listing.cooling.0.len(), 2);
        assert!(listing.appliances.is_empty());
        assert_eq!(listing.pool_private, Some(YesNo(true)));
        assert_eq!(listing.waterfront, Some(YesNo(false)));
        assert_eq!(listing.image_count(), 2);
        assert_eq!(listing.image_url(1), Some("https://img/2.jpg"));
        assert_eq!(
            listing.coordinates,
            Some(Coordinates {
                lat: 30.26,
                lng: -97.74
            })
        );
    }

    #[test]
    fn key_only_record_is_valid() {
        let listing: Listing = serde_json::from_str(r#"{"ListingKey": "k"}"#).unwrap();
        assert_eq!(listing, Listing::with_key("k"));
        assert!(listing.media.is_empty());
        assert!(!listing.has_financial_data());
    }

    #[test]
    fn null_media_keeps_the_listing() {
        let json = r#"[
            {"ListingKey": "ok"},
            {"ListingKey": "b", "Media": null},
            {"ListingKey": "c", "Media": [{"MediaURL": null}, null, {}, {"MediaURL": "https://img/c.jpg"}]}
        ]"#;

        let listings: Vec<Listing> = serde_json::from_str(json).unwrap();

        assert_eq!(listings.len(), 3);
        assert_eq!(listings[1].image_count(), 0);
        assert_eq!(listings[2].image_count(), 1);
        assert_eq!(listings[2].image_url(0), Some("https://img/c.jpg"));
    }

    #[test]
    fn price_per_sqft_needs_both_values() {
        let mut listing = Listing::with_key("k");
        listing.list_price = Some(500_000.0);
        assert_eq!(listing.price_per_sqft(), None);

        listing.living_area = Some(2_000.0);
        assert_eq!(listing.price_per_sqft(), Some(250));
    }
}
