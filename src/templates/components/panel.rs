use maud::{html, Markup};

use super::gallery::gallery;
use super::nearby::nearby_section;
use super::{hx_vals, post_button, tag_list};
use crate::domain::format::{format_address, format_date, format_price, format_sqft, or_na};
use crate::domain::{FeatureList, Listing};
use crate::layout::PanelPlacement;
use crate::state::{LivePanel, PanelRef, PanelTab, PanelView, PinnedPanel};

pub fn live_panel(live: &LivePanel, placement: PanelPlacement) -> Markup {
    panel_shell(PanelRef::Live, &live.view, placement, live.is_visible)
}

pub fn pinned_panel(panel: &PinnedPanel, placement: PanelPlacement) -> Markup {
    panel_shell(PanelRef::Pinned(panel.id), &panel.view, placement, true)
}

fn panel_shell(panel: PanelRef, view: &PanelView, placement: PanelPlacement, visible: bool) -> Markup {
    let pinned = matches!(panel, PanelRef::Pinned(_));
    let mut style = format!(
        "right: {}px; width: {}px;",
        placement.right_px, placement.width_px
    );
    if !visible {
        style.push_str(" transform: translateX(100%);");
    }

    let mut class = String::from("listing-panel");
    if pinned {
        class.push_str(" pinned");
    }
    if !view.is_expanded {
        class.push_str(" collapsed");
    }
    if !visible {
        class.push_str(" hidden");
    }

    html! {
        aside id=(panel.dom_id()) class=(class) style=(style) data-listing-key=(view.listing.listing_key) {
            @if !visible {
                (post_button("/panels/live/visibility", "panel-reveal", "Show panel", None, html! { "◀" }))
            }
            (panel_controls(panel, view))
            @if view.is_expanded {
                (expanded_body(panel, view))
            } @else {
                (compact_body(view))
            }
        }
    }
}

fn panel_controls(panel: PanelRef, view: &PanelView) -> Markup {
    let base = format!("/panels/{}", panel.path_segment());
    let expand_title = if view.is_expanded { "Collapse" } else { "Expand" };
    let expand_glyph = if view.is_expanded { "»" } else { "«" };

    html! {
        div class="panel-controls" {
            (post_button(&format!("{base}/expand"), "panel-button", expand_title, None, html! { (expand_glyph) }))
            @match panel {
                PanelRef::Live => {
                    (post_button("/panels/live/pin", "panel-button pin", "Pin", None, html! { "📌" }))
                    (post_button("/panels/live/visibility", "panel-button", "Hide", None, html! { "▶" }))
                }
                PanelRef::Pinned(_) => {
                    (post_button(&format!("{base}/unpin"), "panel-button unpin", "Unpin", None, html! { "📍" }))
                }
            }
            (post_button(&format!("{base}/close"), "panel-button close", "Close", None, html! { "×" }))
        }
    }
}

/// Collapsed panels keep just enough to recognise the listing.
fn compact_body(view: &PanelView) -> Markup {
    let listing = &view.listing;
    html! {
        div class="panel-compact" {
            @if let Some(url) = listing.image_url(0) {
                img class="compact-image" src=(url) alt="Property";
            }
            h3 { (format_price(listing.list_price)) }
            p { (or_na(listing.bedrooms_total)) " bd | " (or_na(listing.bathrooms_total)) " ba" }
        }
    }
}

fn expanded_body(panel: PanelRef, view: &PanelView) -> Markup {
    let listing = &view.listing;
    let base = format!("/panels/{}", panel.path_segment());

    html! {
        div class="panel-content" {
            (gallery(panel, view))

            div class="property-header" {
                h3 class="property-price" { (format_price(listing.list_price)) }
                p class="property-address" { (format_address(listing)) }
                div class="property-primary-details" {
                    span { (or_na(listing.bedrooms_total)) " beds" }
                    span { (or_na(listing.bathrooms_total)) " baths" }
                    span { (format_sqft(listing.living_area)) }
                }
            }

            nav class="panel-tabs" {
                @for tab in PanelTab::ALL {
                    button type="button"
                        class=(if tab == view.tab { "panel-tab active" } else { "panel-tab" })
                        hx-post=(format!("{base}/tab"))
                        hx-vals=(hx_vals([("tab", tab.as_str().to_string())]))
                    { (tab.label()) }
                }
            }

            div class="panel-tab-body" {
                @match view.tab {
                    PanelTab::Details => { (details_tab(listing)) }
                    PanelTab::Amenities => { (amenities_tab(listing)) }
                    PanelTab::Financial => { (financial_tab(listing)) }
                    PanelTab::Nearby => { (nearby_section(panel, view)) }
                }
            }
        }
    }
}

fn detail_item(label: &str, value: Option<String>) -> Markup {
    html! {
        @if let Some(value) = value {
            div class="property-detail-item" {
                span class="detail-label" { (label) ":" }
                span class="detail-value" { (value) }
            }
        }
    }
}

fn joined(list: &FeatureList) -> Option<String> {
    (!list.is_empty()).then(|| list.iter().collect::<Vec<_>>().join(", "))
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn feature_section(title: &str, list: &FeatureList, class: &str) -> Markup {
    html! {
        @if !list.is_empty() {
            div class="property-section" {
                h4 { (title) }
                (tag_list(&list.0, class))
            }
        }
    }
}

fn details_tab(listing: &Listing) -> Markup {
    let closed_on = listing.close_date.as_deref().and_then(format_date);
    let listed_on = listing.list_date.as_deref().and_then(format_date);
    let lot_size = nonzero(listing.lot_size_area).map(|area| {
        format!(
            "{area} {}",
            listing.lot_size_units.as_deref().unwrap_or("sq ft")
        )
    });

    html! {
        div class="property-details" {
            div class="property-status" {
                div class="status-tag" { (listing.standard_status.as_deref().unwrap_or("Active")) }
                @if let Some(date) = closed_on {
                    div class="status-tag sold" { "Sold on " (date) }
                }
                (detail_item("Listed", listed_on))
                (detail_item("Days on Market", listing.days_on_market.filter(|d| *d > 0).map(|d| d.to_string())))
            }

            div class="property-description" {
                h4 { "Description" }
                p { (listing.public_remarks.as_deref().unwrap_or("No description available")) }
            }

            div class="property-section" {
                h4 { "Property Details" }
                div class="details-grid" {
                    (detail_item("Property Type", listing.property_type.clone()))
                    (detail_item("Year Built", listing.year_built.map(|y| y.to_string())))
                    (detail_item("Lot Size", lot_size))
                    (detail_item("Heating", joined(&listing.heating)))
                    (detail_item("Cooling", joined(&listing.cooling)))
                    (detail_item("Parking", nonzero(listing.parking_total).map(|n| format!("{n} spaces"))))
                    (detail_item("Garage", nonzero(listing.garage_spaces).map(|n| format!("{n} cars"))))
                    (detail_item("Stories", nonzero(listing.stories).map(|n| n.to_string())))
                    (detail_item("Fireplaces", nonzero(listing.fireplaces_total).map(|n| n.to_string())))
                    (detail_item("Pool", listing.pool_private.map(|p| (if p.0 { "Yes" } else { "No" }).to_string())))
                }
            }

            (feature_section("Appliances", &listing.appliances, "appliance-tag"))
            (feature_section("Interior Features", &listing.interior_features, "feature-tag"))
            (feature_section("Exterior Features", &listing.exterior_features, "feature-tag"))

            div class="listing-info-footer" {
                @if let Some(id) = &listing.listing_id {
                    p class="listing-id" { "MLS#: " (id) }
                }
                p class="listing-id" { "Listing Key: " (listing.listing_key) }
            }
        }
    }
}

fn hoa_fee(listing: &Listing) -> Option<String> {
    let fee = nonzero(listing.association_fee)?;
    Some(match &listing.association_fee_frequency {
        Some(freq) => format!("{} {freq}", format_price(Some(fee))),
        None => format_price(Some(fee)),
    })
}

fn amenities_tab(listing: &Listing) -> Markup {
    let community = [
        &listing.community_features,
        &listing.security_features,
        &listing.association_amenities,
    ];
    let utility = [
        &listing.utilities,
        &listing.water_source,
        &listing.sewer,
        &listing.heating,
        &listing.cooling,
    ];
    let waterfront = listing.waterfront.map(|w| w.0).unwrap_or(false);

    let has_community = community.iter().any(|l| !l.is_empty()) || hoa_fee(listing).is_some();
    let has_utility = utility.iter().any(|l| !l.is_empty());
    let has_outdoor = !listing.lot_features.is_empty() || !listing.view.is_empty() || waterfront;

    html! {
        div class="amenities-section" {
            h4 { "Amenities and Features" }

            @if !has_community && !has_utility && !has_outdoor {
                p class="no-data" { "No amenity information available" }
            }

            @if has_community {
                div class="amenity-category" {
                    h5 class="category-title" { "Community" }
                    (feature_section("Community Features", &listing.community_features, "amenity-tag"))
                    (feature_section("Security", &listing.security_features, "amenity-tag"))
                    (feature_section("Association Amenities", &listing.association_amenities, "amenity-tag"))
                    (detail_item("HOA Fee", hoa_fee(listing)))
                }
            }

            @if has_utility {
                div class="amenity-category" {
                    h5 class="category-title" { "Utilities" }
                    (feature_section("Utilities", &listing.utilities, "amenity-tag"))
                    (feature_section("Water Source", &listing.water_source, "amenity-tag"))
                    (feature_section("Sewer", &listing.sewer, "amenity-tag"))
                    (feature_section("Heating", &listing.heating, "amenity-tag"))
                    (feature_section("Cooling", &listing.cooling, "amenity-tag"))
                }
            }

            @if has_outdoor {
                div class="amenity-category" {
                    h5 class="category-title" { "Outdoor" }
                    (feature_section("Lot Features", &listing.lot_features, "amenity-tag"))
                    (feature_section("View", &listing.view, "amenity-tag"))
                    @if waterfront {
                        div class="amenity-group" {
                            h5 { "Waterfront" }
                            span class="amenity-tag" { "Yes" }
                            (tag_list(&listing.waterfront_features.0, "amenity-tag"))
                        }
                    }
                }
            }
        }
    }
}

fn financial_tab(listing: &Listing) -> Markup {
    let original = listing
        .original_list_price
        .filter(|p| Some(*p) != listing.list_price);

    html! {
        div class="financial-info-section" {
            h4 { "Financial Information" }
            @if listing.has_financial_data() {
                div class="financial-grid" {
                    (detail_item("List Price", nonzero(listing.list_price).map(|p| format_price(Some(p)))))
                    (detail_item("Close Price", nonzero(listing.close_price).map(|p| format_price(Some(p)))))
                    (detail_item("Original List Price", nonzero(original).map(|p| format_price(Some(p)))))
                    (detail_item("Price/Sq Ft", listing.price_per_sqft().map(|p| format!("${p}"))))
                    (detail_item("Annual Taxes", nonzero(listing.tax_annual_amount).map(|p| format_price(Some(p)))))
                    (detail_item("Tax Year", listing.tax_year.map(|y| y.to_string())))
                    (detail_item("HOA Fees", hoa_fee(listing)))
                }
                @if listing.financing_proposed.is_some() || !listing.financing_available.is_empty() {
                    div class="financing-info" {
                        h5 { "Financing Information" }
                        (detail_item("Financing Proposed", listing.financing_proposed.clone()))
                        @if !listing.financing_available.is_empty() {
                            span class="financial-label" { "Financing Available:" }
                            (tag_list(&listing.financing_available.0, "financing-option"))
                        }
                    }
                }
            } @else {
                p class="no-data" { "No financial information available" }
            }
        }
    }
}
