use maud::{html, Markup};

use super::gallery::{chevron, indicator};
use super::hx_vals;
use crate::domain::format::{format_address, format_price, format_sqft, or_na, truncate_remarks};
use crate::state::gallery::index_indicator;
use crate::state::InfoBox;

const REMARKS_PREVIEW_CHARS: usize = 100;

/// Marker popup. The map script moves it into the provider's info window;
/// clicking anywhere but the arrows opens the full panel.
pub fn info_box(info: &InfoBox) -> Markup {
    let listing = &info.listing;
    let count = listing.image_count();

    html! {
        div id="info-box" class="info-box clickable" data-listing-key=(listing.listing_key) {
            @if let Some(url) = listing.image_url(info.image_index) {
                div class="info-box-image-container" {
                    img class="info-box-image" src=(url) alt="Property";
                    @if count > 1 {
                        button type="button" class="info-box-arrow left" title="Previous image"
                            hx-post="/info-box/step" hx-vals=(hx_vals([("step", "prev".to_string())]))
                        { (chevron(true)) }
                        button type="button" class="info-box-arrow right" title="Next image"
                            hx-post="/info-box/step" hx-vals=(hx_vals([("step", "next".to_string())]))
                        { (chevron(false)) }
                    }
                    @if let Some(ind) = index_indicator(info.image_index, count) {
                        (indicator(ind, "info-box-scroll-indicator"))
                    }
                }
            }
            div class="info-box-content"
                hx-post="/listings/open"
                hx-vals=(hx_vals([("key", listing.listing_key.clone())]))
            {
                h3 { (format_price(listing.list_price)) }
                p class="info-box-address" { (format_address(listing)) }
                p class="info-box-specs" {
                    (or_na(listing.bedrooms_total)) " beds | "
                    (or_na(listing.bathrooms_total)) " baths | "
                    (format_sqft(listing.living_area))
                }
                @if let Some(remarks) = &listing.public_remarks {
                    p class="info-box-remarks" { (truncate_remarks(remarks, REMARKS_PREVIEW_CHARS)) }
                }
            }
        }
    }
}
