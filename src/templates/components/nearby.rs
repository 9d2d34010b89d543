use maud::{html, Markup};

use super::controls::loading_indicator;
use super::hx_vals;
use crate::domain::geo::format_distance;
use crate::domain::transit::transit_icon;
use crate::domain::PlaceCategory;
use crate::state::{NearbyPlace, PanelRef, PanelView};

pub fn nearby_section(panel: PanelRef, view: &PanelView) -> Markup {
    let base = format!("/panels/{}/nearby", panel.path_segment());
    let nearby = &view.nearby;
    let category = nearby.category();
    let places = nearby.places();

    html! {
        div class="nearby-places" {
            div class="place-type-tabs" {
                @for option in PlaceCategory::ALL {
                    button type="button"
                        class=(if option == category { "place-type-tab active" } else { "place-type-tab" })
                        hx-post=(base)
                        hx-vals=(hx_vals([("category", option.as_str().to_string())]))
                    { (option.tab_label()) }
                }
            }

            h4 { "Nearby " (category.label()) }

            @if nearby.is_loading() && places.is_empty() {
                (loading_indicator(Some(category.loading_message())))
            }

            @if let Some(error) = nearby.error() {
                div class="error" { "Error: " (error) }
            }

            @if !places.is_empty() {
                div class="place-list" {
                    @for (index, place) in places.iter().enumerate() {
                        (place_item(&base, index, place, category))
                    }

                    @if nearby.is_loading() {
                        div class="loading-more" { "Loading more..." }
                    }

                    @if nearby.can_load_more() {
                        button type="button" class="load-more-button" hx-post=(format!("{base}/more")) {
                            "Load More Results"
                        }
                    }
                }
            } @else if nearby.is_loaded() && nearby.error().is_none() {
                div class="no-results" { (category.no_results_message()) }
            }
        }
    }
}

fn place_item(base: &str, index: usize, nearby: &NearbyPlace, category: PlaceCategory) -> Markup {
    let place = &nearby.place;

    html! {
        div class="place-item" {
            div class="place-header" {
                @if category.is_transit() {
                    div class="name-with-icon" {
                        span class="transit-icon" { (transit_icon(place)) }
                        h4 { (place.name) }
                    }
                } @else {
                    h4 { (place.name) }
                }
                span class="place-distance" { (format_distance(nearby.distance_km)) }
            }
            div class="place-details" {
                @if !category.is_transit() {
                    @match place.rating {
                        Some(rating) => {
                            span class="rating" {
                                (rating) " ★ (" (place.user_ratings_total.unwrap_or(0)) " reviews)"
                            }
                        }
                        None => {
                            span class="no-rating" { "No reviews yet" }
                        }
                    }
                }
                @if let Some(vicinity) = &place.vicinity {
                    p { (vicinity) }
                }
            }
            div class="place-actions" {
                @if place.location().is_some() {
                    button type="button" class="view-on-map-button"
                        hx-post=(format!("{base}/{index}/view"))
                    { "View on map" }
                }
                @if let Some(website) = &place.website {
                    a class="visit-website" href=(website) target="_blank" rel="noopener noreferrer" {
                        "Website"
                    }
                }
            }
        }
    }
}
