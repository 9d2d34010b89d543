use maud::{html, Markup};

use super::hx_vals;
use crate::state::gallery::{scroll_offset_for, strip_indicator, ScrollIndicator, StripMetrics};
use crate::state::{PanelRef, PanelView};

/// Visible width of the thumbnail strip inside an expanded panel.
pub const STRIP_CLIENT_WIDTH: f64 = 460.0;

pub fn chevron(left: bool) -> Markup {
    let points = if left { "15 18 9 12 15 6" } else { "9 18 15 12 9 6" };
    html! {
        svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="#ffffff"
            stroke-width="3" stroke-linecap="round" stroke-linejoin="round"
        {
            polyline points=(points) {}
        }
    }
}

pub fn indicator(ind: ScrollIndicator, class_prefix: &str) -> Markup {
    html! {
        div class=(format!("{class_prefix}-track")) {
            div class=(format!("{class_prefix}-thumb"))
                style=(format!("width: {:.1}%; left: {:.1}%;", ind.width_pct, ind.left_pct)) {}
        }
    }
}

/// Main image with prev/next, then the thumbnail strip.
pub fn gallery(panel: PanelRef, view: &PanelView) -> Markup {
    let base = format!("/panels/{}", panel.path_segment());
    let count = view.image_count();
    let selected = view.selected_image_index;

    let strip_id = format!("thumbs-{}", panel.path_segment());
    let scroll_left = scroll_offset_for(selected);
    let strip = StripMetrics {
        scroll_left,
        client_width: STRIP_CLIENT_WIDTH,
    };
    let strip_vals = |direction: Option<&str>| {
        let dir = direction
            .map(|d| format!("direction: '{d}', "))
            .unwrap_or_default();
        format!(
            "js:{{{dir}scroll_left: document.getElementById('{strip_id}').scrollLeft, \
             client_width: document.getElementById('{strip_id}').clientWidth}}"
        )
    };

    html! {
        div class="image-gallery" {
            @match view.current_image() {
                Some(url) => {
                    div class="main-image-container" {
                        img class="main-image" src=(url) alt="Property";
                        @if count > 1 {
                            button type="button" class="gallery-arrow left" title="Previous image"
                                hx-post=(format!("{base}/image/step"))
                                hx-vals=(hx_vals([("step", "prev".to_string())]))
                            { (chevron(true)) }
                            button type="button" class="gallery-arrow right" title="Next image"
                                hx-post=(format!("{base}/image/step"))
                                hx-vals=(hx_vals([("step", "next".to_string())]))
                            { (chevron(false)) }
                            span class="image-counter" { (selected + 1) " / " (count) }
                        }
                    }
                }
                None => {
                    div class="no-image" { "No images available" }
                }
            }

            @if count > 1 {
                div class="thumbnail-gallery" {
                    button type="button" class="thumbnail-arrow left" title="Scroll left"
                        hx-post=(format!("{base}/thumbnails/scroll"))
                        hx-vals=(strip_vals(Some("left")))
                    { (chevron(true)) }

                    div id=(strip_id) class="thumbnail-strip"
                        data-scroll-left=(scroll_left)
                        hx-post=(format!("{base}/thumbnails/scroll"))
                        hx-trigger="scroll[!this.dataset.restoring] delay:200ms"
                        hx-vals=(strip_vals(None))
                    {
                        @for (i, media) in view.listing.media.iter().enumerate() {
                            button type="button"
                                class=(if i == selected { "thumbnail selected" } else { "thumbnail" })
                                hx-post=(format!("{base}/image"))
                                hx-vals=(hx_vals([("index", i.to_string())]))
                            {
                                img src=(media.media_url) alt=(format!("Thumbnail {}", i + 1)) loading="lazy";
                            }
                        }
                    }

                    button type="button" class="thumbnail-arrow right" title="Scroll right"
                        hx-post=(format!("{base}/thumbnails/scroll"))
                        hx-vals=(strip_vals(Some("right")))
                    { (chevron(false)) }
                }

                @if let Some(ind) = strip_indicator(count, strip) {
                    (indicator(ind, "thumbnail-scroll"))
                }
            }
        }
    }
}
