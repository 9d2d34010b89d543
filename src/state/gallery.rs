// src/state/gallery.rs
//
// Image index arithmetic for the panel gallery and the info box. The client
// reports raw scroll metrics; everything below turns them into an index.

pub const THUMBNAIL_WIDTH: f64 = 110.0;
pub const THUMBNAIL_GAP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Prev,
    Next,
}

impl Step {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "prev" => Some(Step::Prev),
            "next" => Some(Step::Next),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

impl ScrollDirection {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "left" => Some(ScrollDirection::Left),
            "right" => Some(ScrollDirection::Right),
            _ => None,
        }
    }
}

/// Where the thumbnail strip is scrolled to, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripMetrics {
    pub scroll_left: f64,
    pub client_width: f64,
}

/// Prev/next wrap around both ends.
pub fn step_index(current: usize, step: Step, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    let current = current % count;
    match step {
        Step::Next => (current + 1) % count,
        Step::Prev => (current + count - 1) % count,
    }
}

pub fn clamp_index(index: usize, count: usize) -> usize {
    index.min(count.saturating_sub(1))
}

/// Index of the first thumbnail with more than half its width inside the
/// visible part of the strip. Falls back to 0.
pub fn first_mostly_visible(strip: StripMetrics, count: usize) -> usize {
    let view_left = strip.scroll_left.max(0.0);
    let view_right = view_left + strip.client_width.max(0.0);

    (0..count)
        .find(|&i| {
            let left = i as f64 * (THUMBNAIL_WIDTH + THUMBNAIL_GAP);
            let right = left + THUMBNAIL_WIDTH;
            let visible = right.min(view_right) - left.max(view_left);
            visible > THUMBNAIL_WIDTH / 2.0
        })
        .unwrap_or(0)
}

/// Arrow clicks scroll by one thumbnail; the new first-visible index is
/// predicted from the current one. Clamped, never wraps.
pub fn predict_after_arrow(first_visible: usize, direction: ScrollDirection, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    match direction {
        ScrollDirection::Right => (first_visible + 1).min(count - 1),
        ScrollDirection::Left => first_visible.saturating_sub(1),
    }
}

pub fn strip_width(count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    count as f64 * THUMBNAIL_WIDTH + (count - 1) as f64 * THUMBNAIL_GAP
}

/// Scroll position of the strip that puts `index` at its left edge.
pub fn scroll_offset_for(index: usize) -> f64 {
    index as f64 * (THUMBNAIL_WIDTH + THUMBNAIL_GAP)
}

/// Size and position of a scroll indicator thumb, in percent of its track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollIndicator {
    pub width_pct: f64,
    pub left_pct: f64,
}

/// Indicator for a scrollable strip. `None` when there is nothing to scroll.
pub fn strip_indicator(count: usize, strip: StripMetrics) -> Option<ScrollIndicator> {
    let scroll_width = strip_width(count);
    if count <= 1 || scroll_width <= strip.client_width {
        return None;
    }

    let width_pct = (strip.client_width / scroll_width * 100.0).max(10.0);
    let max_scroll = scroll_width - strip.client_width;
    let ratio = (strip.scroll_left / max_scroll).clamp(0.0, 1.0);

    Some(ScrollIndicator {
        width_pct,
        left_pct: ratio * (100.0 - width_pct),
    })
}

/// Indicator for a one-image-at-a-time view such as the info box.
pub fn index_indicator(index: usize, count: usize) -> Option<ScrollIndicator> {
    if count <= 1 {
        return None;
    }
    let width_pct = (100.0 / count as f64).max(10.0);
    let ratio = clamp_index(index, count) as f64 / (count - 1) as f64;
    Some(ScrollIndicator {
        width_pct,
        left_pct: ratio * (100.0 - width_pct),
    })
}
