// src/domain/format.rs

use chrono::{DateTime, NaiveDate};

use super::Listing;

pub const NOT_AVAILABLE: &str = "N/A";

/// Compact price for a map marker, e.g. `$1.3M` or `$850K`.
///
/// Rounds half away from zero, so 1,250,000 reads `$1.3M`.
pub fn format_marker_price(price: Option<f64>) -> String {
    let price = match price {
        Some(p) if p != 0.0 && p.is_finite() => p,
        _ => return NOT_AVAILABLE.to_string(),
    };

    if price >= 1_000_000.0 {
        let tenths = (price / 100_000.0).round() as i64;
        format!("${}.{}M", tenths / 10, tenths % 10)
    } else {
        format!("${}K", (price / 1_000.0).round() as i64)
    }
}

/// Full currency display without cents: `$1,250,000`.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p != 0.0 && p.is_finite() => {
            let whole = p.round() as i64;
            if whole < 0 {
                format!("-${}", group_thousands(whole.unsigned_abs()))
            } else {
                format!("${}", group_thousands(whole as u64))
            }
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `"{number} {street}, {city}, {state} {zip}"`, tolerating any missing part.
pub fn format_address(listing: &Listing) -> String {
    let street = format!(
        "{} {}",
        listing.street_number.as_deref().unwrap_or(""),
        listing.street_name.as_deref().unwrap_or("")
    );
    let city = listing.city.as_deref().unwrap_or("");
    let state = listing.state_or_province.as_deref().unwrap_or("");
    let zip = listing.postal_code.as_deref().unwrap_or("");

    format!("{}, {}, {} {}", street.trim(), city, state, zip)
        .trim()
        .to_string()
}

/// Numeric field or `N/A`. Zero counts as missing, matching how the feed
/// leaves unknown room counts at 0.
pub fn or_na(value: Option<f64>) -> String {
    match value {
        Some(v) if v != 0.0 => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_sqft(area: Option<f64>) -> String {
    match area {
        Some(a) if a != 0.0 => format!("{a} sqft"),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `Mar 5, 2024` from an ISO date or timestamp. `None` when unparsable.
pub fn format_date(raw: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))?;
    Some(date.format("%b %-d, %Y").to_string())
}

/// Remarks cut to `max` characters with an ellipsis.
pub fn truncate_remarks(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_price_millions_and_thousands() {
        assert_eq!(format_marker_price(Some(1_250_000.0)), "$1.3M");
        assert_eq!(format_marker_price(Some(850_000.0)), "$850K");
        assert_eq!(format_marker_price(Some(2_000_000.0)), "$2.0M");
        assert_eq!(format_marker_price(Some(499_499.0)), "$499K");
    }

    #[test]
    fn marker_price_missing_is_na() {
        assert_eq!(format_marker_price(None), "N/A");
        assert_eq!(format_marker_price(Some(0.0)), "N/A");
    }

    #[test]
    fn full_price_is_grouped() {
        assert_eq!(format_price(Some(1_250_000.0)), "$1,250,000");
        assert_eq!(format_price(Some(999.0)), "$999");
        assert_eq!(format_price(Some(1_000.4)), "$1,000");
        assert_eq!(format_price(None), "N/A");
    }

    #[test]
    fn address_tolerates_missing_parts() {
        let mut listing = Listing::with_key("k");
        listing.street_number = Some("12".into());
        listing.street_name = Some("Oak St".into());
        listing.city = Some("Austin".into());
        listing.state_or_province = Some("TX".into());
        listing.postal_code = Some("78704".into());
        assert_eq!(format_address(&listing), "12 Oak St, Austin, TX 78704");

        listing.street_number = None;
        listing.postal_code = None;
        assert_eq!(format_address(&listing), "Oak St, Austin, TX");
    }

    #[test]
    fn counts_fall_back_to_na() {
        assert_eq!(or_na(Some(3.0)), "3");
        assert_eq!(or_na(Some(2.5)), "2.5");
        assert_eq!(or_na(None), "N/A");
        assert_eq!(format_sqft(Some(1800.0)), "1800 sqft");
    }

    #[test]
    fn dates() {
        assert_eq!(format_date("2024-03-05").as_deref(), Some("Mar 5, 2024"));
        assert_eq!(
            format_date("2023-11-20T10:00:00Z").as_deref(),
            Some("Nov 20, 2023")
        );
        assert_eq!(format_date("soon"), None);
    }

    #[test]
    fn remarks_truncate() {
        assert_eq!(truncate_remarks("short", 100), "short");
        assert_eq!(truncate_remarks("abcdef", 3), "abc...");
    }
}
