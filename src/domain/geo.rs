// src/domain/geo.rs

use super::Coordinates;

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const MILES_PER_KM: f64 = 0.621371;

/// Great-circle distance in kilometres (haversine).
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

pub fn km_to_miles(km: f64) -> f64 {
    km * MILES_PER_KM
}

/// `1.2 mi`, one decimal, half away from zero.
pub fn format_distance(km: f64) -> String {
    let tenths = (km_to_miles(km) * 10.0).round();
    format!("{:.1} mi", tenths / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUSTIN: Coordinates = Coordinates {
        lat: 30.2672,
        lng: -97.7431,
    };

    #[test]
    fn zero_distance_to_self() {
        assert_eq!(haversine_km(AUSTIN, AUSTIN), 0.0);
    }

    #[test]
    fn austin_to_dallas_is_about_300_km() {
        let dallas = Coordinates {
            lat: 32.7767,
            lng: -96.7970,
        };
        let d = haversine_km(AUSTIN, dallas);
        assert!((d - 293.0).abs() < 5.0, "got {d}");
        assert!((haversine_km(dallas, AUSTIN) - d).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude() {
        let north = Coordinates {
            lat: AUSTIN.lat + 1.0,
            lng: AUSTIN.lng,
        };
        let expected = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;
        assert!((haversine_km(AUSTIN, north) - expected).abs() < 1e-6);
    }

    #[test]
    fn distance_is_shown_in_miles() {
        assert_eq!(format_distance(0.5), "0.3 mi");
        assert_eq!(format_distance(1.2), "0.7 mi");
        assert_eq!(format_distance(2.0), "1.2 mi");
        assert_eq!(format_distance(0.0), "0.0 mi");
    }
}
