//! Great-circle distance for the pharmacy stock search.

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two (latitude, longitude) points, in km.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Distance rounded to two decimals, as shown to the client.
pub fn haversine_km_rounded(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    (haversine_km(lat1, lng1, lat2, lng2) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: (f64, f64) = (48.8566, 2.3522);
    const LYON: (f64, f64) = (45.7640, 4.8357);

    #[test]
    fn identical_points_are_zero() {
        assert_eq!(haversine_km(PARIS.0, PARIS.1, PARIS.0, PARIS.1), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = haversine_km(PARIS.0, PARIS.1, LYON.0, LYON.1);
        let back = haversine_km(LYON.0, LYON.1, PARIS.0, PARIS.1);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn paris_to_lyon_is_about_392_km() {
        let d = haversine_km(PARIS.0, PARIS.1, LYON.0, LYON.1);
        assert!((d - 392.0).abs() < 2.0, "got {d}");
    }

    #[test]
    fn rounding_keeps_two_decimals() {
        let d = haversine_km_rounded(PARIS.0, PARIS.1, LYON.0, LYON.1);
        assert_eq!(d, (d * 100.0).round() / 100.0);
    }
}
