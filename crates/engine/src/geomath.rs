//! Geodesic distance on the WGS-84 sphere.
//!
//! Haversine with a fixed Earth radius of 6 378 100 m, which is the value
//! the rest of the pipeline was calibrated against. Callers must exclude
//! coordinate-less nodes before asking for distances; there is no sentinel
//! handling here.

use geo::Point;

pub const EARTH_RADIUS_M: f64 = 6_378_100.0;

/// Meters per degree of latitude, taken at its minimum so envelope queries
/// over-approximate rather than miss candidates.
const MIN_METERS_PER_DEGREE: f64 = 110_574.0;

fn hsin(theta: f64) -> f64 {
    (theta / 2.0).sin().powi(2)
}

/// Great-circle distance between two points in meters.
pub fn distance(a: Point<f64>, b: Point<f64>) -> f64 {
    let (la1, lo1) = (a.y().to_radians(), a.x().to_radians());
    let (la2, lo2) = (b.y().to_radians(), b.x().to_radians());

    let h = hsin(la2 - la1) + la1.cos() * la2.cos() * hsin(lo2 - lo1);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Conservative latitude extent (degrees) of a radius in meters.
pub fn lat_degrees(meters: f64) -> f64 {
    meters / MIN_METERS_PER_DEGREE
}

/// Conservative longitude extent (degrees) of a radius in meters at the
/// given latitude. Meridian convergence is clamped so the result stays
/// finite near the poles.
pub fn lon_degrees(meters: f64, at_lat_deg: f64) -> f64 {
    let scale = at_lat_deg.to_radians().cos().abs().max(0.01);
    meters / (MIN_METERS_PER_DEGREE * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_distance_is_symmetric() {
        let a = Point::new(83.0934, 54.7551);
        let b = Point::new(83.1120, 54.7610);

        assert_relative_eq!(distance(a, b), distance(b, a));
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = Point::new(37.6173, 55.7558);
        assert_eq!(distance(p, p), 0.0);
    }

    #[test]
    fn test_one_degree_of_latitude() {
        // One degree of arc along a meridian is R * pi / 180.
        let a = Point::new(0.0, 10.0);
        let b = Point::new(0.0, 11.0);

        let expected = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert_relative_eq!(distance(a, b), expected, max_relative = 1e-9);
    }

    #[test]
    fn test_long_haul_sanity() {
        // NYC to LA is roughly 3 936 km.
        let nyc = Point::new(-74.0060, 40.7128);
        let la = Point::new(-118.2437, 34.0522);

        let dist = distance(nyc, la);
        assert!((dist - 3_936_000.0).abs() < 50_000.0);
    }

    #[test]
    fn test_degree_extents_over_approximate() {
        // 300 m at 55°N must cover at least 300 m in both axes.
        let dlat = lat_degrees(300.0);
        let dlon = lon_degrees(300.0, 55.0);

        let center = Point::new(83.0, 55.0);
        assert!(distance(center, Point::new(83.0, 55.0 + dlat)) >= 300.0);
        assert!(distance(center, Point::new(83.0 + dlon, 55.0)) >= 300.0);
    }
}
