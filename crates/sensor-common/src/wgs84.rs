//! Spherical WGS84 helpers for vicinity (center + radius) filters.

use crate::bbox::{BoundingBox, Point};
use crate::crs::CrsCode;

/// Mean earth radius in kilometres.
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0;

/// Latitude span in degrees covered by `distance_km` along a meridian.
pub fn latitude_delta(distance_km: f64) -> f64 {
    (distance_km / EARTH_MEAN_RADIUS_KM).to_degrees() % 180.0
}

/// Longitude span in degrees covered by `distance_km` along the circle of
/// latitude `latitude_rad`.
///
/// Returns `None` at the poles where the circle of latitude degenerates.
pub fn longitude_delta(latitude_rad: f64, distance_km: f64) -> Option<f64> {
    let circle_radius = EARTH_MEAN_RADIUS_KM * latitude_rad.cos();
    if circle_radius.abs() < 1e-9 {
        return None;
    }
    Some((distance_km / circle_radius).to_degrees() % 360.0)
}

/// Bounding box in CRS:84 around a circle of `radius_km` centered at
/// `center` (lon/lat degrees).
///
/// Latitudes are clamped to [-90, 90]. When the circle reaches a pole or
/// wraps over the antimeridian the box spans all longitudes.
pub fn vicinity_bounds(center: Point, radius_km: f64) -> BoundingBox {
    let lat_delta = latitude_delta(radius_km);
    let min_y = (center.y - lat_delta).max(-90.0);
    let max_y = (center.y + lat_delta).min(90.0);

    let full_longitudes = BoundingBox::from_corners(
        Point::new(-180.0, min_y),
        Point::new(180.0, max_y),
        CrsCode::Crs84,
    );

    if min_y <= -90.0 || max_y >= 90.0 {
        return full_longitudes;
    }

    match longitude_delta(center.y.to_radians(), radius_km) {
        Some(lon_delta) if lon_delta < 180.0 => {
            let min_x = center.x - lon_delta;
            let max_x = center.x + lon_delta;
            if min_x < -180.0 || max_x > 180.0 {
                return full_longitudes;
            }
            BoundingBox::from_corners(
                Point::new(min_x, min_y),
                Point::new(max_x, max_y),
                CrsCode::Crs84,
            )
        }
        _ => full_longitudes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_delta_one_degree() {
        // one degree of latitude is roughly 111.19 km on the mean sphere
        let delta = latitude_delta(111.19);
        assert!((delta - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_longitude_delta_widens_towards_poles() {
        let equator = longitude_delta(0.0, 100.0).unwrap();
        let sixty = longitude_delta(60f64.to_radians(), 100.0).unwrap();
        assert!((sixty - 2.0 * equator).abs() < 1e-6);
        assert!(longitude_delta(90f64.to_radians(), 100.0).is_none());
    }

    #[test]
    fn test_vicinity_bounds_symmetric_around_center() {
        let bbox = vicinity_bounds(Point::new(7.6, 51.9), 10.0);
        assert!(bbox.contains(&Point::new(7.6, 51.9)));
        assert!(((bbox.min_x + bbox.max_x) / 2.0 - 7.6).abs() < 1e-9);
        assert!(((bbox.min_y + bbox.max_y) / 2.0 - 51.9).abs() < 1e-9);
        assert!(bbox.width() > bbox.height());
    }

    #[test]
    fn test_vicinity_bounds_zero_radius() {
        let bbox = vicinity_bounds(Point::new(7.6, 51.9), 0.0);
        assert_eq!(bbox.lower_left(), Point::new(7.6, 51.9));
        assert_eq!(bbox.upper_right(), Point::new(7.6, 51.9));
    }

    #[test]
    fn test_vicinity_bounds_across_antimeridian() {
        let bbox = vicinity_bounds(Point::new(179.9, 0.0), 50.0);
        assert_eq!(bbox.min_x, -180.0);
        assert_eq!(bbox.max_x, 180.0);
    }

    #[test]
    fn test_vicinity_bounds_touching_pole() {
        let bbox = vicinity_bounds(Point::new(0.0, 89.9), 50.0);
        assert_eq!(bbox.max_y, 90.0);
        assert_eq!(bbox.min_x, -180.0);
        assert_eq!(bbox.max_x, 180.0);
    }
}
