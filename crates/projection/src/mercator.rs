//! Spherical Web Mercator projection (EPSG:3857).
//!
//! Uses the spherical formulas on the WGS84 semi-major axis, which is what
//! EPSG:3857 defines (no ellipsoidal correction).

use std::f64::consts::PI;

/// Web Mercator projection parameters.
#[derive(Debug, Clone)]
pub struct WebMercator {
    /// Sphere radius (meters)
    pub earth_radius: f64,
    /// Latitude limit in degrees where the map becomes square
    pub max_latitude: f64,
}

impl Default for WebMercator {
    fn default() -> Self {
        Self::new()
    }
}

impl WebMercator {
    /// Half the width of the projected world in meters.
    pub const MAX_EXTENT: f64 = 20037508.342789244;

    pub fn new() -> Self {
        Self {
            earth_radius: 6378137.0,
            max_latitude: 85.05112877980659,
        }
    }

    /// Project geographic degrees to meters. Returns `None` outside the
    /// latitude range of the projection.
    pub fn geo_to_projected(&self, lon_deg: f64, lat_deg: f64) -> Option<(f64, f64)> {
        if !(-180.0..=180.0).contains(&lon_deg) || lat_deg.abs() > self.max_latitude + 1e-9 {
            return None;
        }
        let x = self.earth_radius * lon_deg.to_radians();
        let y = self.earth_radius * (PI / 4.0 + lat_deg.to_radians() / 2.0).tan().ln();
        Some((x, y))
    }

    /// Inverse projection from meters to geographic degrees. Returns `None`
    /// for coordinates outside the projected world.
    pub fn projected_to_geo(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let limit = Self::MAX_EXTENT + 1e-6;
        if !x.is_finite() || !y.is_finite() || x.abs() > limit || y.abs() > limit {
            return None;
        }
        let lon = (x / self.earth_radius).to_degrees();
        let lat = (2.0 * (y / self.earth_radius).exp().atan() - PI / 2.0).to_degrees();
        Some((lon, lat))
    }
}
