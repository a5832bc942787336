//! Points and bounding boxes.

use serde::{Deserialize, Serialize};

use crate::crs::CrsCode;
use crate::error::SpatialError;

/// A 2D coordinate in the axis order of its CRS after normalization
/// (x = longitude/easting, y = latitude/northing).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A bounding box with its coordinate reference system.
///
/// Corners are always normalized so that `min_x <= max_x` and
/// `min_y <= max_y`. Operations return new boxes instead of mutating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
    #[serde(default)]
    pub crs: CrsCode,
}

impl BoundingBox {
    /// Create a new bounding box in the canonical CRS.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::from_corners(Point::new(min_x, min_y), Point::new(max_x, max_y), CrsCode::CANONICAL)
    }

    /// Build a box from two arbitrary corners, normalizing per axis.
    pub fn from_corners(a: Point, b: Point, crs: CrsCode) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
            crs,
        }
    }

    /// Parse a "minx,miny,maxx,maxy" string. Surrounding whitespace per
    /// number is ignored; `NaN` and infinities are rejected.
    pub fn from_csv(s: &str, crs: CrsCode) -> Result<Self, SpatialError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(SpatialError::InvalidBbox(s.to_string()));
        }

        let mut values = [0.0; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| SpatialError::InvalidNumber(part.to_string()))?;
        }

        Ok(Self::from_corners(
            Point::new(values[0], values[1]),
            Point::new(values[2], values[3]),
            crs,
        ))
    }

    pub fn lower_left(&self) -> Point {
        Point::new(self.min_x, self.min_y)
    }

    pub fn upper_right(&self) -> Point {
        Point::new(self.max_x, self.max_y)
    }

    /// Width of the bounding box in coordinate units.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in coordinate units.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a point is contained within this bbox (edges inclusive).
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }

    /// Check if this bbox intersects another.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Grow the box so that `point` is included.
    ///
    /// Each axis is extended independently with min/max.
    pub fn extend_by(&self, point: &Point) -> BoundingBox {
        if self.contains(point) {
            return *self;
        }
        BoundingBox {
            min_x: self.min_x.min(point.x),
            min_y: self.min_y.min(point.y),
            max_x: self.max_x.max(point.x),
            max_y: self.max_y.max(point.y),
            crs: self.crs,
        }
    }

    /// Smallest box covering both boxes. Both must share a CRS.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        self.extend_by(&other.lower_left())
            .extend_by(&other.upper_right())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_bbox() {
        let bbox = BoundingBox::from_csv("-125.0,24.0,-66.0,50.0", CrsCode::Crs84).unwrap();
        assert_eq!(bbox.min_x, -125.0);
        assert_eq!(bbox.min_y, 24.0);
        assert_eq!(bbox.max_x, -66.0);
        assert_eq!(bbox.max_y, 50.0);
    }

    #[test]
    fn test_parse_csv_rejects_non_finite() {
        let err = BoundingBox::from_csv("NaN,0,1,1", CrsCode::Crs84).unwrap_err();
        assert_eq!(err, SpatialError::InvalidNumber("NaN".to_string()));
        assert!(BoundingBox::from_csv("0,0,inf,1", CrsCode::Crs84).is_err());
    }

    #[test]
    fn test_from_corners_normalizes() {
        let bbox = BoundingBox::from_corners(
            Point::new(10.0, 10.0),
            Point::new(0.0, 5.0),
            CrsCode::Crs84,
        );
        assert_eq!(bbox.lower_left(), Point::new(0.0, 5.0));
        assert_eq!(bbox.upper_right(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_extend_by_mixed_quadrant() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        let extended = bbox.extend_by(&Point::new(-5.0, 20.0));
        assert_eq!(extended, BoundingBox::new(-5.0, 0.0, 10.0, 20.0));
        // self is untouched
        assert_eq!(bbox, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_union_with_self_is_identity() {
        let bbox = BoundingBox::new(7.0, 51.0, 8.0, 52.0);
        assert_eq!(bbox.union(&bbox), bbox);
    }
}
