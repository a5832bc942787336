//! Transformations between request CRSs and the canonical CRS:84.

use sensor_common::{AxisOrder, BoundingBox, CrsCode, Point, SpatialError, SpatialResult};

use crate::mercator::WebMercator;

/// How the axis order of geographic EPSG codes is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisPolicy {
    /// Follow the EPSG registry (EPSG:4326 is lat/lon).
    #[default]
    Strict,
    /// Always read and write longitude/easting first.
    ForceXY,
}

/// Transforms points and boxes from and into the canonical CRS.
#[derive(Debug, Clone, Default)]
pub struct CrsTransformer {
    policy: AxisPolicy,
    mercator: WebMercator,
}

impl CrsTransformer {
    pub fn new(policy: AxisPolicy) -> Self {
        Self {
            policy,
            mercator: WebMercator::new(),
        }
    }

    pub fn strict() -> Self {
        Self::new(AxisPolicy::Strict)
    }

    pub fn force_xy() -> Self {
        Self::new(AxisPolicy::ForceXY)
    }

    /// Transformer matching a `forceXY` request flag.
    pub fn for_force_xy(force_xy: bool) -> Self {
        if force_xy {
            Self::force_xy()
        } else {
            Self::strict()
        }
    }

    pub fn policy(&self) -> AxisPolicy {
        self.policy
    }

    /// Effective axis order used for coordinates given in `crs`.
    pub fn axis_order(&self, crs: CrsCode) -> AxisOrder {
        match self.policy {
            AxisPolicy::ForceXY => AxisOrder::XY,
            AxisPolicy::Strict => crs.epsg_axis_order(),
        }
    }

    /// Transform a coordinate pair, given in the axis order of `crs`, into a
    /// CRS:84 lon/lat point.
    pub fn to_canonical(&self, coords: Point, source: CrsCode) -> SpatialResult<Point> {
        let (first, second) = match self.axis_order(source) {
            AxisOrder::XY => (coords.x, coords.y),
            AxisOrder::LatLon => (coords.y, coords.x),
        };

        if source.is_geographic() {
            // datum differences between WGS84, ETRS89 and NAD83 stay below
            // the precision filters are evaluated with
            return validate_geographic(Point::new(first, second), source);
        }

        self.mercator
            .projected_to_geo(first, second)
            .map(|(lon, lat)| Point::new(lon, lat))
            .ok_or(SpatialError::OutOfDomain {
                crs: source.to_string(),
                x: first,
                y: second,
            })
    }

    /// Transform a CRS:84 point into `target`, returning coordinates in the
    /// axis order of `target`.
    pub fn from_canonical(&self, point: Point, target: CrsCode) -> SpatialResult<Point> {
        let point = validate_geographic(point, CrsCode::CANONICAL)?;

        let (x, y) = if target.is_geographic() {
            (point.x, point.y)
        } else {
            self.mercator
                .geo_to_projected(point.x, point.y)
                .ok_or_else(|| SpatialError::TransformFailed {
                    target: target.to_string(),
                    message: format!("latitude {} outside projection range", point.y),
                })?
        };

        Ok(match self.axis_order(target) {
            AxisOrder::XY => Point::new(x, y),
            AxisOrder::LatLon => Point::new(y, x),
        })
    }

    /// Transform a box into the canonical CRS. Corners are re-normalized
    /// after the transform.
    pub fn bbox_to_canonical(&self, bbox: &BoundingBox) -> SpatialResult<BoundingBox> {
        if bbox.crs == CrsCode::CANONICAL {
            return Ok(*bbox);
        }
        let ll = self.to_canonical(bbox.lower_left(), bbox.crs)?;
        let ur = self.to_canonical(bbox.upper_right(), bbox.crs)?;
        Ok(BoundingBox::from_corners(ll, ur, CrsCode::CANONICAL))
    }

    /// Transform a canonical box into `target`.
    pub fn bbox_from_canonical(
        &self,
        bbox: &BoundingBox,
        target: CrsCode,
    ) -> SpatialResult<BoundingBox> {
        if target == bbox.crs {
            return Ok(*bbox);
        }
        let ll = self.from_canonical(bbox.lower_left(), target)?;
        let ur = self.from_canonical(bbox.upper_right(), target)?;
        Ok(BoundingBox::from_corners(ll, ur, target))
    }
}

fn validate_geographic(point: Point, crs: CrsCode) -> SpatialResult<Point> {
    let valid = point.x.is_finite()
        && point.y.is_finite()
        && (-180.0..=180.0).contains(&point.x)
        && (-90.0..=90.0).contains(&point.y);
    if valid {
        Ok(point)
    } else {
        Err(SpatialError::OutOfDomain {
            crs: crs.to_string(),
            x: point.x,
            y: point.y,
        })
    }
}
