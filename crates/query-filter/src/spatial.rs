//! Spatial filter resolution.
//!
//! A request may restrict results with a bounding box (`bbox`), a vicinity
//! (`near`: center point plus radius in kilometres) or both. Input
//! coordinates are given in the CRS named by `crs` and transformed into
//! CRS:84 before use; the axis order follows `forceXY`. When both parameters
//! are present the resolved filter is the extent covering both.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use projection::CrsTransformer;
use sensor_common::{wgs84, BoundingBox, CrsCode, Point};

use crate::errors::ParameterError;
use crate::parameters::{names, ParameterBag};

/// Point notation accepted inside `bbox` and `near` objects.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum PointInput {
    GeoJson {
        #[serde(rename = "type")]
        type_: String,
        coordinates: Vec<f64>,
    },
    Xy {
        x: f64,
        y: f64,
    },
}

impl PointInput {
    fn to_point(&self, param: &str) -> Result<Point, ParameterError> {
        match self {
            PointInput::Xy { x, y } => Ok(Point::new(*x, *y)),
            PointInput::GeoJson { type_, coordinates } => {
                if !type_.eq_ignore_ascii_case("point") {
                    return Err(malformed(param, format!("expected a Point, got {type_}")));
                }
                match coordinates.as_slice() {
                    [x, y, ..] => Ok(Point::new(*x, *y)),
                    _ => Err(malformed(param, "a point needs two coordinates")),
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct BboxInput {
    ll: PointInput,
    ur: PointInput,
}

#[derive(Debug, Deserialize)]
struct VicinityInput {
    center: PointInput,
    radius: Value,
}

/// A circle around a canonical center point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vicinity {
    pub center: Point,
    pub radius_km: f64,
}

impl Vicinity {
    pub fn new(center: Point, radius_km: f64) -> Self {
        Self { center, radius_km }
    }

    /// Bounding box in CRS:84 enclosing the circle.
    pub fn bounds(&self) -> BoundingBox {
        wgs84::vicinity_bounds(self.center, self.radius_km)
    }
}

/// Resolves `bbox` and `near` into one canonical bounding box.
#[derive(Debug, Clone)]
pub struct SpatialFilterResolver {
    crs: CrsCode,
    crs_given: bool,
    transformer: CrsTransformer,
}

impl SpatialFilterResolver {
    pub fn from_parameters(parameters: &ParameterBag) -> Result<Self, ParameterError> {
        let crs_given = parameters.contains(names::CRS);
        let crs = CrsCode::parse(&parameters.crs())?;
        let transformer = CrsTransformer::for_force_xy(parameters.is_force_xy()?);
        Ok(Self {
            crs,
            crs_given,
            transformer,
        })
    }

    pub fn crs(&self) -> CrsCode {
        self.crs
    }

    /// Merged spatial filter, or `None` when neither parameter is given.
    pub fn resolve(&self, parameters: &ParameterBag) -> Result<Option<BoundingBox>, ParameterError> {
        let bbox = match parameters.get_string(names::BBOX) {
            Some(raw) => Some(self.parse_bbox(&raw)?),
            None => None,
        };
        let vicinity = match parameters.get_string(names::NEAR) {
            Some(raw) => Some(self.parse_vicinity(&raw)?.bounds()),
            None => None,
        };

        let merged = merge(bbox, vicinity);
        if let Some(bounds) = &merged {
            debug!(
                min_x = bounds.min_x,
                min_y = bounds.min_y,
                max_x = bounds.max_x,
                max_y = bounds.max_y,
                "Resolved spatial filter"
            );
        }
        Ok(merged)
    }

    /// Parse a `{ll, ur}` object or a `minx,miny,maxx,maxy` list into a
    /// canonical box.
    pub fn parse_bbox(&self, raw: &str) -> Result<BoundingBox, ParameterError> {
        let raw = raw.trim();
        let (ll, ur) = if raw.starts_with('{') {
            let input: BboxInput = parse_json(names::BBOX, raw)?;
            (input.ll.to_point(names::BBOX)?, input.ur.to_point(names::BBOX)?)
        } else {
            let csv = BoundingBox::from_csv(raw, self.crs)?;
            (csv.lower_left(), csv.upper_right())
        };

        let ll = self.transformer.to_canonical(ll, self.crs)?;
        let ur = self.transformer.to_canonical(ur, self.crs)?;
        Ok(BoundingBox::from_corners(ll, ur, CrsCode::CANONICAL))
    }

    /// Parse a `{center, radius}` object. The center is transformed only when
    /// a `crs` parameter was given.
    pub fn parse_vicinity(&self, raw: &str) -> Result<Vicinity, ParameterError> {
        let input: VicinityInput = parse_json(names::NEAR, raw.trim())?;
        let radius_km = parse_radius(&input.radius)?;

        let center = input.center.to_point(names::NEAR)?;
        let center = if self.crs_given {
            self.transformer.to_canonical(center, self.crs)?
        } else {
            self.transformer.to_canonical(center, CrsCode::CANONICAL)?
        };
        Ok(Vicinity::new(center, radius_km))
    }
}

/// Union extent of the given boxes.
pub fn merge(bbox: Option<BoundingBox>, vicinity: Option<BoundingBox>) -> Option<BoundingBox> {
    match (bbox, vicinity) {
        (Some(a), Some(b)) => Some(a.union(&b)),
        (a, b) => a.or(b),
    }
}

fn parse_json<T: for<'de> Deserialize<'de>>(param: &str, raw: &str) -> Result<T, ParameterError> {
    serde_json::from_str(raw).map_err(|e| ParameterError::InvalidJson {
        param: param.to_string(),
        message: e.to_string(),
    })
}

fn parse_radius(value: &Value) -> Result<f64, ParameterError> {
    let radius = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match radius {
        Some(r) if r.is_finite() && r >= 0.0 => Ok(r),
        _ => Err(ParameterError::InvalidRadius(value.to_string())),
    }
}

fn malformed(param: &str, message: impl Into<String>) -> ParameterError {
    ParameterError::Malformed {
        param: param.to_string(),
        message: message.into(),
    }
}
