//! Coordinate Reference System codes and axis order handling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::SpatialError;

/// CRS codes the query API accepts for spatial input.
///
/// All spatial filters are normalized into [`CrsCode::Crs84`] before they
/// are merged or handed to a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CrsCode {
    /// OGC CRS:84, WGS84 with longitude/latitude axis order (canonical)
    #[default]
    Crs84,
    /// WGS84 Geographic (EPSG axis order is lat/lon)
    Epsg4326,
    /// ETRS89 Geographic
    Epsg4258,
    /// NAD83 Geographic
    Epsg4269,
    /// Web Mercator (meters)
    Epsg3857,
}

impl CrsCode {
    /// The canonical CRS all filters are expressed in.
    pub const CANONICAL: CrsCode = CrsCode::Crs84;

    /// Parse a CRS parameter value.
    ///
    /// Accepts formats like:
    /// - "CRS:84", "OGC:CRS84"
    /// - "EPSG:4326", "epsg:3857", "4326"
    /// - "http://www.opengis.net/def/crs/EPSG/0/4326"
    /// - "urn:ogc:def:crs:EPSG::4326"
    pub fn parse(s: &str) -> Result<Self, SpatialError> {
        let normalized = s.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(SpatialError::UnsupportedCrs(s.to_string()));
        }

        if normalized == "CRS:84" || normalized.ends_with("CRS84") {
            return Ok(CrsCode::Crs84);
        }

        let code = if normalized.starts_with("HTTP") {
            normalized.rsplit('/').next().unwrap_or_default()
        } else {
            normalized.rsplit(':').next().unwrap_or_default()
        };

        match code.parse::<u32>() {
            Ok(4326) => Ok(CrsCode::Epsg4326),
            Ok(4258) => Ok(CrsCode::Epsg4258),
            Ok(4269) => Ok(CrsCode::Epsg4269),
            Ok(3857) | Ok(900913) => Ok(CrsCode::Epsg3857),
            _ => Err(SpatialError::UnsupportedCrs(s.to_string())),
        }
    }

    /// EPSG code of the underlying datum/projection.
    pub fn epsg_code(&self) -> u32 {
        match self {
            CrsCode::Crs84 | CrsCode::Epsg4326 => 4326,
            CrsCode::Epsg4258 => 4258,
            CrsCode::Epsg4269 => 4269,
            CrsCode::Epsg3857 => 3857,
        }
    }

    /// Axis order as mandated by the EPSG registry.
    ///
    /// Geographic EPSG codes are latitude first; CRS:84 and projected
    /// systems are easting/longitude first.
    pub fn epsg_axis_order(&self) -> AxisOrder {
        match self {
            CrsCode::Epsg4326 | CrsCode::Epsg4258 | CrsCode::Epsg4269 => AxisOrder::LatLon,
            CrsCode::Crs84 | CrsCode::Epsg3857 => AxisOrder::XY,
        }
    }

    /// Check if this is a geographic (lat/lon) CRS.
    pub fn is_geographic(&self) -> bool {
        !matches!(self, CrsCode::Epsg3857)
    }
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrsCode::Crs84 => write!(f, "CRS:84"),
            other => write!(f, "EPSG:{}", other.epsg_code()),
        }
    }
}

impl FromStr for CrsCode {
    type Err = SpatialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CrsCode::parse(s)
    }
}

impl Serialize for CrsCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CrsCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CrsCode::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Axis order for coordinate interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    /// X (longitude/easting), Y (latitude/northing)
    XY,
    /// Y (latitude/northing), X (longitude/easting)
    LatLon,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crs() {
        assert_eq!(CrsCode::parse("EPSG:4326").unwrap(), CrsCode::Epsg4326);
        assert_eq!(CrsCode::parse("epsg:3857").unwrap(), CrsCode::Epsg3857);
        assert_eq!(CrsCode::parse("EPSG:900913").unwrap(), CrsCode::Epsg3857);
        assert_eq!(CrsCode::parse("CRS:84").unwrap(), CrsCode::Crs84);
        assert_eq!(CrsCode::parse("OGC:CRS84").unwrap(), CrsCode::Crs84);
        assert_eq!(CrsCode::parse("4258").unwrap(), CrsCode::Epsg4258);
        assert!(CrsCode::parse("EPSG:99999").is_err());
        assert!(CrsCode::parse("").is_err());
        assert!(CrsCode::parse("EPSG:abc").is_err());
    }

    #[test]
    fn test_parse_crs_url_and_urn() {
        assert_eq!(
            CrsCode::parse("http://www.opengis.net/def/crs/EPSG/0/4326").unwrap(),
            CrsCode::Epsg4326
        );
        assert_eq!(
            CrsCode::parse("urn:ogc:def:crs:EPSG::3857").unwrap(),
            CrsCode::Epsg3857
        );
        assert_eq!(
            CrsCode::parse("http://www.opengis.net/def/crs/OGC/1.3/CRS84").unwrap(),
            CrsCode::Crs84
        );
    }

    #[test]
    fn test_axis_order() {
        assert_eq!(CrsCode::Epsg4326.epsg_axis_order(), AxisOrder::LatLon);
        assert_eq!(CrsCode::Crs84.epsg_axis_order(), AxisOrder::XY);
        assert_eq!(CrsCode::Epsg3857.epsg_axis_order(), AxisOrder::XY);
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(CrsCode::Crs84.to_string(), "CRS:84");
        assert_eq!(CrsCode::Epsg3857.to_string(), "EPSG:3857");

        let json = serde_json::to_string(&CrsCode::Epsg4326).unwrap();
        assert_eq!(json, "\"EPSG:4326\"");
        let parsed: CrsCode = serde_json::from_str("\"epsg:4269\"").unwrap();
        assert_eq!(parsed, CrsCode::Epsg4269);
    }
}
