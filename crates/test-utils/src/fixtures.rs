//! Common test fixtures for the sensor query workspace.
//!
//! This module provides pre-defined request parameters and catalog data
//! that represent typical client requests.

/// Bounding boxes as `minx,miny,maxx,maxy` strings in lon/lat order.
pub mod bbox {
    /// Global bounding box (-180 to 180, -90 to 90)
    pub const GLOBAL: &str = "-180,-90,180,90";

    /// Münsterland, contains the Münster and Dülmen stations
    pub const MUENSTERLAND: &str = "7.0,51.7,7.9,52.2";

    /// North Sea, contains the ship track of the sample catalog
    pub const NORTH_SEA: &str = "3.0,53.5,8.5,56.0";

    /// Southern hemisphere ocean without any sample station
    pub const EMPTY_OCEAN: &str = "-30,-50,-20,-40";

    /// Same as [`MUENSTERLAND`] as a `{ll, ur}` object
    pub const MUENSTERLAND_JSON: &str =
        r#"{"ll":{"type":"Point","coordinates":[7.0,51.7]},"ur":{"type":"Point","coordinates":[7.9,52.2]}}"#;
}

/// Vicinity (`near`) parameter values.
pub mod near {
    /// 10 km around Münster
    pub const MUENSTER_10KM: &str =
        r#"{"center":{"type":"Point","coordinates":[7.6261,51.9607]},"radius":10}"#;

    /// 10 km around Münster, center given in EPSG:4326 lat/lon order
    pub const MUENSTER_10KM_LATLON: &str = r#"{"center":{"x":51.9607,"y":7.6261},"radius":10}"#;
}

/// CRS identifiers.
pub mod crs {
    /// WGS84 with EPSG axis order (lat/lon)
    pub const EPSG_4326: &str = "EPSG:4326";

    /// Web Mercator
    pub const EPSG_3857: &str = "EPSG:3857";

    /// WGS84 with lon/lat order
    pub const CRS_84: &str = "CRS:84";

    /// A valid EPSG code that is not supported
    pub const UNSUPPORTED: &str = "EPSG:31467";
}

/// Query strings of typical requests.
pub mod queries {
    pub const EMPTY: &str = "";
    pub const MOBILE_ONLY: &str = "filter_platform_types=mobile";
    pub const STATIONARY_INSITU_MEASUREMENT: &str =
        "filter_platform_types=stationary,insitu&filter_dataset_types=measurement";
    pub const LEGACY_OFFERING: &str = "offering=5";
    pub const NEGATIVE_LIMIT: &str = "limit=-3";
    pub const PAGED: &str = "offset=1&limit=2";
}

/// Sample deployment defaults in the `config/defaults.yaml` format.
pub const SAMPLE_DEFAULTS_YAML: &str = r#"
locale: en
limit: 100
"#;

/// Sample catalog in the `config/catalog.yaml` format.
///
/// Coordinates are stored as lon/lat in EPSG:4326.
pub const SAMPLE_CATALOG_YAML: &str = r#"
storage_crs: "EPSG:4326"
datasets:
  - id: 1
    domain_id: ts_muenster_temperature
    dataset_type: measurement
    phenomenon: { id: 10, domain_id: air_temperature, label: Air temperature }
    procedure:
      id: 20
      domain_id: thermometer_muenster
      label: Thermometer Münster
      parents:
        - { id: 29, domain_id: dwd_thermometers, label: DWD thermometers }
    offering: { id: 30, domain_id: dwd_observations, label: DWD observations }
    feature:
      id: 40
      domain_id: muenster
      label: Münster
      location: { x: 7.6261, y: 51.9607 }
    category: { id: 50, domain_id: meteorology, label: Meteorology }
    service: { id: 60, domain_id: dwd, label: DWD }
    platform: { id: 70, domain_id: station_muenster, label: Station Münster, mobile: false, insitu: true }

  - id: 2
    domain_id: ts_muenster_humidity
    dataset_type: measurement
    phenomenon: { id: 11, domain_id: relative_humidity, label: Relative humidity }
    procedure: { id: 21, domain_id: hygrometer_muenster, label: Hygrometer Münster }
    offering: { id: 30, domain_id: dwd_observations, label: DWD observations }
    feature:
      id: 40
      domain_id: muenster
      label: Münster
      location: { x: 7.6261, y: 51.9607 }
    category: { id: 50, domain_id: meteorology, label: Meteorology }
    service: { id: 60, domain_id: dwd, label: DWD }
    platform: { id: 70, domain_id: station_muenster, label: Station Münster, mobile: false, insitu: true }

  - id: 3
    domain_id: ts_duelmen_temperature
    dataset_type: measurement
    phenomenon: { id: 10, domain_id: air_temperature, label: Air temperature }
    procedure:
      id: 22
      domain_id: thermometer_duelmen
      label: Thermometer Dülmen
      parents:
        - { id: 29, domain_id: dwd_thermometers, label: DWD thermometers }
    offering: { id: 31, domain_id: lanuv_observations, label: LANUV observations }
    feature:
      id: 41
      domain_id: duelmen
      label: Dülmen
      location: { x: 7.2786, y: 51.8315 }
    category: { id: 50, domain_id: meteorology, label: Meteorology }
    service: { id: 61, domain_id: lanuv, label: LANUV }
    platform: { id: 71, domain_id: station_duelmen, label: Station Dülmen, mobile: false, insitu: true }

  - id: 4
    domain_id: ts_ship_water_temperature
    dataset_type: measurement
    dynamic: true
    phenomenon: { id: 12, domain_id: water_temperature, label: Water temperature }
    procedure: { id: 23, domain_id: ferrybox, label: FerryBox }
    offering: { id: 32, domain_id: ship_observations, label: Ship observations }
    feature:
      id: 42
      domain_id: ship_track_2024
      label: Ship track 2024
      location: { x: 6.1, y: 54.3 }
    category: { id: 51, domain_id: oceanography, label: Oceanography }
    service: { id: 62, domain_id: hzg, label: HZG }
    platform: { id: 72, domain_id: research_vessel, label: Research vessel, mobile: true, insitu: true }

  - id: 5
    domain_id: ts_radar_reflectivity
    dataset_type: profile
    phenomenon: { id: 13, domain_id: reflectivity, label: Reflectivity }
    procedure: { id: 24, domain_id: radar_essen, label: Radar Essen }
    offering: { id: 33, domain_id: radar_products, label: Radar products }
    feature:
      id: 43
      domain_id: essen
      label: Essen
      location: { x: 6.9670, y: 51.4058 }
    category: { id: 50, domain_id: meteorology, label: Meteorology }
    service: { id: 60, domain_id: dwd, label: DWD }
    platform: { id: 73, domain_id: radar_site_essen, label: Radar site Essen, mobile: false, insitu: false }

  - id: 6
    domain_id: ts_muenster_weather_text
    dataset_type: text
    phenomenon: { id: 14, domain_id: weather_report, label: Weather report }
    procedure: { id: 25, domain_id: observer_muenster, label: Observer Münster }
    offering: { id: 30, domain_id: dwd_observations, label: DWD observations }
    feature:
      id: 40
      domain_id: muenster
      label: Münster
      location: { x: 7.6261, y: 51.9607 }
    category: { id: 50, domain_id: meteorology, label: Meteorology }
    service: { id: 60, domain_id: dwd, label: DWD }
    platform: { id: 70, domain_id: station_muenster, label: Station Münster, mobile: false, insitu: true }
"#;
