//! Axis filter resolution.
//!
//! Requests narrow the selected platforms along independent two-valued axes:
//!
//! - mobility: `stationary` / `mobile`
//! - sensing mode: `insitu` / `remote`
//! - platform geometry: `site` / `track`
//! - observed geometry: `static` / `dynamic`
//!
//! A value of an axis is included unless the request explicitly narrowed the
//! axis to the opposite value. The `all` token selects every value of its
//! parameter. The state types here are plain `Copy` values so the truth
//! tables can be evaluated without building a whole request.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::parameters::{names, ParameterBag, ALL_TOKEN};

pub const STATIONARY: &str = "stationary";
pub const MOBILE: &str = "mobile";
pub const INSITU: &str = "insitu";
pub const REMOTE: &str = "remote";
pub const SITE: &str = "site";
pub const TRACK: &str = "track";
pub const STATIC: &str = "static";
pub const DYNAMIC: &str = "dynamic";

/// Dataset type implied for requests of legacy clients.
pub const MEASUREMENT: &str = "measurement";

/// Which platform type tokens a request carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformTypeState {
    pub stationary_set: bool,
    pub mobile_set: bool,
    pub insitu_set: bool,
    pub remote_set: bool,
    /// Any token was given.
    pub filter_set: bool,
    /// The `all` token was given.
    pub all_set: bool,
}

impl PlatformTypeState {
    pub fn from_values(values: &BTreeSet<String>) -> Self {
        let all_set = values.contains(ALL_TOKEN);
        let has = |token: &str| all_set || values.contains(token);
        Self {
            stationary_set: has(STATIONARY),
            mobile_set: has(MOBILE),
            insitu_set: has(INSITU),
            remote_set: has(REMOTE),
            filter_set: !values.is_empty(),
            all_set,
        }
    }

    pub fn from_parameters(parameters: &ParameterBag) -> Self {
        Self::from_values(&parameters.get_values_of(names::FILTER_PLATFORM_TYPES))
    }

    pub fn shall_include_all(&self) -> bool {
        !self.filter_set || self.all_set
    }

    pub fn shall_include_stationary(&self) -> bool {
        self.shall_include_all() || self.stationary_set || !self.mobile_set
    }

    pub fn shall_include_mobile(&self) -> bool {
        self.shall_include_all() || self.mobile_set || !self.stationary_set
    }

    pub fn shall_include_insitu(&self) -> bool {
        self.shall_include_all() || self.insitu_set || !self.remote_set
    }

    pub fn shall_include_remote(&self) -> bool {
        self.shall_include_all() || self.remote_set || !self.insitu_set
    }

    /// Resolve the inclusion flags handed to the storage layer.
    pub fn resolve(&self) -> PlatformTypeFilter {
        PlatformTypeFilter {
            include_all: self.shall_include_all(),
            include_stationary: self.shall_include_stationary(),
            include_mobile: self.shall_include_mobile(),
            include_insitu: self.shall_include_insitu(),
            include_remote: self.shall_include_remote(),
        }
    }
}

/// Which geometry tokens a request carries, for both geometry parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryAxisState {
    pub site_set: bool,
    pub track_set: bool,
    pub platform_geometries_set: bool,
    pub platform_geometries_all: bool,
    pub static_set: bool,
    pub dynamic_set: bool,
    pub observed_geometries_set: bool,
    pub observed_geometries_all: bool,
}

impl GeometryAxisState {
    pub fn from_values(
        platform_geometries: &BTreeSet<String>,
        observed_geometries: &BTreeSet<String>,
    ) -> Self {
        let platform_all = platform_geometries.contains(ALL_TOKEN);
        let observed_all = observed_geometries.contains(ALL_TOKEN);
        Self {
            site_set: platform_all || platform_geometries.contains(SITE),
            track_set: platform_all || platform_geometries.contains(TRACK),
            platform_geometries_set: !platform_geometries.is_empty(),
            platform_geometries_all: platform_all,
            static_set: observed_all || observed_geometries.contains(STATIC),
            dynamic_set: observed_all || observed_geometries.contains(DYNAMIC),
            observed_geometries_set: !observed_geometries.is_empty(),
            observed_geometries_all: observed_all,
        }
    }

    pub fn from_parameters(parameters: &ParameterBag) -> Self {
        Self::from_values(
            &parameters.get_values_of(names::FILTER_PLATFORM_GEOMETRIES),
            &parameters.get_values_of(names::FILTER_OBSERVED_GEOMETRIES),
        )
    }

    pub fn shall_include_all_platform_geometries(&self) -> bool {
        !self.platform_geometries_set || self.platform_geometries_all
    }

    pub fn shall_include_all_observed_geometries(&self) -> bool {
        !self.observed_geometries_set || self.observed_geometries_all
    }
}

/// Dataset type tokens of a request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetTypeFilter {
    types: BTreeSet<String>,
}

impl DatasetTypeFilter {
    pub fn from_values(types: BTreeSet<String>) -> Self {
        Self { types }
    }

    pub fn from_parameters(parameters: &ParameterBag) -> Self {
        Self::from_values(parameters.get_values_of(names::FILTER_DATASET_TYPES))
    }

    pub fn is_set(&self) -> bool {
        !self.types.is_empty()
    }

    pub fn types(&self) -> &BTreeSet<String> {
        &self.types
    }

    pub fn shall_include_all(&self) -> bool {
        !self.is_set() || self.types.contains(ALL_TOKEN)
    }

    pub fn shall_include(&self, dataset_type: &str) -> bool {
        let dataset_type = dataset_type.to_lowercase();
        self.types.contains(&dataset_type) || self.types.contains(ALL_TOKEN)
    }
}

/// Answers "shall axis value X be included" for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterResolver {
    platform_types: PlatformTypeState,
    geometries: GeometryAxisState,
    dataset_types: DatasetTypeFilter,
}

impl FilterResolver {
    pub fn new(
        platform_types: PlatformTypeState,
        geometries: GeometryAxisState,
        dataset_types: DatasetTypeFilter,
    ) -> Self {
        Self {
            platform_types,
            geometries,
            dataset_types,
        }
    }

    pub fn from_parameters(parameters: &ParameterBag) -> Self {
        Self::new(
            PlatformTypeState::from_parameters(parameters),
            GeometryAxisState::from_parameters(parameters),
            DatasetTypeFilter::from_parameters(parameters),
        )
    }

    pub fn platform_types(&self) -> PlatformTypeState {
        self.platform_types
    }

    pub fn geometries(&self) -> GeometryAxisState {
        self.geometries
    }

    pub fn dataset_types(&self) -> &DatasetTypeFilter {
        &self.dataset_types
    }

    /// Neither platform types nor dataset types were filtered.
    pub fn shall_behave_backwards_compatible(&self) -> bool {
        !(self.platform_types.filter_set || self.dataset_types.is_set())
    }

    pub fn shall_include_all_platform_types(&self) -> bool {
        self.platform_types.shall_include_all()
    }

    pub fn shall_include_stationary_platform_types(&self) -> bool {
        self.platform_types.shall_include_stationary()
    }

    pub fn shall_include_mobile_platform_types(&self) -> bool {
        self.platform_types.shall_include_mobile()
    }

    pub fn shall_include_insitu_platform_types(&self) -> bool {
        self.platform_types.shall_include_insitu()
    }

    pub fn shall_include_remote_platform_types(&self) -> bool {
        self.platform_types.shall_include_remote()
    }

    pub fn shall_include_platform_geometries_site(&self) -> bool {
        let pt = &self.platform_types;
        let geo = &self.geometries;
        geo.shall_include_all_platform_geometries()
            && pt.shall_include_all()
            && !geo.observed_geometries_set
            && !pt.mobile_set
            && !pt.remote_set
            || pt.stationary_set
            || pt.insitu_set
            || geo.site_set
    }

    pub fn shall_include_platform_geometries_track(&self) -> bool {
        let pt = &self.platform_types;
        let geo = &self.geometries;
        geo.shall_include_all_platform_geometries()
            && pt.shall_include_all()
            && !geo.observed_geometries_set
            && !pt.stationary_set
            && !pt.remote_set
            || pt.mobile_set
            || pt.insitu_set
            || geo.track_set
    }

    pub fn shall_include_observed_geometries_static(&self) -> bool {
        let pt = &self.platform_types;
        let geo = &self.geometries;
        geo.shall_include_all_observed_geometries() && pt.shall_include_all()
            || geo.static_set
            || !geo.dynamic_set && !pt.insitu_set
    }

    pub fn shall_include_observed_geometries_dynamic(&self) -> bool {
        let pt = &self.platform_types;
        let geo = &self.geometries;
        geo.shall_include_all_observed_geometries() && pt.shall_include_all()
            || geo.dynamic_set
            || !geo.static_set && !pt.insitu_set
    }

    pub fn shall_include_all_dataset_types(&self) -> bool {
        self.dataset_types.shall_include_all()
    }

    pub fn shall_include_dataset_type(&self, dataset_type: &str) -> bool {
        self.dataset_types.shall_include(dataset_type)
    }

    pub fn platform_type_filter(&self) -> PlatformTypeFilter {
        self.platform_types.resolve()
    }

    pub fn geometry_filter(&self) -> GeometryFilter {
        GeometryFilter {
            include_site: self.shall_include_platform_geometries_site(),
            include_track: self.shall_include_platform_geometries_track(),
            include_static: self.shall_include_observed_geometries_static(),
            include_dynamic: self.shall_include_observed_geometries_dynamic(),
        }
    }
}

/// Resolved platform type inclusion flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformTypeFilter {
    pub include_all: bool,
    pub include_stationary: bool,
    pub include_mobile: bool,
    pub include_insitu: bool,
    pub include_remote: bool,
}

impl Default for PlatformTypeFilter {
    fn default() -> Self {
        PlatformTypeState::default().resolve()
    }
}

impl PlatformTypeFilter {
    /// Whether a platform with the given flags passes the filter.
    pub fn admits(&self, mobile: bool, insitu: bool) -> bool {
        if self.include_all {
            return true;
        }
        let mobility = if mobile {
            self.include_mobile
        } else {
            self.include_stationary
        };
        let sensing = if insitu {
            self.include_insitu
        } else {
            self.include_remote
        };
        mobility && sensing
    }
}

/// Resolved geometry inclusion flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryFilter {
    pub include_site: bool,
    pub include_track: bool,
    pub include_static: bool,
    pub include_dynamic: bool,
}

impl GeometryFilter {
    /// Platform geometry check: stationary platforms report sites, mobile
    /// platforms tracks.
    pub fn admits_platform(&self, mobile: bool) -> bool {
        if mobile {
            self.include_track
        } else {
            self.include_site
        }
    }

    pub fn admits_observation(&self, dynamic: bool) -> bool {
        if dynamic {
            self.include_dynamic
        } else {
            self.include_static
        }
    }
}
