//! Platform types and type-prefixed platform ids.
//!
//! Platforms are exposed with ids of the form `<type>_<id>`, e.g.
//! `stationary_insitu_42`. Stationary platforms are backed by features,
//! mobile platforms by platform entities.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformType {
    StationaryInsitu,
    StationaryRemote,
    MobileInsitu,
    MobileRemote,
}

impl PlatformType {
    pub const ALL: [PlatformType; 4] = [
        PlatformType::StationaryInsitu,
        PlatformType::StationaryRemote,
        PlatformType::MobileInsitu,
        PlatformType::MobileRemote,
    ];

    pub fn from_flags(mobile: bool, insitu: bool) -> Self {
        match (mobile, insitu) {
            (false, true) => PlatformType::StationaryInsitu,
            (false, false) => PlatformType::StationaryRemote,
            (true, true) => PlatformType::MobileInsitu,
            (true, false) => PlatformType::MobileRemote,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformType::StationaryInsitu => "stationary_insitu",
            PlatformType::StationaryRemote => "stationary_remote",
            PlatformType::MobileInsitu => "mobile_insitu",
            PlatformType::MobileRemote => "mobile_remote",
        }
    }

    pub fn is_stationary(&self) -> bool {
        matches!(
            self,
            PlatformType::StationaryInsitu | PlatformType::StationaryRemote
        )
    }

    pub fn is_mobile(&self) -> bool {
        !self.is_stationary()
    }

    pub fn is_insitu(&self) -> bool {
        matches!(self, PlatformType::StationaryInsitu | PlatformType::MobileInsitu)
    }

    /// Prefix `id` with this type.
    pub fn create_id(&self, id: impl fmt::Display) -> String {
        format!("{}_{}", self.as_str(), id)
    }

    /// The type encoded in the prefix of `id`, if any.
    pub fn of_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| {
            let prefix = t.as_str();
            id.len() > prefix.len()
                && id.as_bytes()[prefix.len()] == b'_'
                && id
                    .get(..prefix.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
        })
    }

    /// Strip a known type prefix. Ids without a known prefix are returned
    /// unchanged.
    pub fn extract_id(id: &str) -> &str {
        match Self::of_id(id) {
            Some(t) => &id[t.as_str().len() + 1..],
            None => id,
        }
    }

    pub fn is_stationary_id(id: &str) -> bool {
        Self::of_id(id).is_some_and(|t| t.is_stationary())
    }

    pub fn is_mobile_id(id: &str) -> bool {
        Self::of_id(id).is_some_and(|t| t.is_mobile())
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
