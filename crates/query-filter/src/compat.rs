//! Rewrites legacy request parameters into their current form.
//!
//! Older clients send single valued filters (`procedure=4`), the
//! `station`/`series`/`timeseries` vocabulary, and camel case axis filter
//! names. These are folded into the multi valued parameters before any
//! resolution so nothing downstream special-cases the legacy form.

use tracing::debug;

use crate::filter::{INSITU, MEASUREMENT, STATIONARY};
use crate::parameters::{names, ParameterBag};

/// Legacy parameter name and the parameter it folds into.
const FOLDS: &[(&str, &str)] = &[
    (names::CATEGORY, names::CATEGORIES),
    (names::SERVICE, names::SERVICES),
    (names::OFFERING, names::OFFERINGS),
    (names::PROCEDURE, names::PROCEDURES),
    (names::PHENOMENON, names::PHENOMENA),
    (names::FEATURE, names::FEATURES),
    (names::STATION, names::FEATURES),
    (names::STATIONS, names::FEATURES),
    (names::SERIES, names::DATASETS),
    (names::TIMESERIES, names::DATASETS),
    (names::PLATFORM_TYPES, names::FILTER_PLATFORM_TYPES),
    (names::PLATFORM_GEOMETRIES, names::FILTER_PLATFORM_GEOMETRIES),
    (names::OBSERVED_GEOMETRIES, names::FILTER_OBSERVED_GEOMETRIES),
    (names::VALUE_TYPES, names::FILTER_DATASET_TYPES),
    (names::DATASET_TYPES, names::FILTER_DATASET_TYPES),
];

/// Fold legacy parameters into their current names. Values of the legacy
/// parameter are appended to the values of the current one.
pub fn fold_legacy_parameters(parameters: &ParameterBag) -> ParameterBag {
    let folded = FOLDS
        .iter()
        .fold(parameters.clone(), |bag, (legacy, current)| {
            match bag.nodes(legacy).map(<[_]>::to_vec) {
                Some(nodes) => {
                    debug!(legacy = *legacy, current = *current, "Folding legacy parameter");
                    bag.remove_all_of(legacy).append_to(current, &nodes)
                }
                None => bag,
            }
        });
    fold_result_time(folded)
}

/// Copy the singular `resultTime` into `resultTimes`. The singular stays in
/// place, it is still reported on its own.
fn fold_result_time(parameters: ParameterBag) -> ParameterBag {
    match parameters.nodes(names::RESULT_TIME).map(<[_]>::to_vec) {
        Some(nodes) => parameters.append_to(names::RESULT_TIMES, &nodes),
        None => parameters,
    }
}

/// A request that filters neither platform types nor dataset types.
pub fn is_backwards_compatibility_request(parameters: &ParameterBag) -> bool {
    !(parameters.contains(names::FILTER_PLATFORM_TYPES)
        || parameters.contains(names::FILTER_DATASET_TYPES))
}

/// Apply the implicit filters legacy clients expect: stationary in-situ
/// platforms with measurement datasets.
pub fn ensure_backwards_compatibility(parameters: &ParameterBag) -> ParameterBag {
    if !is_backwards_compatibility_request(parameters) {
        return parameters.clone();
    }
    debug!("Applying implicit stationary insitu measurement filter");
    parameters
        .extend_with(names::FILTER_PLATFORM_TYPES, [STATIONARY, INSITU])
        .extend_with(names::FILTER_DATASET_TYPES, [MEASUREMENT])
}
