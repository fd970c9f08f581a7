use crate::error::SpecError;
use crate::sweep::{
    CONSUMER_GROUPS_DIMENSION, DURATION_DIMENSION, Dimension, NUM_PRODUCERS_DIMENSION, ParamValue,
    ParameterGrid, RECORD_SIZE_DIMENSION, SkipCondition, THROUGHPUT_DIMENSION, TestSpec,
};

use super::types::SpecFile;

/// Upper bounds for the interpreted dimensions. Chosen so that the derived
/// byte-rate and record-count products stay well inside `i64`:
/// `throughput * 2^20 * duration` peaks near 1.05e18 against an `i64` max
/// of ~9.2e18.
const MAX_THROUGHPUT_MB_PER_SEC: i64 = 1_000_000;
const MAX_NUM_PRODUCERS: i64 = 1_000_000;
const MAX_RECORD_SIZE_BYTE: i64 = 1_000_000_000;
const MAX_DURATION_SEC: i64 = 1_000_000;
const MAX_GROUP_COUNT: i64 = 1_000_000;
const MAX_DEPLETION_TIMEOUT_HOURS: i64 = 8_760;

/// Validates a raw specification document into the runtime `TestSpec`.
///
/// The grid keeps the document's dimension order; every candidate list must
/// be non-empty, the five dimensions the materializer interprets must be
/// present with usable values, and the skip condition (when given) must
/// compile. Everything is rejected here so the engine itself never sees an
/// invalid grid.
///
/// # Errors
///
/// Returns the first `SpecError` encountered, in document order.
pub(crate) fn validate_spec(file: SpecFile) -> Result<TestSpec, SpecError> {
    let mut dimensions = Vec::with_capacity(file.parameters.len());

    for (name, raw_values) in file.parameters {
        let candidates = raw_values
            .as_array()
            .ok_or_else(|| SpecError::InvalidDimensionValue {
                dimension: name.clone(),
                value: raw_values.to_string(),
            })?;
        if candidates.is_empty() {
            return Err(SpecError::EmptyDimension { name });
        }

        let mut values = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let value: ParamValue = serde_json::from_value(candidate.clone()).map_err(|_| {
                SpecError::InvalidDimensionValue {
                    dimension: name.clone(),
                    value: candidate.to_string(),
                }
            })?;
            check_candidate(&name, &value, candidate)?;
            values.push(value);
        }
        dimensions.push(Dimension { name, values });
    }

    let throughput_pos = position_of(&dimensions, THROUGHPUT_DIMENSION)?;
    position_of(&dimensions, NUM_PRODUCERS_DIMENSION)?;
    position_of(&dimensions, RECORD_SIZE_DIMENSION)?;
    position_of(&dimensions, DURATION_DIMENSION)?;
    position_of(&dimensions, CONSUMER_GROUPS_DIMENSION)?;

    if let Some(depletion) = &file.depletion_configuration {
        if !(1..=MAX_DEPLETION_TIMEOUT_HOURS).contains(&depletion.approximate_timeout_hours) {
            return Err(SpecError::InvalidDepletionTimeout {
                hours: depletion.approximate_timeout_hours,
                max: MAX_DEPLETION_TIMEOUT_HOURS,
            });
        }
    }

    let skip_remaining_throughput = file
        .skip_remaining_throughput
        .as_ref()
        .map(SkipCondition::parse)
        .transpose()?;

    Ok(TestSpec {
        grid: ParameterGrid::new(dimensions, throughput_pos),
        skip_remaining_throughput,
        depletion: file.depletion_configuration,
    })
}

/// Type and range checks for the dimensions the materializer interprets.
fn check_candidate(
    name: &str,
    value: &ParamValue,
    raw: &serde_json::Value,
) -> Result<(), SpecError> {
    let ok = match name {
        // Non-positive throughput is the uncapped sentinel; only the upper
        // bound needs enforcing.
        THROUGHPUT_DIMENSION => value
            .as_int()
            .is_some_and(|v| v <= MAX_THROUGHPUT_MB_PER_SEC),
        NUM_PRODUCERS_DIMENSION => value
            .as_int()
            .is_some_and(|v| (1..=MAX_NUM_PRODUCERS).contains(&v)),
        RECORD_SIZE_DIMENSION => value
            .as_int()
            .is_some_and(|v| (1..=MAX_RECORD_SIZE_BYTE).contains(&v)),
        DURATION_DIMENSION => value
            .as_int()
            .is_some_and(|v| (1..=MAX_DURATION_SEC).contains(&v)),
        CONSUMER_GROUPS_DIMENSION => value.as_groups().is_some_and(|groups| {
            (0..=MAX_GROUP_COUNT).contains(&groups.num_groups)
                && (0..=MAX_GROUP_COUNT).contains(&groups.size)
        }),
        _ => true,
    };

    if ok {
        Ok(())
    } else {
        Err(SpecError::InvalidDimensionValue {
            dimension: name.to_owned(),
            value: raw.to_string(),
        })
    }
}

fn position_of(dimensions: &[Dimension], name: &str) -> Result<usize, SpecError> {
    dimensions
        .iter()
        .position(|dim| dim.name == name)
        .ok_or_else(|| SpecError::MissingDimension {
            name: name.to_owned(),
        })
}
