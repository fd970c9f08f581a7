use serde::Serialize;

use crate::error::SweepError;

use super::grid::{
    CONSUMER_GROUPS_DIMENSION, ConsumerGroups, DURATION_DIMENSION, NUM_PRODUCERS_DIMENSION,
    ParameterGrid, RECORD_SIZE_DIMENSION, THROUGHPUT_DIMENSION, TestIndex,
};

/// Record count sentinel for uncapped tests: "publish until stopped".
const UNCAPPED_RECORD_COUNT: i64 = 2_147_483_647;
/// Byte-rate sentinel for uncapped tests.
const UNCAPPED_RATE: i64 = -1;
/// Topic names encode each dimension name truncated to this many characters.
const MAX_TOPIC_PROPERTY_LEN: usize = 15;

/// Fully resolved configuration for one test: the concrete value of every
/// grid dimension plus the derived job/rate/record quantities the external
/// test runner consumes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterializedParameters {
    pub test_id: u32,
    pub throughput_series_id: u32,
    pub topic_name: String,
    pub depletion_topic_name: String,
    pub cluster_throughput_mb_per_sec: i64,
    pub num_producers: i64,
    pub record_size_byte: i64,
    pub duration_sec: i64,
    pub consumer_groups: ConsumerGroups,
    pub num_jobs: i64,
    pub producer_throughput_byte: i64,
    pub consumer_throughput_byte: i64,
    pub records_per_sec: i64,
    pub num_records_producer: i64,
    pub num_records_consumer: i64,
    /// Dimensions the engine does not interpret, passed through verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Resolves the candidate value of every dimension at `index` and computes
/// the derived quantities. Pure; the only failure mode is a grid that lost a
/// required dimension after validation, which indicates an engine bug.
pub(crate) fn materialize(
    grid: &ParameterGrid,
    index: &TestIndex,
    test_id: u32,
    series_id: u32,
) -> Result<MaterializedParameters, SweepError> {
    let mut throughput_mb = None;
    let mut num_producers = None;
    let mut record_size_byte = None;
    let mut duration_sec = None;
    let mut consumer_groups = None;
    let mut extra = serde_json::Map::new();

    for (position, dimension) in grid.dimensions().iter().enumerate() {
        let slot = index.slot(position).unwrap_or(0);
        let value = dimension.values.get(slot).ok_or_else(|| invariant(
            format!("index slot {slot} out of range for dimension '{}'", dimension.name),
        ))?;

        match dimension.name.as_str() {
            THROUGHPUT_DIMENSION => throughput_mb = value.as_int(),
            NUM_PRODUCERS_DIMENSION => num_producers = value.as_int(),
            RECORD_SIZE_DIMENSION => record_size_byte = value.as_int(),
            DURATION_DIMENSION => duration_sec = value.as_int(),
            CONSUMER_GROUPS_DIMENSION => consumer_groups = value.as_groups(),
            _ => {
                let json = value
                    .to_json()
                    .map_err(|err| invariant(format!("unserializable candidate: {err}")))?;
                extra.insert(dimension.name.clone(), json);
            }
        }
    }

    let throughput_mb = throughput_mb
        .ok_or_else(|| invariant(format!("missing dimension '{THROUGHPUT_DIMENSION}'")))?;
    let num_producers = num_producers
        .ok_or_else(|| invariant(format!("missing dimension '{NUM_PRODUCERS_DIMENSION}'")))?;
    let record_size_byte = record_size_byte
        .ok_or_else(|| invariant(format!("missing dimension '{RECORD_SIZE_DIMENSION}'")))?;
    let duration_sec = duration_sec
        .ok_or_else(|| invariant(format!("missing dimension '{DURATION_DIMENSION}'")))?;
    let consumer_groups = consumer_groups
        .ok_or_else(|| invariant(format!("missing dimension '{CONSUMER_GROUPS_DIMENSION}'")))?;

    let (producer_throughput_byte, consumer_throughput_byte) = if throughput_mb > 0 {
        let cluster_bytes = throughput_mb * 1024 * 1024;
        let consumer_bytes = if consumer_groups.size > 0 {
            cluster_bytes / consumer_groups.size
        } else {
            0
        };
        (cluster_bytes / num_producers, consumer_bytes)
    } else {
        (UNCAPPED_RATE, UNCAPPED_RATE)
    };

    let (num_records_producer, num_records_consumer) = if throughput_mb > 0 {
        (
            producer_throughput_byte * duration_sec / record_size_byte,
            consumer_throughput_byte * duration_sec / record_size_byte,
        )
    } else {
        (UNCAPPED_RECORD_COUNT, UNCAPPED_RECORD_COUNT)
    };

    let records_per_sec = if producer_throughput_byte > 0 {
        (producer_throughput_byte / record_size_byte).max(1)
    } else {
        UNCAPPED_RATE
    };

    Ok(MaterializedParameters {
        test_id,
        throughput_series_id: series_id,
        topic_name: topic_name(grid, index, test_id, series_id),
        depletion_topic_name: depletion_topic_name(test_id, series_id),
        cluster_throughput_mb_per_sec: throughput_mb,
        num_producers,
        record_size_byte,
        duration_sec,
        consumer_groups,
        num_jobs: num_producers + consumer_groups.num_groups * consumer_groups.size,
        producer_throughput_byte,
        consumer_throughput_byte,
        records_per_sec,
        num_records_producer,
        num_records_consumer,
        extra,
    })
}

/// Deterministic topic name encoding the full index: same index, same name.
/// Dimension names are sanitized and truncated because the result feeds an
/// external resource-naming restriction.
fn topic_name(grid: &ParameterGrid, index: &TestIndex, test_id: u32, series_id: u32) -> String {
    let properties: Vec<String> = grid
        .dimensions()
        .iter()
        .enumerate()
        .map(|(position, dimension)| {
            let slot = index.slot(position).unwrap_or(0);
            format!("{}-{slot}", sanitize_property(&dimension.name))
        })
        .collect();

    format!(
        "test-id-{test_id}--throughput-series-id-{series_id}--{}",
        properties.join("--")
    )
}

fn depletion_topic_name(test_id: u32, series_id: u32) -> String {
    format!("test-id-{test_id}--throughput-series-id-{series_id}--depletion")
}

fn sanitize_property(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' {
                ch
            } else {
                '-'
            }
        })
        .take(MAX_TOPIC_PROPERTY_LEN)
        .collect()
}

fn invariant(detail: String) -> SweepError {
    SweepError::GridInvariant { detail }
}
