use tempfile::tempdir;

use super::{load_spec_file, validate_spec};
use crate::error::{AppError, SpecError};
use crate::sweep::{ConsumerGroups, ParamValue, SkipCondition, THROUGHPUT_DIMENSION};

fn write_spec(name: &str, content: &str) -> Result<(tempfile::TempDir, std::path::PathBuf), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join(name);
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;
    Ok((dir, path))
}

#[test]
fn parse_json_spec_preserves_dimension_order() -> Result<(), String> {
    let content = r#"{
  "parameters": {
    "cluster_throughput_mb_per_sec": [16, 24, 32],
    "num_producers": [2, 6],
    "record_size_byte": [1024],
    "duration_sec": [300],
    "consumer_groups": [{ "num_groups": 1, "size": 6 }],
    "num_partitions": [6, 12]
  },
  "skip_remaining_throughput": { "less-than": ["sent_div_requested_mb_per_sec", 0.99] },
  "depletion_configuration": { "approximate_timeout_hours": 1 }
}"#;
    let (_dir, path) = write_spec("suite.json", content)?;
    let file = load_spec_file(&path).map_err(|err| err.to_string())?;
    let spec = validate_spec(file).map_err(|err| err.to_string())?;

    let names: Vec<&str> = spec
        .grid
        .dimensions()
        .iter()
        .map(|dim| dim.name.as_str())
        .collect();
    if names
        != [
            "cluster_throughput_mb_per_sec",
            "num_producers",
            "record_size_byte",
            "duration_sec",
            "consumer_groups",
            "num_partitions",
        ]
    {
        return Err(format!("Dimension order not preserved: {:?}", names));
    }
    if spec.grid.throughput_position() != 0 {
        return Err("Throughput dimension must be at position 0".to_owned());
    }
    if spec.grid.combination_count() != 3 * 2 * 2 {
        return Err(format!(
            "Expected 12 combinations, got {}",
            spec.grid.combination_count()
        ));
    }
    match spec.skip_remaining_throughput {
        Some(SkipCondition::LessThan(_, _)) => {}
        Some(ref other) => return Err(format!("Unexpected condition: {:?}", other)),
        None => return Err("Expected a skip condition".to_owned()),
    }
    let depletion = spec.depletion.ok_or("Expected depletion configuration")?;
    if depletion.approximate_timeout_hours != 1 {
        return Err("Unexpected depletion timeout".to_owned());
    }
    Ok(())
}

#[test]
fn parse_toml_spec() -> Result<(), String> {
    let content = r#"
[parameters]
cluster_throughput_mb_per_sec = [8, 16]
num_producers = [2]
record_size_byte = [512]
duration_sec = [60]
consumer_groups = [{ num_groups = 2, size = 3 }]

[depletion_configuration]
approximate_timeout_hours = 2
"#;
    let (_dir, path) = write_spec("suite.toml", content)?;
    let file = load_spec_file(&path).map_err(|err| err.to_string())?;
    let spec = validate_spec(file).map_err(|err| err.to_string())?;

    if spec.grid.combination_count() != 2 {
        return Err(format!(
            "Expected 2 combinations, got {}",
            spec.grid.combination_count()
        ));
    }
    let groups_dim = spec
        .grid
        .dimensions()
        .iter()
        .find(|dim| dim.name == "consumer_groups")
        .ok_or("Missing consumer_groups dimension")?;
    match groups_dim.values.first() {
        Some(ParamValue::Groups(ConsumerGroups {
            num_groups: 2,
            size: 3,
        })) => Ok(()),
        Some(other) => Err(format!("Unexpected consumer_groups value: {:?}", other)),
        None => Err("Empty consumer_groups dimension".to_owned()),
    }
}

#[test]
fn empty_candidate_list_is_rejected() -> Result<(), String> {
    let content = r#"{
  "parameters": {
    "cluster_throughput_mb_per_sec": [],
    "num_producers": [1],
    "record_size_byte": [1024],
    "duration_sec": [60],
    "consumer_groups": [{ "num_groups": 1, "size": 1 }]
  }
}"#;
    let (_dir, path) = write_spec("empty.json", content)?;
    let file = load_spec_file(&path).map_err(|err| err.to_string())?;
    match validate_spec(file) {
        Err(SpecError::EmptyDimension { name }) if name == THROUGHPUT_DIMENSION => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected EmptyDimension".to_owned()),
    }
}

#[test]
fn missing_required_dimension_is_rejected() -> Result<(), String> {
    let content = r#"{
  "parameters": {
    "cluster_throughput_mb_per_sec": [10],
    "num_producers": [1],
    "record_size_byte": [1024],
    "duration_sec": [60]
  }
}"#;
    let (_dir, path) = write_spec("missing.json", content)?;
    let file = load_spec_file(&path).map_err(|err| err.to_string())?;
    match validate_spec(file) {
        Err(SpecError::MissingDimension { name }) if name == "consumer_groups" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected MissingDimension".to_owned()),
    }
}

#[test]
fn non_positive_producer_count_is_rejected() -> Result<(), String> {
    let content = r#"{
  "parameters": {
    "cluster_throughput_mb_per_sec": [10],
    "num_producers": [0],
    "record_size_byte": [1024],
    "duration_sec": [60],
    "consumer_groups": [{ "num_groups": 1, "size": 1 }]
  }
}"#;
    let (_dir, path) = write_spec("producers.json", content)?;
    let file = load_spec_file(&path).map_err(|err| err.to_string())?;
    match validate_spec(file) {
        Err(SpecError::InvalidDimensionValue { dimension, .. })
            if dimension == "num_producers" =>
        {
            Ok(())
        }
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected InvalidDimensionValue".to_owned()),
    }
}

#[test]
fn absurd_throughput_candidate_is_rejected() -> Result<(), String> {
    // Values this large would overflow the derived byte-rate products.
    let content = r#"{
  "parameters": {
    "cluster_throughput_mb_per_sec": [1000000000000000],
    "num_producers": [1],
    "record_size_byte": [1024],
    "duration_sec": [60],
    "consumer_groups": [{ "num_groups": 1, "size": 1 }]
  }
}"#;
    let (_dir, path) = write_spec("huge.json", content)?;
    let file = load_spec_file(&path).map_err(|err| err.to_string())?;
    match validate_spec(file) {
        Err(SpecError::InvalidDimensionValue { dimension, .. })
            if dimension == THROUGHPUT_DIMENSION =>
        {
            Ok(())
        }
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected InvalidDimensionValue".to_owned()),
    }
}

#[test]
fn out_of_range_depletion_timeout_is_rejected() -> Result<(), String> {
    let content = r#"{
  "parameters": {
    "cluster_throughput_mb_per_sec": [10],
    "num_producers": [1],
    "record_size_byte": [1024],
    "duration_sec": [60],
    "consumer_groups": [{ "num_groups": 1, "size": 1 }]
  },
  "depletion_configuration": { "approximate_timeout_hours": 0 }
}"#;
    let (_dir, path) = write_spec("timeout.json", content)?;
    let file = load_spec_file(&path).map_err(|err| err.to_string())?;
    match validate_spec(file) {
        Err(SpecError::InvalidDepletionTimeout { hours: 0, .. }) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected InvalidDepletionTimeout".to_owned()),
    }
}

#[test]
fn unknown_skip_metric_is_rejected_at_load() -> Result<(), String> {
    let content = r#"{
  "parameters": {
    "cluster_throughput_mb_per_sec": [10],
    "num_producers": [1],
    "record_size_byte": [1024],
    "duration_sec": [60],
    "consumer_groups": [{ "num_groups": 1, "size": 1 }]
  },
  "skip_remaining_throughput": { "less-than": ["latency_p99_ms", 0.9] }
}"#;
    let (_dir, path) = write_spec("metric.json", content)?;
    let file = load_spec_file(&path).map_err(|err| err.to_string())?;
    match validate_spec(file) {
        Err(SpecError::UnknownMetric { name }) if name == "latency_p99_ms" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected UnknownMetric".to_owned()),
    }
}

#[test]
fn unsupported_extension_is_rejected() -> Result<(), String> {
    let (_dir, path) = write_spec("suite.yaml", "parameters: {}")?;
    match load_spec_file(&path) {
        Err(AppError::Spec(SpecError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected UnsupportedExtension".to_owned()),
    }
}
