// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use phrase_search_core::aggregator::AggregationStrategy;
use phrase_search_core::config::Config;
use phrase_search_core::partitioner::PartitionStrategy;
use phrase_search_core::SearchError;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.num_nodes, 4);
    assert_eq!(config.partitioning, PartitionStrategy::FileRange);
    assert_eq!(config.aggregation, AggregationStrategy::SumReduce);
    assert_eq!(config.max_terms, 100);
    assert_eq!(config.max_phrase_length, 1024);
    assert_eq!(config.max_files, 100);
    assert_eq!(config.max_token_length, 255);
    assert!(!config.require_terms);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_fills_missing_fields_with_defaults() {
    let file = write_config(r#"{ "num_nodes": 7, "partitioning": "column" }"#);
    let config = Config::load(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.num_nodes, 7);
    assert_eq!(config.partitioning, PartitionStrategy::Column);
    assert_eq!(config.aggregation, AggregationStrategy::SumReduce);
    assert_eq!(config.max_files, 100);
}

#[test]
fn test_load_full_document() {
    let file = write_config(
        r#"{
            "num_nodes": 2,
            "partitioning": "file_range",
            "aggregation": "collect",
            "max_terms": 5,
            "max_phrase_length": 64,
            "max_files": 3,
            "max_token_length": 8,
            "channel_capacity": 1,
            "require_terms": true,
            "require_files": true
        }"#,
    );
    let config = Config::load(file.path().to_str().unwrap()).unwrap();
    assert_eq!(config.aggregation, AggregationStrategy::Collect);
    assert_eq!(config.max_token_length, 8);
    assert_eq!(config.channel_capacity, 1);
    assert!(config.require_terms);
    assert!(config.require_files);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    match Config::load(path.to_str().unwrap()) {
        Err(SearchError::ConfigLoad { path: reported, .. }) => {
            assert!(reported.ends_with("absent.json"));
        }
        other => panic!("expected load error, got {:?}", other),
    }
}

#[test]
fn test_load_malformed_json() {
    let file = write_config("{ num_nodes: ");
    assert!(matches!(
        Config::load(file.path().to_str().unwrap()),
        Err(SearchError::Serialization(_))
    ));
}

#[test]
fn test_load_rejects_zero_nodes() {
    let file = write_config(r#"{ "num_nodes": 0 }"#);
    assert!(matches!(
        Config::load(file.path().to_str().unwrap()),
        Err(SearchError::Configuration(_))
    ));
}

#[test]
fn test_validate_rejects_zero_limits() {
    let mut config = Config::default();
    config.max_token_length = 0;
    assert!(matches!(
        config.validate(),
        Err(SearchError::Configuration(_))
    ));

    let mut config = Config::default();
    config.channel_capacity = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.max_terms = 0;
    assert!(config.validate().is_err());
}
