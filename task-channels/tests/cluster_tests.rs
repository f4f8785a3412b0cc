// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use phrase_search_core::aggregator::AggregationStrategy;
use phrase_search_core::config::Config;
use phrase_search_core::partitioner::PartitionStrategy;
use phrase_search_core::sequential::search_sequential;
use phrase_search_core::{Result, SearchError};
use phrase_search_task_channels::ChannelCluster;
use phrase_search_word_count::{FileWordCounter, InMemoryWordCounter};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const VOCABULARY: [&str; 6] = ["alpha", "beta", "gamma", "delta", "alpha,", "Beta"];

fn config(
    num_nodes: usize,
    partitioning: PartitionStrategy,
    aggregation: AggregationStrategy,
) -> Config {
    Config {
        num_nodes,
        partitioning,
        aggregation,
        ..Config::default()
    }
}

fn example_counter() -> InMemoryWordCounter {
    InMemoryWordCounter::new([("A", "example example text"), ("B", "text text")], 255)
}

fn files(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|path| path.to_string()).collect()
}

#[tokio::test]
async fn test_example_phrase_over_two_files() {
    for aggregation in [AggregationStrategy::SumReduce, AggregationStrategy::Collect] {
        let cluster = ChannelCluster::new(
            config(3, PartitionStrategy::FileRange, aggregation),
            example_counter(),
        );
        let report = cluster
            .run("example text", files(&["A", "B"]))
            .await
            .unwrap();

        assert_eq!(report.count("A", "example"), Some(2));
        assert_eq!(report.count("A", "text"), Some(1));
        assert_eq!(report.count("B", "example"), Some(0));
        assert_eq!(report.count("B", "text"), Some(2));
        assert_eq!(report.render_text(false), "A: 3\nB: 2\n");
    }
}

#[tokio::test]
async fn test_column_partitioning_with_idle_nodes() {
    for aggregation in [AggregationStrategy::SumReduce, AggregationStrategy::Collect] {
        let cluster = ChannelCluster::new(
            config(5, PartitionStrategy::Column, aggregation),
            example_counter(),
        );
        let report = cluster
            .run("example text", files(&["A", "B"]))
            .await
            .unwrap();
        assert_eq!(report.file_totals(), vec![("A", 3), ("B", 2)]);
    }
}

#[tokio::test]
async fn test_column_partitioning_rejects_more_words_than_nodes() {
    let cluster = ChannelCluster::new(
        config(1, PartitionStrategy::Column, AggregationStrategy::SumReduce),
        example_counter(),
    );
    assert!(matches!(
        cluster.run("example text", files(&["A"])).await,
        Err(SearchError::Configuration(_))
    ));
}

#[tokio::test]
async fn test_single_node_group() {
    let cluster = ChannelCluster::new(
        config(1, PartitionStrategy::FileRange, AggregationStrategy::Collect),
        example_counter(),
    );
    let report = cluster
        .run("text", files(&["A", "B", "A"]))
        .await
        .unwrap();
    assert_eq!(report.file_totals(), vec![("A", 1), ("B", 2), ("A", 1)]);
}

#[tokio::test]
async fn test_more_nodes_than_files() {
    let cluster = ChannelCluster::new(
        config(8, PartitionStrategy::FileRange, AggregationStrategy::SumReduce),
        example_counter(),
    );
    let report = cluster.run("example", files(&["A"])).await.unwrap();
    assert_eq!(report.grand_total(), 2);
}

#[tokio::test]
async fn test_empty_phrase_gives_zero_totals() {
    let cluster = ChannelCluster::new(Config::default(), example_counter());
    let report = cluster.run("  ", files(&["A", "B"])).await.unwrap();
    assert!(report.terms.is_empty());
    assert_eq!(report.render_text(true), "A: 0\nB: 0\n");
}

#[tokio::test]
async fn test_empty_file_list_gives_empty_report() {
    let cluster = ChannelCluster::new(Config::default(), example_counter());
    let report = cluster.run("example", Vec::new()).await.unwrap();
    assert!(report.files.is_empty());
    assert_eq!(report.render_text(false), "");
}

#[tokio::test]
async fn test_invalid_config_fails_before_start() {
    let cluster = ChannelCluster::new(
        config(0, PartitionStrategy::FileRange, AggregationStrategy::SumReduce),
        example_counter(),
    );
    assert!(matches!(
        cluster.run("example", files(&["A"])).await,
        Err(SearchError::Configuration(_))
    ));

    let strict = Config {
        require_terms: true,
        ..Config::default()
    };
    let cluster = ChannelCluster::new(strict, example_counter());
    assert!(matches!(
        cluster.run("", files(&["A"])).await,
        Err(SearchError::Configuration(_))
    ));
}

#[tokio::test]
async fn test_missing_file_is_reported_as_root_cause() {
    for aggregation in [AggregationStrategy::SumReduce, AggregationStrategy::Collect] {
        let cluster = ChannelCluster::new(
            config(3, PartitionStrategy::FileRange, aggregation),
            example_counter(),
        );
        match cluster.run("text", files(&["A", "missing", "B"])).await {
            Err(SearchError::FileAccess { path, .. }) => assert_eq!(path, "missing"),
            other => panic!("expected file access error, got {:?}", other),
        }
    }
}

#[tokio::test]
async fn test_peer_failure_stops_a_node_that_is_still_counting() {
    let counted = Arc::new(AtomicUsize::new(0));
    let counter = {
        let counted = Arc::clone(&counted);
        move |path: &str, _word: &str| -> Result<u64> {
            if path == "bad" {
                return Err(SearchError::FileAccess {
                    path: path.to_string(),
                    source: io::Error::from(io::ErrorKind::NotFound),
                });
            }
            thread::sleep(Duration::from_millis(100));
            counted.fetch_add(1, Ordering::SeqCst);
            Ok(1)
        }
    };

    // Rank 0 owns files 0..11; rank 1 owns 11..21 and fails on its first
    let mut paths: Vec<String> = (0..21).map(|i| format!("slow-{}", i)).collect();
    paths[11] = "bad".to_string();

    let cluster = ChannelCluster::new(
        config(2, PartitionStrategy::FileRange, AggregationStrategy::SumReduce),
        counter,
    );
    match cluster.run("w", paths).await {
        Err(SearchError::FileAccess { path, .. }) => assert_eq!(path, "bad"),
        other => panic!("expected file access error, got {:?}", other),
    }
    assert!(counted.load(Ordering::SeqCst) < 11);
}

#[tokio::test]
async fn test_panicking_counter_fails_the_run() {
    let counter = |path: &str, _word: &str| -> Result<u64> {
        if path == "bad" {
            panic!("counter exploded");
        }
        Ok(1)
    };
    let cluster = ChannelCluster::new(
        config(2, PartitionStrategy::FileRange, AggregationStrategy::SumReduce),
        counter,
    );
    match cluster.run("w", files(&["good", "bad"])).await {
        Err(SearchError::NodePanicked { rank }) => assert_eq!(rank, 1),
        other => panic!("expected node panic, got {:?}", other),
    }
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let cluster = ChannelCluster::new(
        config(3, PartitionStrategy::FileRange, AggregationStrategy::Collect),
        example_counter(),
    );
    let first = cluster
        .run("example text", files(&["A", "B"]))
        .await
        .unwrap();
    let second = cluster
        .run("example text", files(&["A", "B"]))
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_matches_sequential_count_on_random_inputs() {
    let mut rng = StdRng::seed_from_u64(7);

    for round in 0..6 {
        let num_files = rng.random_range(0..9);
        let documents: Vec<(String, String)> = (0..num_files)
            .map(|i| {
                let len = rng.random_range(0..40);
                let text = (0..len)
                    .map(|_| VOCABULARY[rng.random_range(0..VOCABULARY.len())])
                    .collect::<Vec<_>>()
                    .join(if i % 2 == 0 { " " } else { "\n" });
                (format!("doc-{}", i), text)
            })
            .collect();
        let paths: Vec<String> = documents.iter().map(|(path, _)| path.clone()).collect();
        let num_terms = rng.random_range(0..4);
        let phrase = (0..num_terms)
            .map(|_| VOCABULARY[rng.random_range(0..VOCABULARY.len())])
            .collect::<Vec<_>>()
            .join(" ");
        let counter = InMemoryWordCounter::new(documents, 255);
        let expected = search_sequential(&Config::default(), &counter, &phrase, paths.clone())
            .unwrap();

        for num_nodes in 1..=5 {
            for partitioning in [PartitionStrategy::FileRange, PartitionStrategy::Column] {
                if partitioning == PartitionStrategy::Column && expected.terms.len() > num_nodes {
                    continue;
                }
                for aggregation in [AggregationStrategy::SumReduce, AggregationStrategy::Collect] {
                    let cluster = ChannelCluster::new(
                        config(num_nodes, partitioning, aggregation),
                        counter.clone(),
                    );
                    let report = cluster.run(&phrase, paths.clone()).await.unwrap();
                    assert_eq!(
                        report, expected,
                        "round {} with {} nodes, {:?}, {:?}",
                        round, num_nodes, partitioning, aggregation
                    );
                }
            }
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_files_on_disk_with_threaded_runtime() {
    let dir = tempfile::tempdir().unwrap();
    let mut paths = Vec::new();
    for (name, contents) in [
        ("one.txt", "the quick brown fox\njumps over the lazy dog\n"),
        ("two.txt", "the the the"),
        ("three.txt", ""),
    ] {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        paths.push(path.to_str().unwrap().to_string());
    }

    let config = config(4, PartitionStrategy::FileRange, AggregationStrategy::SumReduce);
    let counter = FileWordCounter::new(config.max_token_length);
    let report = ChannelCluster::new(config, counter)
        .run("the fox", paths.clone())
        .await
        .unwrap();
    assert_eq!(report.count(&paths[0], "the"), Some(2));
    assert_eq!(report.count(&paths[0], "fox"), Some(1));
    assert_eq!(report.count(&paths[1], "the"), Some(3));
    assert_eq!(report.file_totals()[2].1, 0);
    assert_eq!(report.grand_total(), 6);
}
