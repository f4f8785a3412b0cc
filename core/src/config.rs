// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::aggregator::AggregationStrategy;
use crate::error::{Result, SearchError};
use crate::partitioner::PartitionStrategy;
use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    /// Size of the static node group, coordinator included
    #[serde(default = "default_num_nodes")]
    pub num_nodes: usize,
    #[serde(default)]
    pub partitioning: PartitionStrategy,
    #[serde(default)]
    pub aggregation: AggregationStrategy,
    /// Terms beyond this count are dropped from the phrase
    #[serde(default = "default_max_terms")]
    pub max_terms: usize,
    #[serde(default = "default_max_phrase_length")]
    pub max_phrase_length: usize,
    #[serde(default = "default_max_files")]
    pub max_files: usize,
    /// Tokens (in files and in the phrase) are cut to this many characters
    #[serde(default = "default_max_token_length")]
    pub max_token_length: usize,
    /// Bounded capacity of every node inbox and status stream
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
    /// Reject a phrase that yields no terms instead of running a zero-column search
    #[serde(default)]
    pub require_terms: bool,
    /// Reject an empty file list instead of producing an empty report
    #[serde(default)]
    pub require_files: bool,
}

fn default_num_nodes() -> usize {
    4
}

fn default_max_terms() -> usize {
    100
}

fn default_max_phrase_length() -> usize {
    1024
}

fn default_max_files() -> usize {
    100
}

fn default_max_token_length() -> usize {
    255
}

fn default_channel_capacity() -> usize {
    16
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| SearchError::ConfigLoad {
            path: path.to_string(),
            source,
        })?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let checks = [
            (self.num_nodes, "num_nodes"),
            (self.max_terms, "max_terms"),
            (self.max_token_length, "max_token_length"),
            (self.channel_capacity, "channel_capacity"),
        ];
        for (value, name) in checks {
            if value == 0 {
                return Err(SearchError::Configuration(format!(
                    "{} must be at least 1",
                    name
                )));
            }
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_nodes: default_num_nodes(),
            partitioning: PartitionStrategy::default(),
            aggregation: AggregationStrategy::default(),
            max_terms: default_max_terms(),
            max_phrase_length: default_max_phrase_length(),
            max_files: default_max_files(),
            max_token_length: default_max_token_length(),
            channel_capacity: default_channel_capacity(),
            require_terms: false,
            require_files: false,
        }
    }
}
