// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::aggregator::AggregationStrategy;
use crate::error::SearchError;
use crate::partitioner::PartitionStrategy;
use serde::{Deserialize, Serialize};

/// Sizes every node needs before it can accept the input payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputHeader {
    pub num_words: usize,
    pub num_files: usize,
    pub num_nodes: usize,
    pub partitioning: PartitionStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputPayload {
    pub words: Vec<String>,
    pub files: Vec<String>,
}

/// Messages sent by the coordinator, in protocol order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeMessage {
    /// Always precedes the payload it describes
    Announce(InputHeader),
    Payload(InputPayload),
    /// Releases the counting phase and names the result form to report
    Begin(AggregationStrategy),
}

impl NodeMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            NodeMessage::Announce(_) => "announce",
            NodeMessage::Payload(_) => "payload",
            NodeMessage::Begin(_) => "begin",
        }
    }
}

/// Counts produced by one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartialCounts {
    /// Full matrix-sized buffer, zero outside the node's own items
    Dense(Vec<u64>),
    /// Only the node's own items, in assignment order
    Slice(Vec<u64>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialResult {
    pub rank: usize,
    pub counts: PartialCounts,
}

/// Messages sent back by a node; the rank comes from the stream they arrive on
#[derive(Debug)]
pub enum NodeStatus {
    /// Inputs received and validated
    Ready,
    Completed(PartialResult),
    Failed(SearchError),
}
