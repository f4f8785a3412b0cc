// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Every way a search run can fail. Any of these aborts the whole node group.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Bad phrase, file list or settings; detected before any node does work
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("failed to read config file '{path}': {source}")]
    ConfigLoad {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A node could not open or read one of its assigned files
    #[error("cannot access file '{path}': {source}")]
    FileAccess {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A received buffer disagrees with the size announced for it
    #[error("protocol size mismatch for {what}: announced {expected}, received {actual}")]
    ProtocolSizeMismatch {
        what: String,
        expected: usize,
        actual: usize,
    },

    #[error("protocol violation: {0}")]
    Protocol(String),

    /// Cell (file, word) was left unset or written by more than one node
    #[error("cell (file {file}, word {word}) written {writes} times, expected exactly once")]
    CoverageViolation {
        file: usize,
        word: usize,
        writes: usize,
    },

    #[error("node {rank} panicked while counting")]
    NodePanicked { rank: usize },

    #[error("peer disconnected: {0}")]
    Disconnected(String),

    /// The shared abort signal fired because some other participant failed
    #[error("run aborted by a peer")]
    Aborted,
}

impl SearchError {
    pub fn size_mismatch(what: impl Into<String>, expected: usize, actual: usize) -> Self {
        SearchError::ProtocolSizeMismatch {
            what: what.into(),
            expected,
            actual,
        }
    }

    /// True for the secondary error seen by nodes that merely observed an abort
    pub fn is_secondary(&self) -> bool {
        matches!(self, SearchError::Aborted)
    }
}
