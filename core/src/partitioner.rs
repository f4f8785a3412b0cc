// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::count_matrix::{MatrixShape, WorkItem};
use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Axis along which (file, word) items are split across nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionStrategy {
    /// One search term per node; every node scans every file
    Column,
    /// Contiguous, balanced file ranges; every node scans every term
    #[default]
    FileRange,
}

/// The items one node owns for the duration of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assignment {
    Files { rank: usize, files: Range<usize> },
    /// `word` is None for nodes ranked past the last term
    Column { rank: usize, word: Option<usize> },
}

impl Assignment {
    pub fn rank(&self) -> usize {
        match self {
            Assignment::Files { rank, .. } | Assignment::Column { rank, .. } => *rank,
        }
    }

    pub fn item_count(&self, shape: MatrixShape) -> usize {
        match self {
            Assignment::Files { files, .. } => files.len() * shape.words,
            Assignment::Column { word: Some(_), .. } => shape.files,
            Assignment::Column { word: None, .. } => 0,
        }
    }

    pub fn is_idle(&self, shape: MatrixShape) -> bool {
        self.item_count(shape) == 0
    }

    /// Owned items in the order the node counts them and reports them.
    /// File ranges are walked row-major, columns file by file.
    pub fn items(&self, shape: MatrixShape) -> Vec<WorkItem> {
        match self {
            Assignment::Files { files, .. } => files
                .clone()
                .flat_map(|file| (0..shape.words).map(move |word| WorkItem { file, word }))
                .collect(),
            Assignment::Column {
                word: Some(word), ..
            } => (0..shape.files)
                .map(|file| WorkItem { file, word: *word })
                .collect(),
            Assignment::Column { word: None, .. } => Vec::new(),
        }
    }
}

/// Files owned by `rank`: the first `num_files % num_nodes` ranks take one extra.
pub fn file_range(rank: usize, num_nodes: usize, num_files: usize) -> Range<usize> {
    let base = num_files / num_nodes;
    let extra = num_files % num_nodes;
    let start = rank * base + rank.min(extra);
    let end = start + base + usize::from(rank < extra);
    start..end
}

/// Term owned by `rank` under column partitioning
pub fn column_word(rank: usize, num_words: usize) -> Option<usize> {
    (rank < num_words).then_some(rank)
}

/// Deterministic, communication-free split of the matrix over a static group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkPartitioner {
    strategy: PartitionStrategy,
    num_nodes: usize,
}

impl WorkPartitioner {
    pub fn new(strategy: PartitionStrategy, num_nodes: usize) -> Result<Self> {
        if num_nodes == 0 {
            return Err(SearchError::Configuration(
                "node group must contain at least one node".to_string(),
            ));
        }
        Ok(Self {
            strategy,
            num_nodes,
        })
    }

    pub fn strategy(&self) -> PartitionStrategy {
        self.strategy
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Column partitioning needs a node for every term
    pub fn check(&self, shape: MatrixShape) -> Result<()> {
        if self.strategy == PartitionStrategy::Column && shape.words > self.num_nodes {
            return Err(SearchError::Configuration(format!(
                "column partitioning needs at least one node per term ({} terms, {} nodes)",
                shape.words, self.num_nodes
            )));
        }
        Ok(())
    }

    pub fn assignment(&self, rank: usize, shape: MatrixShape) -> Result<Assignment> {
        self.check(shape)?;
        if rank >= self.num_nodes {
            return Err(SearchError::Protocol(format!(
                "rank {} outside a group of {} nodes",
                rank, self.num_nodes
            )));
        }
        Ok(match self.strategy {
            PartitionStrategy::FileRange => Assignment::Files {
                rank,
                files: file_range(rank, self.num_nodes, shape.files),
            },
            PartitionStrategy::Column => Assignment::Column {
                rank,
                word: column_word(rank, shape.words),
            },
        })
    }

    pub fn assignments(&self, shape: MatrixShape) -> Result<Vec<Assignment>> {
        (0..self.num_nodes)
            .map(|rank| self.assignment(rank, shape))
            .collect()
    }

    /// Confirm the assignments cover every cell exactly once
    pub fn verify_cover(&self, shape: MatrixShape) -> Result<()> {
        let mut writes = vec![0usize; shape.cells()];
        for assignment in self.assignments(shape)? {
            for item in assignment.items(shape) {
                writes[shape.index(item)] += 1;
            }
        }
        match writes.iter().position(|&count| count != 1) {
            Some(index) => {
                let item = shape.item_at(index);
                Err(SearchError::CoverageViolation {
                    file: item.file,
                    word: item.word,
                    writes: writes[index],
                })
            }
            None => Ok(()),
        }
    }
}
