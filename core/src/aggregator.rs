// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::count_matrix::{CountMatrix, MatrixShape, WorkItem};
use crate::error::{Result, SearchError};
use crate::node_message::{PartialCounts, PartialResult};
use crate::partitioner::{Assignment, WorkPartitioner};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How partial results are combined into the final matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationStrategy {
    /// Element-wise sum of matrix-sized buffers with disjoint support
    #[default]
    SumReduce,
    /// Each node's slice is written at offsets recomputed from its assignment
    Collect,
}

/// Builds the node's report from counts listed in assignment order
pub fn build_partial(
    strategy: AggregationStrategy,
    assignment: &Assignment,
    shape: MatrixShape,
    counts: Vec<u64>,
) -> PartialResult {
    let counts = match strategy {
        AggregationStrategy::Collect => PartialCounts::Slice(counts),
        AggregationStrategy::SumReduce => {
            let mut dense = vec![0; shape.cells()];
            for (item, count) in assignment.items(shape).into_iter().zip(counts) {
                dense[shape.index(item)] = count;
            }
            PartialCounts::Dense(dense)
        }
    };
    PartialResult {
        rank: assignment.rank(),
        counts,
    }
}

/// Combines partial results into one matrix, independent of arrival order
pub struct ResultAggregator {
    partitioner: WorkPartitioner,
    shape: MatrixShape,
    strategy: AggregationStrategy,
    partials: BTreeMap<usize, Vec<u64>>,
}

impl ResultAggregator {
    pub fn new(
        partitioner: WorkPartitioner,
        shape: MatrixShape,
        strategy: AggregationStrategy,
    ) -> Self {
        Self {
            partitioner,
            shape,
            strategy,
            partials: BTreeMap::new(),
        }
    }

    pub fn received(&self) -> usize {
        self.partials.len()
    }

    pub fn is_complete(&self) -> bool {
        self.partials.len() == self.partitioner.num_nodes()
    }

    /// Accept one node's result; sizes are checked against the partitioner,
    /// never taken from the message
    pub fn accept(&mut self, partial: PartialResult) -> Result<()> {
        let assignment = self.partitioner.assignment(partial.rank, self.shape)?;
        if self.partials.contains_key(&partial.rank) {
            return Err(SearchError::Protocol(format!(
                "second partial result from rank {}",
                partial.rank
            )));
        }

        let (values, expected) = match (partial.counts, self.strategy) {
            (PartialCounts::Dense(values), AggregationStrategy::SumReduce) => {
                (values, self.shape.cells())
            }
            (PartialCounts::Slice(values), AggregationStrategy::Collect) => {
                (values, assignment.item_count(self.shape))
            }
            _ => {
                return Err(SearchError::Protocol(format!(
                    "rank {} reported counts in the wrong form for {:?}",
                    partial.rank, self.strategy
                )))
            }
        };
        if values.len() != expected {
            return Err(SearchError::size_mismatch(
                format!("partial result of rank {}", partial.rank),
                expected,
                values.len(),
            ));
        }

        self.partials.insert(partial.rank, values);
        Ok(())
    }

    pub fn finish(self) -> Result<CountMatrix> {
        if let Some(missing) =
            (0..self.partitioner.num_nodes()).find(|rank| !self.partials.contains_key(rank))
        {
            return Err(SearchError::Protocol(format!(
                "no partial result from rank {}",
                missing
            )));
        }
        self.partitioner.verify_cover(self.shape)?;

        match self.strategy {
            AggregationStrategy::SumReduce => self.sum_reduce(),
            AggregationStrategy::Collect => self.collect(),
        }
    }

    fn sum_reduce(self) -> Result<CountMatrix> {
        let mut matrix = CountMatrix::zeroed(self.shape);
        for (rank, values) in &self.partials {
            let assignment = self.partitioner.assignment(*rank, self.shape)?;
            let mut owned = vec![false; self.shape.cells()];
            for item in assignment.items(self.shape) {
                owned[self.shape.index(item)] = true;
            }
            // A nonzero cell outside the owner's support would be double counted
            if let Some(index) = (0..values.len()).find(|&i| !owned[i] && values[i] != 0) {
                let item = self.shape.item_at(index);
                return Err(SearchError::CoverageViolation {
                    file: item.file,
                    word: item.word,
                    writes: 2,
                });
            }
            matrix.add_assign(values);
        }
        Ok(matrix)
    }

    fn collect(self) -> Result<CountMatrix> {
        let mut cells: Vec<Option<u64>> = vec![None; self.shape.cells()];
        for (rank, values) in &self.partials {
            let assignment = self.partitioner.assignment(*rank, self.shape)?;
            for (item, value) in assignment.items(self.shape).into_iter().zip(values) {
                let cell = &mut cells[self.shape.index(item)];
                if cell.is_some() {
                    return Err(violation(item, 2));
                }
                *cell = Some(*value);
            }
        }

        let mut values = Vec::with_capacity(cells.len());
        for (index, cell) in cells.into_iter().enumerate() {
            match cell {
                Some(value) => values.push(value),
                None => return Err(violation(self.shape.item_at(index), 0)),
            }
        }
        CountMatrix::from_cells(self.shape, values)
    }
}

fn violation(item: WorkItem, writes: usize) -> SearchError {
    SearchError::CoverageViolation {
        file: item.file,
        word: item.word,
        writes,
    }
}
