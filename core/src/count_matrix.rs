// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Dimensions of the result: one row per file, one column per search term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatrixShape {
    pub files: usize,
    pub words: usize,
}

/// One (file, word) pair, addressed by row and column index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorkItem {
    pub file: usize,
    pub word: usize,
}

impl MatrixShape {
    pub fn new(files: usize, words: usize) -> Self {
        Self { files, words }
    }

    pub fn cells(&self) -> usize {
        self.files * self.words
    }

    /// Row-major offset of an item
    pub fn index(&self, item: WorkItem) -> usize {
        item.file * self.words + item.word
    }

    pub fn item_at(&self, index: usize) -> WorkItem {
        WorkItem {
            file: index / self.words,
            word: index % self.words,
        }
    }
}

/// Dense files x words table of occurrence counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountMatrix {
    shape: MatrixShape,
    cells: Vec<u64>,
}

impl CountMatrix {
    pub fn zeroed(shape: MatrixShape) -> Self {
        Self {
            shape,
            cells: vec![0; shape.cells()],
        }
    }

    pub fn from_cells(shape: MatrixShape, cells: Vec<u64>) -> Result<Self> {
        if cells.len() != shape.cells() {
            return Err(SearchError::size_mismatch(
                "count matrix",
                shape.cells(),
                cells.len(),
            ));
        }
        Ok(Self { shape, cells })
    }

    pub fn shape(&self) -> MatrixShape {
        self.shape
    }

    pub fn cells(&self) -> &[u64] {
        &self.cells
    }

    pub fn get(&self, file: usize, word: usize) -> u64 {
        self.cells[self.shape.index(WorkItem { file, word })]
    }

    pub fn row(&self, file: usize) -> &[u64] {
        let start = file * self.shape.words;
        &self.cells[start..start + self.shape.words]
    }

    /// Occurrences of all terms in one file
    pub fn row_total(&self, file: usize) -> u64 {
        self.row(file).iter().sum()
    }

    /// Occurrences of one term across all files
    pub fn column_total(&self, word: usize) -> u64 {
        (0..self.shape.files).map(|file| self.get(file, word)).sum()
    }

    pub fn total(&self) -> u64 {
        self.cells.iter().sum()
    }

    pub(crate) fn add_assign(&mut self, other: &[u64]) {
        for (cell, value) in self.cells.iter_mut().zip(other) {
            *cell += value;
        }
    }
}
