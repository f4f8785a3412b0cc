// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::count_matrix::CountMatrix;
use crate::error::Result;
use serde::Serialize;
use std::fmt::Write;

/// Final result of a run: the count matrix with its row and column labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub terms: Vec<String>,
    pub files: Vec<String>,
    pub matrix: CountMatrix,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    terms: &'a [String],
    files: Vec<JsonFile<'a>>,
    total: u64,
}

#[derive(Serialize)]
struct JsonFile<'a> {
    path: &'a str,
    total: u64,
    counts: Vec<JsonTermCount<'a>>,
}

#[derive(Serialize)]
struct JsonTermCount<'a> {
    term: &'a str,
    count: u64,
}

impl SearchReport {
    pub fn new(terms: Vec<String>, files: Vec<String>, matrix: CountMatrix) -> Self {
        Self {
            terms,
            files,
            matrix,
        }
    }

    /// Occurrences of all terms per file, in registration order
    pub fn file_totals(&self) -> Vec<(&str, u64)> {
        self.files
            .iter()
            .enumerate()
            .map(|(row, path)| (path.as_str(), self.matrix.row_total(row)))
            .collect()
    }

    pub fn term_totals(&self) -> Vec<(&str, u64)> {
        self.terms
            .iter()
            .enumerate()
            .map(|(column, term)| (term.as_str(), self.matrix.column_total(column)))
            .collect()
    }

    pub fn grand_total(&self) -> u64 {
        self.matrix.total()
    }

    /// Count for the first registration of `file` and the column of `term`
    pub fn count(&self, file: &str, term: &str) -> Option<u64> {
        let row = self.files.iter().position(|path| path == file)?;
        let column = self.terms.iter().position(|candidate| candidate == term)?;
        Some(self.matrix.get(row, column))
    }

    /// One `path: total` line per file, optionally followed by per-term lines
    pub fn render_text(&self, breakdown: bool) -> String {
        let mut out = String::new();
        for (row, path) in self.files.iter().enumerate() {
            let _ = writeln!(out, "{}: {}", path, self.matrix.row_total(row));
            if breakdown {
                for (column, term) in self.terms.iter().enumerate() {
                    let _ = writeln!(out, "  {}: {}", term, self.matrix.get(row, column));
                }
            }
        }
        out
    }

    pub fn to_json(&self) -> Result<String> {
        let files = self
            .files
            .iter()
            .enumerate()
            .map(|(row, path)| JsonFile {
                path,
                total: self.matrix.row_total(row),
                counts: self
                    .terms
                    .iter()
                    .enumerate()
                    .map(|(column, term)| JsonTermCount {
                        term,
                        count: self.matrix.get(row, column),
                    })
                    .collect(),
            })
            .collect();
        let report = JsonReport {
            terms: &self.terms,
            files,
            total: self.grand_total(),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}
