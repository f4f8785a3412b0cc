// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::Config;
use crate::count_matrix::CountMatrix;
use crate::error::Result;
use crate::report::SearchReport;
use crate::search_inputs::SearchInputs;
use crate::word_counter::WordCounter;

/// Single-node reference: every (file, word) item counted in row-major order
pub fn count_sequential<C: WordCounter>(counter: &C, inputs: &SearchInputs) -> Result<CountMatrix> {
    let shape = inputs.shape();
    let mut cells = Vec::with_capacity(shape.cells());
    for path in &inputs.files {
        for term in &inputs.terms {
            cells.push(counter.count(path, term)?);
        }
    }
    CountMatrix::from_cells(shape, cells)
}

pub fn search_sequential<C: WordCounter>(
    config: &Config,
    counter: &C,
    phrase: &str,
    files: Vec<String>,
) -> Result<SearchReport> {
    let inputs = SearchInputs::prepare(config, phrase, files)?;
    let matrix = count_sequential(counter, &inputs)?;
    Ok(SearchReport::new(inputs.terms, inputs.files, matrix))
}
