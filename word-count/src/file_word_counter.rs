// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::tokenizer::count_in_reader;
use phrase_search_core::error::{Result, SearchError};
use phrase_search_core::word_counter::WordCounter;
use std::fs::File;
use std::io::BufReader;

/// Counts occurrences by streaming a file from the local filesystem
#[derive(Debug, Clone, Copy)]
pub struct FileWordCounter {
    max_token_length: usize,
}

impl FileWordCounter {
    pub fn new(max_token_length: usize) -> Self {
        Self { max_token_length }
    }
}

impl WordCounter for FileWordCounter {
    fn count(&self, path: &str, word: &str) -> Result<u64> {
        let access = |source| SearchError::FileAccess {
            path: path.to_string(),
            source,
        };
        let file = File::open(path).map_err(access)?;
        count_in_reader(BufReader::new(file), word, self.max_token_length).map_err(access)
    }
}
