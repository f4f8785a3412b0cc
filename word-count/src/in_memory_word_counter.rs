// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::tokenizer::count_in_reader;
use phrase_search_core::error::{Result, SearchError};
use phrase_search_core::word_counter::WordCounter;
use std::collections::HashMap;
use std::io;
use std::sync::Arc;

/// Counter over named in-memory documents; unknown paths behave like missing files
#[derive(Debug, Clone)]
pub struct InMemoryWordCounter {
    documents: Arc<HashMap<String, String>>,
    max_token_length: usize,
}

impl InMemoryWordCounter {
    pub fn new<I, P, T>(documents: I, max_token_length: usize) -> Self
    where
        I: IntoIterator<Item = (P, T)>,
        P: Into<String>,
        T: Into<String>,
    {
        Self {
            documents: Arc::new(
                documents
                    .into_iter()
                    .map(|(path, text)| (path.into(), text.into()))
                    .collect(),
            ),
            max_token_length,
        }
    }
}

impl WordCounter for InMemoryWordCounter {
    fn count(&self, path: &str, word: &str) -> Result<u64> {
        let access = |source| SearchError::FileAccess {
            path: path.to_string(),
            source,
        };
        let text = self
            .documents
            .get(path)
            .ok_or_else(|| access(io::Error::new(io::ErrorKind::NotFound, "no such document")))?;
        count_in_reader(text.as_bytes(), word, self.max_token_length).map_err(access)
    }
}
