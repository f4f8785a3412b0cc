// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::Config;
use crate::word_counter::truncate_token;

/// Turns a free-text phrase into the ordered list of distinct search terms
#[derive(Debug, Clone, Copy)]
pub struct PhraseSplitter {
    max_terms: usize,
    max_term_length: usize,
}

impl PhraseSplitter {
    pub fn new(max_terms: usize, max_term_length: usize) -> Self {
        Self {
            max_terms,
            max_term_length,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_terms, config.max_token_length)
    }

    /// Split on whitespace keeping first occurrences in order. Terms are
    /// truncated like file tokens; terms past `max_terms` are dropped.
    pub fn split(&self, phrase: &str) -> Vec<String> {
        let mut terms: Vec<String> = Vec::new();
        for token in phrase.split_whitespace() {
            if terms.len() == self.max_terms {
                break;
            }
            let term = truncate_token(token, self.max_term_length);
            if !terms.iter().any(|existing| existing == term) {
                terms.push(term.to_string());
            }
        }
        terms
    }
}
