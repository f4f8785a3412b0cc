// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::Result;

/// Leaf collaborator: counts exact matches of one word among the
/// whitespace-separated tokens of one file
pub trait WordCounter: Clone + Send + Sync + 'static {
    fn count(&self, path: &str, word: &str) -> Result<u64>;
}

impl<F> WordCounter for F
where
    F: Fn(&str, &str) -> Result<u64> + Clone + Send + Sync + 'static,
{
    fn count(&self, path: &str, word: &str) -> Result<u64> {
        (self)(path, word)
    }
}

/// Cut a token to at most `max_chars` characters
pub fn truncate_token(token: &str, max_chars: usize) -> &str {
    match token.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &token[..byte_index],
        None => token,
    }
}
