// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use phrase_search_core::word_counter::truncate_token;
use std::io::{self, BufRead};

/// Count whitespace-separated tokens equal to `word` after both are cut to
/// `max_token_length` characters. Invalid UTF-8 is replaced, never rejected.
pub fn count_in_reader<R: BufRead>(
    mut reader: R,
    word: &str,
    max_token_length: usize,
) -> io::Result<u64> {
    let word = truncate_token(word, max_token_length);
    if word.is_empty() {
        return Ok(0);
    }

    let mut count = 0;
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        let text = String::from_utf8_lossy(&line);
        count += text
            .split_whitespace()
            .filter(|token| truncate_token(token, max_token_length) == word)
            .count() as u64;
    }
    Ok(count)
}
