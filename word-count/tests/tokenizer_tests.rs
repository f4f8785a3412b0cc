// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use phrase_search_word_count::tokenizer::count_in_reader;

fn count(text: &str, word: &str, max: usize) -> u64 {
    count_in_reader(text.as_bytes(), word, max).unwrap()
}

#[test]
fn test_counts_whole_tokens_only() {
    assert_eq!(count("example example text", "example", 255), 2);
    assert_eq!(count("examples example, example", "example", 255), 1);
    assert_eq!(count("Example example", "example", 255), 1);
}

#[test]
fn test_any_whitespace_separates_tokens() {
    assert_eq!(count("a\tb\na\r\n  a\n\nb", "a", 255), 3);
    assert_eq!(count("last line without newline a", "a", 255), 1);
}

#[test]
fn test_empty_inputs() {
    assert_eq!(count("", "word", 255), 0);
    assert_eq!(count("word word", "", 255), 0);
}

#[test]
fn test_long_tokens_compare_on_their_prefix() {
    // Both sides are cut to 4 characters before comparing
    assert_eq!(count("abcdef abcdxx abc", "abcdzz", 4), 2);
    assert_eq!(count("abc", "abcdzz", 4), 0);
}

#[test]
fn test_overlong_token_is_counted_once() {
    // The tail of a cut token is dropped, not read as another token
    let long = "ab".repeat(6);
    assert_eq!(count(&long, "ab", 2), 1);
    assert_eq!(count(&long, "abab", 4), 1);
}

#[test]
fn test_invalid_utf8_is_replaced_not_rejected() {
    let bytes: &[u8] = b"word \xff\xfe word\n";
    assert_eq!(count_in_reader(bytes, "word", 255).unwrap(), 2);
}
