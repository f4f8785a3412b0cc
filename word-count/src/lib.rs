// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod file_word_counter;
pub use file_word_counter::FileWordCounter;

mod in_memory_word_counter;
pub use in_memory_word_counter::InMemoryWordCounter;

pub mod tokenizer;
