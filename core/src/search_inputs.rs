// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::Config;
use crate::count_matrix::MatrixShape;
use crate::error::{Result, SearchError};
use crate::phrase_splitter::PhraseSplitter;
use tracing::debug;

/// Validated terms and files, fixed for the rest of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchInputs {
    pub terms: Vec<String>,
    pub files: Vec<String>,
}

impl SearchInputs {
    pub fn prepare(config: &Config, phrase: &str, files: Vec<String>) -> Result<Self> {
        let phrase_length = phrase.chars().count();
        if phrase_length > config.max_phrase_length {
            return Err(SearchError::Configuration(format!(
                "search phrase has {} characters, limit is {}",
                phrase_length, config.max_phrase_length
            )));
        }

        let terms = PhraseSplitter::from_config(config).split(phrase);
        if terms.is_empty() && config.require_terms {
            return Err(SearchError::Configuration(
                "search phrase contains no terms".to_string(),
            ));
        }

        if files.is_empty() && config.require_files {
            return Err(SearchError::Configuration("file list is empty".to_string()));
        }
        if files.len() > config.max_files {
            return Err(SearchError::Configuration(format!(
                "{} files given, limit is {}",
                files.len(),
                config.max_files
            )));
        }
        if let Some(position) = files.iter().position(|path| path.is_empty()) {
            return Err(SearchError::Configuration(format!(
                "file path #{} is empty",
                position
            )));
        }

        debug!(terms = terms.len(), files = files.len(), "search inputs prepared");
        Ok(Self { terms, files })
    }

    pub fn shape(&self) -> MatrixShape {
        MatrixShape::new(self.files.len(), self.terms.len())
    }
}
