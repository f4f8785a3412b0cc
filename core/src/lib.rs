// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod abort_signal;
pub mod aggregator;
pub mod config;
pub mod coordinator;
pub mod count_matrix;
pub mod error;
pub mod logging;
pub mod node;
pub mod node_message;
pub mod partitioner;
pub mod phrase_splitter;
pub mod report;
pub mod search_inputs;
pub mod sequential;
pub mod status_sender;
pub mod word_counter;
pub mod work_receiver;
pub mod work_sender;
pub mod worker_runtime;
pub mod worker_synchronization;

pub use error::{Result, SearchError};
