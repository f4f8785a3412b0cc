// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod channel_cluster;
pub mod channel_status_sender;
pub mod channel_work_receiver;
pub mod channel_work_sender;
pub mod channel_worker_synchronization;
pub mod token_abort_signal;
pub mod tokio_runtime;

pub use channel_cluster::ChannelCluster;
