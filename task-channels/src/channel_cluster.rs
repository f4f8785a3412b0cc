// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::channel_status_sender::ChannelStatusSender;
use crate::channel_work_receiver::ChannelWorkReceiver;
use crate::channel_work_sender::ChannelWorkSender;
use crate::channel_worker_synchronization::ChannelWorkerSynchronization;
use crate::token_abort_signal::TokenAbortSignal;
use crate::tokio_runtime::TokioRuntime;
use phrase_search_core::config::Config;
use phrase_search_core::coordinator::Coordinator;
use phrase_search_core::error::Result;
use phrase_search_core::node::NodeTask;
use phrase_search_core::partitioner::WorkPartitioner;
use phrase_search_core::report::SearchReport;
use phrase_search_core::search_inputs::SearchInputs;
use phrase_search_core::word_counter::WordCounter;
use phrase_search_core::worker_runtime::WorkerRuntime;
use phrase_search_core::worker_synchronization::WorkerSynchronization;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub type ChannelNode<C> = NodeTask<ChannelWorkReceiver, ChannelStatusSender, TokenAbortSignal, C>;

/// A static group of node tasks talking to one coordinator over tokio channels.
/// Rank 0 is the coordinator's own worker.
pub struct ChannelCluster<C: WordCounter> {
    config: Config,
    counter: C,
}

impl<C: WordCounter> ChannelCluster<C> {
    pub fn new(config: Config, counter: C) -> Self {
        Self { config, counter }
    }

    /// One complete run; nothing survives between calls
    pub async fn run(&self, phrase: &str, files: Vec<String>) -> Result<SearchReport> {
        self.config.validate()?;
        // Reject bad input before any node exists
        let inputs = SearchInputs::prepare(&self.config, phrase, files)?;
        WorkPartitioner::new(self.config.partitioning, self.config.num_nodes)?
            .check(inputs.shape())?;

        let num_nodes = self.config.num_nodes;
        let capacity = self.config.channel_capacity;
        let abort = TokenAbortSignal::new(CancellationToken::new());
        let synchronization = ChannelWorkerSynchronization::setup(num_nodes, capacity);

        let mut senders = Vec::with_capacity(num_nodes);
        let mut handles = Vec::with_capacity(num_nodes);
        for rank in 0..num_nodes {
            let (sender, receiver) = ChannelWorkSender::create_pair(capacity);
            let node: ChannelNode<C> = NodeTask::new(
                rank,
                receiver,
                synchronization.get_status_sender(rank),
                abort.clone(),
                self.counter.clone(),
            );
            handles.push(TokioRuntime::spawn(node));
            senders.push(sender);
        }
        info!(nodes = num_nodes, "node group started");

        let mut coordinator =
            Coordinator::new(self.config.clone(), senders, synchronization, abort);
        let result = coordinator.run(inputs).await;
        drop(coordinator);

        for (rank, handle) in handles.into_iter().enumerate() {
            if let Err(e) = <TokioRuntime as WorkerRuntime<ChannelNode<C>>>::join(handle).await {
                warn!(rank, error = %e, "node task shutdown failed");
            }
        }
        result
    }
}
