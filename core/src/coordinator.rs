// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::abort_signal::AbortSignal;
use crate::aggregator::ResultAggregator;
use crate::config::Config;
use crate::error::{Result, SearchError};
use crate::node_message::{InputHeader, InputPayload, NodeMessage, NodeStatus};
use crate::partitioner::WorkPartitioner;
use crate::report::SearchReport;
use crate::search_inputs::SearchInputs;
use crate::work_sender::WorkSender;
use crate::worker_synchronization::WorkerSynchronization;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, error, info};

/// How long to keep draining statuses for the root cause after an abort
const ROOT_CAUSE_DRAIN: Duration = Duration::from_millis(50);

/// Drives one run over a static group: distributes the inputs, releases the
/// counting phase and aggregates the partial results.
///
/// Each phase is a barrier: the coordinator does not move on until every
/// rank has reported for the current one.
pub struct Coordinator<W, CS, A>
where
    W: WorkSender,
    CS: WorkerSynchronization,
    A: AbortSignal,
{
    config: Config,
    senders: Vec<W>,
    synchronization: CS,
    abort: A,
}

impl<W, CS, A> Coordinator<W, CS, A>
where
    W: WorkSender,
    CS: WorkerSynchronization,
    A: AbortSignal,
{
    /// `senders[rank]` must reach the node with that rank
    pub fn new(config: Config, senders: Vec<W>, synchronization: CS, abort: A) -> Self {
        Self {
            config,
            senders,
            synchronization,
            abort,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.senders.len()
    }

    /// Run to completion, or abort every node on the first failure
    pub async fn run(&mut self, inputs: SearchInputs) -> Result<SearchReport> {
        match self.execute(inputs).await {
            Ok(report) => Ok(report),
            Err(err) => {
                self.abort.abort();
                let err = if err.is_secondary() {
                    self.root_cause().await.unwrap_or(err)
                } else {
                    err
                };
                error!(error = %err, "run aborted");
                Err(err)
            }
        }
    }

    async fn execute(&mut self, inputs: SearchInputs) -> Result<SearchReport> {
        let shape = inputs.shape();
        let partitioner = WorkPartitioner::new(self.config.partitioning, self.num_nodes())?;
        partitioner.check(shape)?;

        info!(
            nodes = self.num_nodes(),
            words = shape.words,
            files = shape.files,
            "=== DISTRIBUTION PHASE ==="
        );
        let header = InputHeader {
            num_words: shape.words,
            num_files: shape.files,
            num_nodes: self.num_nodes(),
            partitioning: partitioner.strategy(),
        };
        self.broadcast(NodeMessage::Announce(header)).await?;
        let payload = InputPayload {
            words: inputs.terms.clone(),
            files: inputs.files.clone(),
        };
        self.broadcast(NodeMessage::Payload(payload)).await?;
        self.await_ready().await?;

        info!(aggregation = ?self.config.aggregation, "=== COUNTING PHASE ===");
        self.broadcast(NodeMessage::Begin(self.config.aggregation))
            .await?;

        let mut aggregator = ResultAggregator::new(partitioner, shape, self.config.aggregation);
        while !aggregator.is_complete() {
            match self.next_status().await? {
                (rank, NodeStatus::Completed(partial)) => {
                    if partial.rank != rank {
                        return Err(SearchError::Protocol(format!(
                            "result tagged rank {} arrived from rank {}",
                            partial.rank, rank
                        )));
                    }
                    aggregator.accept(partial)?;
                    debug!(rank, received = aggregator.received(), "partial result accepted");
                }
                (_, NodeStatus::Failed(err)) => return Err(err),
                (rank, NodeStatus::Ready) => {
                    return Err(SearchError::Protocol(format!(
                        "rank {} reported ready twice",
                        rank
                    )))
                }
            }
        }

        info!("=== AGGREGATION PHASE ===");
        let matrix = aggregator.finish()?;
        Ok(SearchReport::new(inputs.terms, inputs.files, matrix))
    }

    /// Send the same message to every rank in rank order
    async fn broadcast(&self, message: NodeMessage) -> Result<()> {
        for sender in &self.senders {
            tokio::select! {
                biased;
                _ = self.abort.aborted() => return Err(SearchError::Aborted),
                sent = sender.send(message.clone()) => sent?,
            }
        }
        Ok(())
    }

    async fn await_ready(&mut self) -> Result<()> {
        let mut pending: BTreeSet<usize> = (0..self.num_nodes()).collect();
        while !pending.is_empty() {
            match self.next_status().await? {
                (rank, NodeStatus::Ready) => {
                    if !pending.remove(&rank) {
                        return Err(SearchError::Protocol(format!(
                            "rank {} reported ready twice",
                            rank
                        )));
                    }
                }
                (_, NodeStatus::Failed(err)) => return Err(err),
                (rank, NodeStatus::Completed(_)) => {
                    return Err(SearchError::Protocol(format!(
                        "rank {} reported counts before the counting phase",
                        rank
                    )))
                }
            }
        }
        debug!("every node holds the inputs");
        Ok(())
    }

    async fn next_status(&mut self) -> Result<(usize, NodeStatus)> {
        tokio::select! {
            biased;
            status = self.synchronization.wait_next() => status.ok_or_else(|| {
                SearchError::Disconnected("every node stopped reporting".to_string())
            }),
            _ = self.abort.aborted() => Err(SearchError::Aborted),
        }
    }

    /// After an abort, find the failure that caused it among queued statuses
    async fn root_cause(&mut self) -> Option<SearchError> {
        while let Ok(Some((rank, status))) =
            tokio::time::timeout(ROOT_CAUSE_DRAIN, self.synchronization.wait_next()).await
        {
            if let NodeStatus::Failed(err) = status {
                if !err.is_secondary() {
                    debug!(rank, "root cause found");
                    return Some(err);
                }
            }
        }
        None
    }
}
