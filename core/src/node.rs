// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::abort_signal::AbortSignal;
use crate::aggregator::{build_partial, AggregationStrategy};
use crate::count_matrix::MatrixShape;
use crate::error::{Result, SearchError};
use crate::node_message::{InputHeader, InputPayload, NodeMessage, NodeStatus};
use crate::partitioner::{Assignment, WorkPartitioner};
use crate::status_sender::StatusSender;
use crate::word_counter::WordCounter;
use crate::work_receiver::WorkReceiver;
use crate::worker_runtime::WorkerTask;
use async_trait::async_trait;
use tokio::task;
use tracing::{debug, error, info};

/// The worker role every member of the group plays, the coordinator's own
/// rank included. Generic over inbox, status channel, abort signal and counter.
pub struct NodeTask<R, S, A, C> {
    rank: usize,
    work_rx: R,
    status: S,
    abort: A,
    counter: C,
}

impl<R, S, A, C> NodeTask<R, S, A, C>
where
    R: WorkReceiver,
    S: StatusSender,
    A: AbortSignal,
    C: WordCounter,
{
    pub fn new(rank: usize, work_rx: R, status: S, abort: A, counter: C) -> Self {
        Self {
            rank,
            work_rx,
            status,
            abort,
            counter,
        }
    }

    async fn execute(&mut self) -> Result<()> {
        // Distribution: sizes first, then the payload they describe
        let header = match self.next_message().await? {
            NodeMessage::Announce(header) => header,
            other => return Err(self.unexpected("announce", &other)),
        };
        let payload = match self.next_message().await? {
            NodeMessage::Payload(payload) => payload,
            other => return Err(self.unexpected("payload", &other)),
        };
        check_payload(&header, &payload)?;
        debug!(
            rank = self.rank,
            words = header.num_words,
            files = header.num_files,
            "inputs received"
        );
        self.report(NodeStatus::Ready).await?;

        let aggregation = match self.next_message().await? {
            NodeMessage::Begin(aggregation) => aggregation,
            other => return Err(self.unexpected("begin", &other)),
        };

        let shape = MatrixShape::new(header.num_files, header.num_words);
        let partitioner = WorkPartitioner::new(header.partitioning, header.num_nodes)?;
        let assignment = partitioner.assignment(self.rank, shape)?;
        let counts = self.count_assigned(&assignment, shape, &payload).await?;
        info!(rank = self.rank, items = counts.len(), "counting finished");

        self.send_partial(aggregation, &assignment, shape, counts)
            .await
    }

    /// Each count runs on the blocking pool so peers keep making progress
    /// and an abort is observed while a slow file is still being read
    async fn count_assigned(
        &mut self,
        assignment: &Assignment,
        shape: MatrixShape,
        payload: &InputPayload,
    ) -> Result<Vec<u64>> {
        let rank = self.rank;
        let items = assignment.items(shape);
        let mut counts = Vec::with_capacity(items.len());
        for item in items {
            if self.abort.is_aborted() {
                return Err(SearchError::Aborted);
            }
            let path = &payload.files[item.file];
            let word = &payload.words[item.word];
            let job = {
                let counter = self.counter.clone();
                let (path, word) = (path.clone(), word.clone());
                task::spawn_blocking(move || counter.count(&path, &word))
            };
            let count = tokio::select! {
                biased;
                _ = self.abort.aborted() => return Err(SearchError::Aborted),
                joined = job => joined.map_err(|e| {
                    if e.is_panic() {
                        SearchError::NodePanicked { rank }
                    } else {
                        SearchError::Aborted
                    }
                })??,
            };
            debug!(rank, file = %path, word = %word, count, "counted");
            counts.push(count);
        }
        Ok(counts)
    }

    async fn send_partial(
        &mut self,
        aggregation: AggregationStrategy,
        assignment: &Assignment,
        shape: MatrixShape,
        counts: Vec<u64>,
    ) -> Result<()> {
        let partial = build_partial(aggregation, assignment, shape, counts);
        self.report(NodeStatus::Completed(partial)).await
    }

    async fn next_message(&mut self) -> Result<NodeMessage> {
        let rank = self.rank;
        tokio::select! {
            biased;
            _ = self.abort.aborted() => Err(SearchError::Aborted),
            message = self.work_rx.recv() => message.ok_or_else(|| {
                SearchError::Disconnected(format!("inbox of node {} closed", rank))
            }),
        }
    }

    async fn report(&mut self, status: NodeStatus) -> Result<()> {
        if self.status.send(status).await {
            Ok(())
        } else {
            Err(SearchError::Disconnected(format!(
                "coordinator stopped listening to node {}",
                self.rank
            )))
        }
    }

    fn unexpected(&self, expected: &str, received: &NodeMessage) -> SearchError {
        SearchError::Protocol(format!(
            "node {} expected {} but received {}",
            self.rank,
            expected,
            received.kind()
        ))
    }
}

/// Payload lengths must match the announced counts exactly
pub fn check_payload(header: &InputHeader, payload: &InputPayload) -> Result<()> {
    if payload.words.len() != header.num_words {
        return Err(SearchError::size_mismatch(
            "word list",
            header.num_words,
            payload.words.len(),
        ));
    }
    if payload.files.len() != header.num_files {
        return Err(SearchError::size_mismatch(
            "file list",
            header.num_files,
            payload.files.len(),
        ));
    }
    Ok(())
}

#[async_trait]
impl<R, S, A, C> WorkerTask for NodeTask<R, S, A, C>
where
    R: WorkReceiver,
    S: StatusSender,
    A: AbortSignal,
    C: WordCounter,
{
    type Output = ();

    async fn run(mut self) -> Self::Output {
        let Err(err) = self.execute().await else {
            return;
        };

        let root_cause = !err.is_secondary();
        if root_cause {
            error!(rank = self.rank, error = %err, "❌ node failed, aborting run");
        } else {
            debug!(rank = self.rank, "node stopping after abort");
        }
        // Report before aborting so the root cause is queued ahead of the abort
        let _ = self.status.send(NodeStatus::Failed(err)).await;
        if root_cause {
            self.abort.abort();
        }
    }
}
