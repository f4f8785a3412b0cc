// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::channel_status_sender::ChannelStatusSender;
use phrase_search_core::node_message::NodeStatus;
use phrase_search_core::worker_synchronization::WorkerSynchronization;
use tokio::sync::mpsc::{self, Sender};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{StreamExt, StreamMap};

/// Channel-based status collection using one tokio mpsc per rank and a StreamMap
pub struct ChannelWorkerSynchronization {
    status_txs: Vec<Sender<NodeStatus>>,
    status_streams: StreamMap<usize, ReceiverStream<NodeStatus>>,
}

impl WorkerSynchronization for ChannelWorkerSynchronization {
    type StatusSender = ChannelStatusSender;

    fn setup(num_workers: usize, capacity: usize) -> Self {
        let mut status_txs = Vec::with_capacity(num_workers);
        let mut status_streams = StreamMap::new();

        for worker_idx in 0..num_workers {
            let (tx, rx) = mpsc::channel::<NodeStatus>(capacity);
            status_txs.push(tx);
            status_streams.insert(worker_idx, ReceiverStream::new(rx));
        }

        Self {
            status_txs,
            status_streams,
        }
    }

    fn get_status_sender(&self, worker_id: usize) -> Self::StatusSender {
        ChannelStatusSender {
            tx: self.status_txs[worker_id].clone(),
        }
    }

    async fn wait_next(&mut self) -> Option<(usize, NodeStatus)> {
        // The stream key is the rank; nodes never name themselves
        self.status_streams.next().await
    }
}
