// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node_message::NodeStatus;
use crate::status_sender::StatusSender;
use std::future::Future;

/// Coordinator-side collection point for node statuses, keyed by rank
/// This allows different implementations for tasks, threads, and processes
pub trait WorkerSynchronization: Send {
    type StatusSender: StatusSender;

    /// Setup one status stream per node
    fn setup(num_workers: usize, capacity: usize) -> Self;

    /// Get the status sender handed to a specific node
    fn get_status_sender(&self, worker_id: usize) -> Self::StatusSender;

    /// Wait for the next status from any node, tagged with its rank
    /// Returns None once every node has hung up
    fn wait_next(&mut self) -> impl Future<Output = Option<(usize, NodeStatus)>> + Send;
}
