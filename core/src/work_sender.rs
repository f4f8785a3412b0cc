// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::Result;
use crate::node_message::NodeMessage;
use async_trait::async_trait;

/// Coordinator-side endpoint of one node's inbox
/// Different implementations for mpsc, sockets, RPC, etc.
#[async_trait]
pub trait WorkSender: Clone + Send + Sync + 'static {
    /// Deliver a message, suspending while the inbox is full.
    /// Fails once the node has gone away.
    async fn send(&self, message: NodeMessage) -> Result<()>;
}
