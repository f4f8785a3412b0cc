// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node_message::NodeStatus;
use async_trait::async_trait;

/// Trait for reporting node progress back to the coordinator
#[async_trait]
pub trait StatusSender: Send + Clone + Sync + 'static {
    /// Returns true if the status was delivered
    async fn send(&self, status: NodeStatus) -> bool;
}
