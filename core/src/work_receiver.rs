// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::node_message::NodeMessage;
use async_trait::async_trait;

/// Node-side endpoint of its inbox
#[async_trait]
pub trait WorkReceiver: Send + 'static {
    /// Receive the next message from the coordinator
    /// Returns None if the channel is closed
    async fn recv(&mut self) -> Option<NodeMessage>;
}
