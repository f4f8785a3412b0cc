// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use phrase_search_core::node_message::NodeStatus;
use phrase_search_core::status_sender::StatusSender;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct ChannelStatusSender {
    pub tx: mpsc::Sender<NodeStatus>,
}

#[async_trait]
impl StatusSender for ChannelStatusSender {
    async fn send(&self, status: NodeStatus) -> bool {
        self.tx.send(status).await.is_ok()
    }
}
