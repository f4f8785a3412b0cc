// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::channel_work_receiver::ChannelWorkReceiver;
use async_trait::async_trait;
use phrase_search_core::error::{Result, SearchError};
use phrase_search_core::node_message::NodeMessage;
use phrase_search_core::work_sender::WorkSender;
use tokio::sync::mpsc::{self, Sender};

/// Tokio mpsc channel-based node inbox
#[derive(Clone)]
pub struct ChannelWorkSender {
    tx: Sender<NodeMessage>,
}

impl ChannelWorkSender {
    pub fn create_pair(buffer: usize) -> (Self, ChannelWorkReceiver) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, ChannelWorkReceiver { rx })
    }
}

#[async_trait]
impl WorkSender for ChannelWorkSender {
    async fn send(&self, message: NodeMessage) -> Result<()> {
        let kind = message.kind();
        self.tx.send(message).await.map_err(|_| {
            SearchError::Disconnected(format!("node inbox closed before {} was delivered", kind))
        })
    }
}
