// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use phrase_search_core::node_message::NodeMessage;
use phrase_search_core::work_receiver::WorkReceiver;
use tokio::sync::mpsc;

pub struct ChannelWorkReceiver {
    pub rx: mpsc::Receiver<NodeMessage>,
}

#[async_trait]
impl WorkReceiver for ChannelWorkReceiver {
    async fn recv(&mut self) -> Option<NodeMessage> {
        self.rx.recv().await
    }
}
