// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use phrase_search_core::abort_signal::AbortSignal;
use tokio_util::sync::CancellationToken;

/// Tokio CancellationToken-based abort signal
#[derive(Clone, Default)]
pub struct TokenAbortSignal {
    token: CancellationToken,
}

impl TokenAbortSignal {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }
}

impl AbortSignal for TokenAbortSignal {
    fn abort(&self) {
        self.token.cancel();
    }

    fn is_aborted(&self) -> bool {
        self.token.is_cancelled()
    }

    async fn aborted(&self) {
        self.token.cancelled().await
    }
}
