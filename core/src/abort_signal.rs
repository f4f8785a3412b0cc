// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::future::Future;

/// Run-wide abort flag shared by the coordinator and every node
pub trait AbortSignal: Clone + Send + Sync + 'static {
    /// Abort the whole run; idempotent
    fn abort(&self);

    fn is_aborted(&self) -> bool;

    /// Resolves once the run has been aborted
    fn aborted(&self) -> impl Future<Output = ()> + Send;
}
