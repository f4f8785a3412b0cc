// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;

/// Defines a unit of work that can be executed
#[async_trait]
pub trait WorkerTask: Send + 'static {
    type Output;
    async fn run(self) -> Self::Output;
}

/// Trait for abstracting worker runtime (tasks, threads, processes)
pub trait WorkerRuntime<T>: Send + 'static {
    type Handle: Send;
    type Error: std::fmt::Display + Send;

    /// Spawn a node task
    fn spawn(task: T) -> Self::Handle;

    /// Wait for the node task to complete
    fn join(
        handle: Self::Handle,
    ) -> impl std::future::Future<Output = Result<(), Self::Error>> + Send;
}
