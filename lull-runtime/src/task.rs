// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Executor-agnostic task spawning with cooperative cancellation.

use crate::executor::Executor;
use core::future::Future;
use lull_core::CancellationToken;

/// Task handle with automatic cancellation on drop.
///
/// The spawned future receives a `CancellationToken` that it should monitor.
/// When the `LullTask` is dropped or manually cancelled, the token is
/// signaled; the future is expected to notice and return.
///
/// # Example
///
/// ```rust
/// use lull_runtime::{Executor, LullTask, TokioExecutor};
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = LullTask::spawn(&TokioExecutor::current(), |cancel| async move {
///     cancel.cancelled().await;
/// });
///
/// assert!(!task.is_cancelled());
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
pub struct LullTask {
    cancel: CancellationToken,
}

impl LullTask {
    /// Spawn `f(token)` on `executor`.
    pub fn spawn<E, F, Fut>(executor: &E, f: F) -> Self
    where
        E: Executor,
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        executor.spawn(f(cancel.clone()));
        Self { cancel }
    }

    /// Signal the task to stop without waiting for it.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for LullTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
