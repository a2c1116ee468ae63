// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;
use core::future::Future;

/// Runs detached futures on behalf of a primitive.
///
/// Implementations must accept `spawn` from any thread, including threads that
/// are not themselves driven by the runtime: a debounced trigger may well be
/// poked from a plain OS thread.
pub trait Executor: Clone + Send + Sync + Debug + 'static {
    /// The executor for the calling context.
    ///
    /// # Panics
    /// Implementations that bind to a runtime handle panic when called outside
    /// of that runtime; use an explicit constructor there instead.
    fn current() -> Self;

    /// Spawn `future` and forget about it.
    fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static;
}
