// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use core::future::Future;
use core::panic::AssertUnwindSafe;
use futures::FutureExt;
use lull_core::{CancellationToken, Completion, LullError, Mutex};
use lull_runtime::{DefaultRuntime, Executor, Runtime};
use std::error::Error;
use std::panic;
use std::sync::Arc;

type TokenResolver = Box<dyn Fn() -> CancellationToken + Send + Sync>;

/// Fire-and-forget sequencer.
pub type TaskSequencer<R = DefaultRuntime> = Sequencer<(), R>;

/// Runs units of work that supersede each other behind one completion handle.
///
/// Each [`next`](Self::next) cancels the unit started before it, starts the
/// new one on the executor and returns the external [`Completion`]. Only the
/// most recently started unit may settle that completion; a superseded unit's
/// outcome is discarded when it arrives, even if it ran to success.
///
/// Cancellation is cooperative. A unit that ignores its token runs to the end,
/// and its result is dropped because it is no longer current.
///
/// The completion is shared across generations until it settles. The first
/// `next` after it settled installs a fresh one, so callers never get a handle
/// that already resolved for an older generation.
///
/// # Example
///
/// ```rust
/// use lull_exec::Sequencer;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> lull_core::Result<()> {
/// let search = Sequencer::new();
///
/// search.next(|cancel| async move {
///     tokio::select! {
///         _ = cancel.cancelled() => Err(std::io::Error::other("stale")),
///         _ = tokio::time::sleep(Duration::from_secs(10)) => Ok("lu"),
///     }
/// });
/// let completion = search.next(|_| async { Ok::<_, std::io::Error>("lull") });
///
/// assert_eq!(completion.wait().await?, "lull");
/// # Ok(())
/// # }
/// ```
pub struct Sequencer<T, R: Runtime = DefaultRuntime> {
    executor: R::Executor,
    resolver: TokenResolver,
    shared: Arc<Mutex<SequenceState<T>>>,
}

struct SequenceState<T> {
    current: Option<Current>,
    completion: Completion<T>,
    generation: u64,
    disposed: bool,
}

struct Current {
    generation: u64,
    token: CancellationToken,
}

impl<T> SequenceState<T> {
    fn is_current(&self, generation: u64) -> bool {
        self.current
            .as_ref()
            .is_some_and(|current| current.generation == generation)
    }
}

impl<T> Sequencer<T>
where
    T: Send + 'static,
{
    /// Sequencer whose units are never cancelled from outside.
    ///
    /// # Panics
    /// When no executor can be resolved from the calling context.
    pub fn new() -> Self {
        Self::with_token_resolver(CancellationToken::new)
    }

    /// Sequencer linking every unit's token to the token `resolver` returns
    /// when the unit starts.
    ///
    /// # Panics
    /// When no executor can be resolved from the calling context.
    pub fn with_token_resolver<F>(resolver: F) -> Self
    where
        F: Fn() -> CancellationToken + Send + Sync + 'static,
    {
        Self::with_executor_and_resolver(
            <DefaultRuntime as Runtime>::Executor::current(),
            resolver,
        )
    }
}

impl<T> Default for Sequencer<T>
where
    T: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> Sequencer<T, R>
where
    T: Send + 'static,
    R: Runtime,
{
    pub fn with_executor(executor: R::Executor) -> Self {
        Self::with_executor_and_resolver(executor, CancellationToken::new)
    }

    pub fn with_executor_and_resolver<F>(executor: R::Executor, resolver: F) -> Self
    where
        F: Fn() -> CancellationToken + Send + Sync + 'static,
    {
        Self {
            executor,
            resolver: Box::new(resolver),
            shared: Arc::new(Mutex::new(SequenceState {
                current: None,
                completion: Completion::new(),
                generation: 0,
                disposed: false,
            })),
        }
    }

    /// Supersede the current unit of work with `work`.
    ///
    /// `work` is called right away with a fresh token, linked to the resolver's
    /// token; the future it returns is driven on the executor. Its outcome
    /// settles the returned completion as long as no later `next` (or
    /// `dispose`) came in between:
    ///
    /// - `Ok(value)` succeeds
    /// - `Err(_)` once its token was cancelled settles as
    ///   [`LullError::Cancelled`]
    /// - any other `Err(e)` fails with [`LullError::UserError`]
    ///
    /// A panic in `work` itself, or in its future, fails the completion with
    /// [`LullError::TaskPanicked`] if the unit is still current.
    ///
    /// After `dispose` this starts nothing and returns the settled completion.
    pub fn next<F, Fut, E>(&self, work: F) -> Completion<T>
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = core::result::Result<T, E>> + Send + 'static,
        E: Error + Send + Sync + 'static,
    {
        let parent = (self.resolver)();

        let (generation, token, completion) = {
            let mut state = self.shared.lock();
            if state.disposed {
                return state.completion.clone();
            }

            if let Some(previous) = state.current.take() {
                debug!(generation = previous.generation, "unit of work superseded");
                previous.token.cancel();
            }
            if state.completion.is_settled() {
                state.completion = Completion::new();
            }

            state.generation += 1;
            let generation = state.generation;
            let token = parent.child_token();
            state.current = Some(Current {
                generation,
                token: token.clone(),
            });
            (generation, token, state.completion.clone())
        };

        let run = match panic::catch_unwind(AssertUnwindSafe(|| work(token.clone()))) {
            Ok(run) => run,
            Err(payload) => {
                let mut state = self.shared.lock();
                if state.is_current(generation) {
                    state.current = None;
                    completion.settle(Err(LullError::task_panicked(panic_message(
                        payload.as_ref(),
                    ))));
                }
                return completion;
            }
        };
        let shared = Arc::clone(&self.shared);
        let settles = completion.clone();

        self.executor.spawn(async move {
            let outcome = AssertUnwindSafe(run).catch_unwind().await;

            let mut state = shared.lock();
            if !state.is_current(generation) {
                debug!(generation, "discarding outcome of superseded unit of work");
                return;
            }
            state.current = None;

            let result = match outcome {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(_)) if token.is_cancelled() => {
                    Err(LullError::cancelled("unit of work cancelled"))
                }
                Ok(Err(error)) => Err(LullError::user_error(error)),
                Err(payload) => Err(LullError::task_panicked(panic_message(payload.as_ref()))),
            };
            // Settled under the lock: a concurrent `next` must not adopt this
            // completion between the currency check and the settle
            settles.settle(result);
        });

        completion
    }

    /// The external completion handle.
    pub fn completion(&self) -> Completion<T> {
        self.shared.lock().completion.clone()
    }

    /// Cancel the current unit of work. It stays current, so its cancellation
    /// (or whatever it returns instead) still settles the completion.
    ///
    /// Returns whether a unit was in flight.
    pub fn cancel(&self) -> bool {
        let state = self.shared.lock();
        match &state.current {
            Some(current) => {
                current.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Units of work started so far.
    pub fn generation(&self) -> u64 {
        self.shared.lock().generation
    }

    /// Whether a unit of work is in flight and current.
    pub fn is_running(&self) -> bool {
        self.shared.lock().current.is_some()
    }

    /// Cancel the current unit and settle a pending completion as cancelled.
    /// Idempotent; returns `true` the first time.
    pub fn dispose(&self) -> bool {
        let mut state = self.shared.lock();
        if state.disposed {
            return false;
        }

        state.disposed = true;
        if let Some(current) = state.current.take() {
            current.token.cancel();
        }
        state.completion.cancel("sequencer disposed");
        debug!("sequencer disposed");
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }
}

impl<T, R: Runtime> Drop for Sequencer<T, R> {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.disposed = true;
        if let Some(current) = state.current.take() {
            current.token.cancel();
        }
        state.completion.cancel("sequencer dropped");
    }
}

impl<T, R: Runtime> fmt::Debug for Sequencer<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("Sequencer")
            .field("generation", &state.generation)
            .field("running", &state.current.is_some())
            .field("settled", &state.completion.is_settled())
            .field("disposed", &state.disposed)
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unit of work panicked".to_string()
    }
}
