// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use core::future::Future;
use futures::future::BoxFuture;
use futures::FutureExt;
use lull_core::{LullError, Mutex, Result};
use std::error::Error;
use std::sync::{Arc, Weak};

type BoxError = Box<dyn Error + Send + Sync>;
type Action<S> =
    Box<dyn Fn(Arc<S>) -> BoxFuture<'static, core::result::Result<(), BoxError>> + Send + Sync>;

/// Configuration of a [`RunQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunQueueConfig {
    /// Follow-up runs that may be promised while one run is in flight.
    pub queue_limit: usize,
}

impl RunQueueConfig {
    pub fn new(queue_limit: usize) -> Self {
        Self { queue_limit }
    }

    /// # Errors
    /// Returns [`LullError::InvalidConfig`] when `queue_limit` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.queue_limit == 0 {
            return Err(LullError::invalid_config("queue_limit must be at least 1"));
        }
        Ok(())
    }
}

impl Default for RunQueueConfig {
    fn default() -> Self {
        Self::new(1)
    }
}

/// What a [`RunQueue::run_async`] call ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The queue was idle; this call ran the action `runs` times, the first
    /// run plus every follow-up promised while it was busy.
    Executed { runs: usize },
    /// A run was in flight; a follow-up run is promised.
    Queued,
    /// A run was in flight and the queue was full; nothing was promised.
    Dropped,
    Disposed,
    /// The target was gone; the queue disposed itself.
    TargetDropped,
}

impl RunOutcome {
    /// Whether the call will lead to a run that starts after it was made.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Executed { .. } | Self::Queued)
    }
}

// Counting gate with `queue_limit + 1` slots. All slots free means idle; the
// running call holds one, each promised follow-up holds one.
#[derive(Debug)]
enum Gate {
    Live { available: usize },
    Released,
}

enum Claim {
    Execute,
    Queued,
    Dropped,
    Disposed,
}

/// Serializes an idempotent action on a weakly held target.
///
/// At most one run of the action is in flight. Calls arriving while it runs
/// claim one of `queue_limit` follow-up slots, or are dropped once those are
/// taken. When a run finishes, one follow-up slot is consumed and the action
/// runs again, so any number of calls collapses into at most `queue_limit`
/// further runs.
///
/// The call that found the queue idle drives every run, follow-ups included;
/// it returns once the queue is idle again.
///
/// The target is held weakly. Once it has been dropped the queue disposes
/// itself instead of running.
///
/// # Example
///
/// ```rust
/// use lull_exec::{RunOutcome, RunQueue};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// # #[tokio::main]
/// # async fn main() -> lull_core::Result<()> {
/// let index = Arc::new(AtomicUsize::new(0));
/// let queue = RunQueue::new(&index, |index: Arc<AtomicUsize>| async move {
///     index.fetch_add(1, Ordering::SeqCst);
///     Ok::<(), std::io::Error>(())
/// });
///
/// assert_eq!(queue.run_async().await?, RunOutcome::Executed { runs: 1 });
/// assert_eq!(index.load(Ordering::SeqCst), 1);
/// # Ok(())
/// # }
/// ```
pub struct RunQueue<S> {
    target: Weak<S>,
    action: Action<S>,
    capacity: usize,
    gate: Mutex<Gate>,
}

impl<S> RunQueue<S>
where
    S: Send + Sync + 'static,
{
    /// Queue with room for one follow-up run.
    pub fn new<F, Fut, E>(target: &Arc<S>, action: F) -> Self
    where
        F: Fn(Arc<S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = core::result::Result<(), E>> + Send + 'static,
        E: Error + Send + Sync + 'static,
    {
        Self::from_parts(target, RunQueueConfig::default(), action)
    }

    /// # Errors
    /// Returns [`LullError::InvalidConfig`] when `config` does not validate.
    pub fn with_config<F, Fut, E>(target: &Arc<S>, config: RunQueueConfig, action: F) -> Result<Self>
    where
        F: Fn(Arc<S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = core::result::Result<(), E>> + Send + 'static,
        E: Error + Send + Sync + 'static,
    {
        config.validate()?;
        Ok(Self::from_parts(target, config, action))
    }

    fn from_parts<F, Fut, E>(target: &Arc<S>, config: RunQueueConfig, action: F) -> Self
    where
        F: Fn(Arc<S>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = core::result::Result<(), E>> + Send + 'static,
        E: Error + Send + Sync + 'static,
    {
        let capacity = config.queue_limit + 1;
        Self {
            target: Arc::downgrade(target),
            action: Box::new(move |target| {
                let run = action(target);
                async move { run.await.map_err(|e| Box::new(e) as BoxError) }.boxed()
            }),
            capacity,
            gate: Mutex::new(Gate::Live {
                available: capacity,
            }),
        }
    }
}

impl<S> RunQueue<S> {
    /// Run the action, promise a follow-up run, or drop the request.
    ///
    /// # Errors
    /// When this call drove the runs and one of them failed, returns the first
    /// failure as [`LullError::UserError`]. Promised follow-ups still run.
    pub async fn run_async(&self) -> Result<RunOutcome> {
        match self.claim() {
            Claim::Execute => {}
            Claim::Queued => return Ok(RunOutcome::Queued),
            Claim::Dropped => {
                debug!("run queue full, request dropped");
                return Ok(RunOutcome::Dropped);
            }
            Claim::Disposed => return Ok(RunOutcome::Disposed),
        }

        let mut guard = DrainGuard {
            queue: self,
            finished: false,
        };
        let mut runs = 0;
        let mut first_error = None;

        loop {
            let Some(target) = self.target.upgrade() else {
                warn!("run queue target dropped, disposing");
                guard.finished = true;
                self.dispose();
                return match first_error {
                    Some(error) => Err(error),
                    None => Ok(RunOutcome::TargetDropped),
                };
            };

            runs += 1;
            if let Err(error) = (self.action)(target).await {
                debug!("run queue action failed: {}", error);
                first_error.get_or_insert(LullError::UserError(error));
            }

            if !self.finish_run() {
                break;
            }
        }

        guard.finished = true;
        match first_error {
            Some(error) => Err(error),
            None => Ok(RunOutcome::Executed { runs }),
        }
    }

    /// Blocking [`run_async`](Self::run_async).
    ///
    /// Must not be called from inside the action or from an async context
    /// driven by the same thread: waiting on a run that cannot progress
    /// deadlocks.
    ///
    /// # Errors
    /// Same as [`run_async`](Self::run_async).
    pub fn run(&self) -> Result<RunOutcome> {
        futures::executor::block_on(self.run_async())
    }

    fn claim(&self) -> Claim {
        let mut gate = self.gate.lock();
        match &mut *gate {
            Gate::Released => Claim::Disposed,
            Gate::Live { available: 0 } => Claim::Dropped,
            Gate::Live { available } => {
                let idle = *available == self.capacity;
                *available -= 1;
                if idle {
                    Claim::Execute
                } else {
                    Claim::Queued
                }
            }
        }
    }

    // Hand the finished run's slot over to one promised follow-up, or go idle.
    // Returns whether another run is due.
    fn finish_run(&self) -> bool {
        let mut gate = self.gate.lock();
        match &mut *gate {
            Gate::Live { available } if *available + 1 < self.capacity => {
                *available += 1;
                true
            }
            Gate::Live { available } => {
                *available = self.capacity;
                false
            }
            Gate::Released => false,
        }
    }

    /// Whether a run is in flight.
    pub fn is_running(&self) -> bool {
        matches!(&*self.gate.lock(), Gate::Live { available } if *available < self.capacity)
    }

    /// Follow-up runs promised to callers so far.
    pub fn pending(&self) -> usize {
        match &*self.gate.lock() {
            Gate::Live { available } => (self.capacity - available).saturating_sub(1),
            Gate::Released => 0,
        }
    }

    pub fn queue_limit(&self) -> usize {
        self.capacity - 1
    }

    /// Release the gate. Promised follow-ups are abandoned; a run in flight
    /// completes. Idempotent; returns `true` the first time.
    pub fn dispose(&self) -> bool {
        let mut gate = self.gate.lock();
        if matches!(*gate, Gate::Released) {
            return false;
        }
        *gate = Gate::Released;
        debug!("run queue disposed");
        true
    }

    pub fn is_disposed(&self) -> bool {
        matches!(*self.gate.lock(), Gate::Released)
    }
}

impl<S> fmt::Debug for RunQueue<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunQueue")
            .field("queue_limit", &self.queue_limit())
            .field("gate", &*self.gate.lock())
            .field("target_alive", &(self.target.strong_count() > 0))
            .finish()
    }
}

// Returns the gate to idle if the driving call stops early: its future was
// dropped mid-run, or the action panicked.
struct DrainGuard<'a, S> {
    queue: &'a RunQueue<S>,
    finished: bool,
}

impl<S> Drop for DrainGuard<'_, S> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut gate = self.queue.gate.lock();
        if let Gate::Live { available } = &mut *gate {
            if *available + 1 < self.queue.capacity {
                warn!(
                    "run queue interrupted mid-run, abandoning {} promised runs",
                    self.queue.capacity - *available - 1
                );
            } else {
                warn!("run queue interrupted mid-run");
            }
            *available = self.queue.capacity;
        }
    }
}
