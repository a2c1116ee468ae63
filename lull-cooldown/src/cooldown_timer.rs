// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use core::time::Duration;
use futures::future::{select, Either};
use futures::pin_mut;
use lull_runtime::{DefaultRuntime, Executor, LullTask, Runtime, Timer};

/// Single-shot, restartable delay.
///
/// Each [`start`](Self::start) schedules exactly one callback and supersedes any
/// earlier one. The timer is not internally locked: its owner keeps it behind
/// the same mutex it uses for its own flags, and the callback must go back
/// through that mutex and [`claim`](Self::claim) its generation before acting.
/// A callback whose claim fails was stopped or restarted in the meantime and
/// must do nothing.
///
/// Once [`release`](Self::release)d the timer stays released; every further
/// operation is a no-op.
pub struct CooldownTimer<R: Runtime = DefaultRuntime> {
    timer: R::Timer,
    executor: R::Executor,
    generation: u64,
    slot: Slot<R::Instant>,
}

enum Slot<I> {
    Live(Option<Armed<I>>),
    Released,
}

struct Armed<I> {
    generation: u64,
    deadline: I,
    // Dropping the task cancels its sleep
    _task: LullTask,
}

impl<R: Runtime> CooldownTimer<R> {
    pub fn new(executor: R::Executor) -> Self {
        Self {
            timer: R::Timer::default(),
            executor,
            generation: 0,
            slot: Slot::Live(None),
        }
    }

    /// Current instant on the timer's clock.
    pub fn now(&self) -> R::Instant {
        self.timer.now()
    }

    /// Stop any pending delay and schedule `on_elapsed(generation)` after `delay`.
    ///
    /// Returns the generation of the new delay, or `None` once released.
    pub fn start<F>(&mut self, delay: Duration, on_elapsed: F) -> Option<u64>
    where
        F: FnOnce(u64) + Send + 'static,
    {
        let Slot::Live(armed) = &mut self.slot else {
            return None;
        };

        self.generation += 1;
        let generation = self.generation;
        // Deadline is fixed now, not when the executor first polls the task
        let deadline = self.timer.now() + delay;
        let timer = self.timer.clone();

        let task = LullTask::spawn(&self.executor, move |cancel| async move {
            let now = timer.now();
            let remaining = if deadline > now {
                deadline - now
            } else {
                Duration::ZERO
            };

            let sleep = timer.sleep_future(remaining);
            let cancelled = cancel.cancelled();
            pin_mut!(sleep);

            if let Either::Left(_) = select(sleep, cancelled).await {
                on_elapsed(generation);
            }
        });

        *armed = Some(Armed {
            generation,
            deadline,
            _task: task,
        });
        Some(generation)
    }

    /// Cancel the pending delay, if any. Returns whether one was pending.
    pub fn stop(&mut self) -> bool {
        match &mut self.slot {
            Slot::Live(armed) => armed.take().is_some(),
            Slot::Released => false,
        }
    }

    /// Consume the pending delay if it is still the one tagged `generation`.
    ///
    /// Called from the elapsed callback; `true` means the callback may act.
    pub fn claim(&mut self, generation: u64) -> bool {
        match &mut self.slot {
            Slot::Live(armed) if armed.as_ref().is_some_and(|a| a.generation == generation) => {
                armed.take();
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.slot, Slot::Live(Some(_)))
    }

    /// When the pending delay is due, if one is pending.
    pub fn deadline(&self) -> Option<R::Instant> {
        match &self.slot {
            Slot::Live(Some(armed)) => Some(armed.deadline),
            _ => None,
        }
    }

    /// Stop the timer for good.
    pub fn release(&mut self) {
        self.slot = Slot::Released;
    }

    pub fn is_released(&self) -> bool {
        matches!(self.slot, Slot::Released)
    }
}

impl<R: Runtime> fmt::Debug for CooldownTimer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CooldownTimer")
            .field("generation", &self.generation)
            .field("armed", &self.is_armed())
            .field("released", &self.is_released())
            .finish()
    }
}
