// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::CooldownConfig;
use crate::cooldown_timer::CooldownTimer;
use core::fmt;
use core::panic::Location;
use core::time::Duration;
use lull_core::{Mutex, Result};
use lull_runtime::{DefaultRuntime, Executor, Runtime};
use std::sync::Arc;

/// Debounced trigger carrying a value to its action.
///
/// Every [`accumulate`](Self::accumulate) stores its value and restarts the
/// silence gap; when the gap elapses the action runs once with the value stored
/// last. [`now`](Self::now) cancels the gap and runs the action on the calling
/// thread.
///
/// All operations are safe to call concurrently from any thread. Timer
/// start/stop and the trigger's flags share one mutex; the action itself always
/// runs with the mutex released, so it may call back into the cooldown.
///
/// Dropping the cooldown disposes it. A fire that has already claimed its
/// timer when [`dispose`](Self::dispose) runs still completes; no fire is
/// claimed afterwards.
///
/// # Example
///
/// ```rust
/// use lull_cooldown::EventCooldown;
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
/// let cooldown = EventCooldown::new(Duration::from_secs(60), move |v: u32| {
///     sink.lock().unwrap().push(v);
/// });
///
/// cooldown.accumulate(1);
/// cooldown.accumulate(2);
/// assert!(cooldown.is_any());
///
/// // Skip the wait: fires synchronously with the last value
/// assert!(cooldown.now());
/// assert!(!cooldown.is_any());
/// assert_eq!(*seen.lock().unwrap(), vec![2]);
/// # }
/// ```
pub struct EventCooldown<T, R: Runtime = DefaultRuntime> {
    shared: Arc<Shared<T, R>>,
}

struct Shared<T, R: Runtime> {
    config: CooldownConfig,
    action: Box<dyn Fn(T) + Send + Sync>,
    state: Mutex<TriggerState<T, R>>,
}

struct TriggerState<T, R: Runtime> {
    timer: CooldownTimer<R>,
    value: Option<T>,
    last_fire_was_immediate: bool,
    accumulated: usize,
    burst_started: Option<R::Instant>,
    disposed: bool,
    keep_last_caller: bool,
    last_caller: Option<&'static Location<'static>>,
}

impl<T, R: Runtime> TriggerState<T, R> {
    fn end_burst(&mut self) {
        self.accumulated = 0;
        self.burst_started = None;
    }
}

impl<T> EventCooldown<T>
where
    T: Clone + Send + 'static,
{
    /// Cooldown firing `action` after `accumulate_after` of silence.
    ///
    /// # Panics
    /// When the runtime's executor cannot be resolved from the calling
    /// context (for tokio: outside a runtime). Use
    /// [`with_executor`](Self::with_executor) there.
    pub fn new<F>(accumulate_after: Duration, action: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self::from_parts(
            CooldownConfig::new(accumulate_after),
            <DefaultRuntime as Runtime>::Executor::current(),
            action,
        )
    }

    /// Cooldown with ceilings.
    ///
    /// # Errors
    /// Returns [`LullError::InvalidConfig`](lull_core::LullError::InvalidConfig)
    /// when `config` does not validate.
    ///
    /// # Panics
    /// Like [`new`](Self::new), when no executor can be resolved.
    pub fn with_config<F>(config: CooldownConfig, action: F) -> Result<Self>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        config.validate()?;
        let executor = <DefaultRuntime as Runtime>::Executor::current();
        Ok(Self::from_parts(config, executor, action))
    }
}

impl<T, R> EventCooldown<T, R>
where
    T: Clone + Send + 'static,
    R: Runtime,
{
    /// Cooldown scheduling its timer on an explicit executor.
    ///
    /// # Errors
    /// Returns [`LullError::InvalidConfig`](lull_core::LullError::InvalidConfig)
    /// when `config` does not validate.
    pub fn with_executor<F>(
        config: CooldownConfig,
        executor: R::Executor,
        action: F,
    ) -> Result<Self>
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        config.validate()?;
        Ok(Self::from_parts(config, executor, action))
    }

    fn from_parts<F>(config: CooldownConfig, executor: R::Executor, action: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            shared: Arc::new(Shared {
                config,
                action: Box::new(action),
                state: Mutex::new(TriggerState {
                    timer: CooldownTimer::new(executor),
                    value: None,
                    last_fire_was_immediate: false,
                    accumulated: 0,
                    burst_started: None,
                    disposed: false,
                    keep_last_caller: false,
                    last_caller: None,
                }),
            }),
        }
    }

    /// Store `value` and restart the silence gap.
    ///
    /// If a ceiling is reached the action fires right away, on this thread.
    /// Returns `false` once disposed.
    #[track_caller]
    pub fn accumulate(&self, value: T) -> bool {
        let caller = Location::caller();
        let flushed = {
            let mut state = self.shared.state.lock();
            if state.disposed {
                return false;
            }

            state.last_fire_was_immediate = false;
            if state.keep_last_caller {
                state.last_caller = Some(caller);
            }
            state.value = Some(value);
            state.accumulated += 1;

            let now = state.timer.now();
            let burst_started = *state.burst_started.get_or_insert(now);
            let config = &self.shared.config;

            match config.delay_after(now - burst_started) {
                Some(delay) if !config.count_exceeded(state.accumulated) => {
                    let shared = Arc::downgrade(&self.shared);
                    state.timer.start(delay, move |generation| {
                        if let Some(shared) = shared.upgrade() {
                            shared.on_elapsed(generation);
                        }
                    });
                    None
                }
                _ => {
                    state.timer.stop();
                    state.last_fire_was_immediate = true;
                    state.end_burst();
                    state.value.clone()
                }
            }
        };

        if let Some(value) = flushed {
            debug!("cooldown ceiling reached, flushing");
            (self.shared.action)(value);
        }
        true
    }

    /// Cancel the gap and fire now with the value stored last.
    ///
    /// Returns whether the action ran: not when disposed, and not when no
    /// value was ever stored.
    pub fn now(&self) -> bool {
        self.fire_now(None)
    }

    /// Cancel the gap, store `value` and fire with it now.
    pub fn now_with(&self, value: T) -> bool {
        self.fire_now(Some(value))
    }

    fn fire_now(&self, value: Option<T>) -> bool {
        let value = {
            let mut state = self.shared.state.lock();
            if state.disposed {
                return false;
            }

            state.timer.stop();
            state.last_fire_was_immediate = true;
            state.end_burst();
            if value.is_some() {
                state.value = value;
            }
            state.value.clone()
        };

        match value {
            Some(value) => {
                (self.shared.action)(value);
                true
            }
            None => false,
        }
    }

    /// Drop the pending fire without running the action.
    ///
    /// Returns whether a fire was pending.
    pub fn cancel(&self) -> bool {
        let mut state = self.shared.state.lock();
        let stopped = state.timer.stop();
        state.end_burst();
        stopped
    }

    /// Whether a fire is pending.
    pub fn is_any(&self) -> bool {
        let state = self.shared.state.lock();
        !state.disposed && state.timer.is_armed()
    }

    /// Whether the last request skipped the gap (`now`, or a ceiling flush).
    pub fn is_now(&self) -> bool {
        self.shared.state.lock().last_fire_was_immediate
    }

    /// Signals received since the last fire.
    pub fn accumulated(&self) -> usize {
        self.shared.state.lock().accumulated
    }

    pub fn config(&self) -> &CooldownConfig {
        &self.shared.config
    }

    /// Remember where `accumulate` was last called from.
    pub fn keep_last_caller(&self, keep: bool) {
        let mut state = self.shared.state.lock();
        state.keep_last_caller = keep;
        if !keep {
            state.last_caller = None;
        }
    }

    /// Call site of the latest `accumulate`, when
    /// [`keep_last_caller`](Self::keep_last_caller) is on.
    pub fn last_caller(&self) -> Option<&'static Location<'static>> {
        self.shared.state.lock().last_caller
    }

    /// Stop the timer for good. Idempotent; returns `true` the first time.
    pub fn dispose(&self) -> bool {
        let mut state = self.shared.state.lock();
        if state.disposed {
            return false;
        }

        state.disposed = true;
        state.timer.release();
        state.end_burst();
        debug!("cooldown disposed");
        true
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.state.lock().disposed
    }
}

impl<T, R> Shared<T, R>
where
    T: Clone + Send + 'static,
    R: Runtime,
{
    fn on_elapsed(&self, generation: u64) {
        let value = {
            let mut state = self.state.lock();
            if state.disposed || !state.timer.claim(generation) {
                return;
            }
            state.end_burst();
            state.value.clone()
        };

        if let Some(value) = value {
            debug!(generation, "cooldown elapsed, firing");
            (self.action)(value);
        }
    }
}

impl<T, R: Runtime> Drop for EventCooldown<T, R> {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.disposed = true;
        state.timer.release();
    }
}

impl<T, R: Runtime> fmt::Debug for EventCooldown<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("EventCooldown")
            .field("config", &self.shared.config)
            .field("timer", &state.timer)
            .field("accumulated", &state.accumulated)
            .field("is_now", &state.last_fire_was_immediate)
            .field("disposed", &state.disposed)
            .finish()
    }
}
