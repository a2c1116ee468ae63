// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{CooldownConfig, EventCooldown};
use core::fmt;
use core::panic::Location;
use core::time::Duration;
use lull_core::Result;
use lull_runtime::{DefaultRuntime, Runtime};

/// Debounced trigger without a payload.
///
/// Same contract as [`EventCooldown`]; [`now`](Self::now) always fires since
/// there is no value that could be missing.
///
/// # Example
///
/// ```rust
/// use lull_cooldown::{Cooldown, CooldownConfig};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> lull_core::Result<()> {
/// let saves = Arc::new(AtomicUsize::new(0));
/// let counter = saves.clone();
/// let autosave = Cooldown::with_config(
///     CooldownConfig::new(Duration::from_secs(2)).max_accumulation(Duration::from_secs(5)),
///     move || {
///         counter.fetch_add(1, Ordering::SeqCst);
///     },
/// )?;
///
/// autosave.accumulate();
/// autosave.now();
/// assert_eq!(saves.load(Ordering::SeqCst), 1);
/// # Ok(())
/// # }
/// ```
pub struct Cooldown<R: Runtime = DefaultRuntime> {
    inner: EventCooldown<(), R>,
}

impl Cooldown {
    /// # Panics
    /// When no executor can be resolved from the calling context.
    pub fn new<F>(accumulate_after: Duration, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            inner: EventCooldown::new(accumulate_after, move |()| action()),
        }
    }

    /// # Errors
    /// Returns [`LullError::InvalidConfig`](lull_core::LullError::InvalidConfig)
    /// when `config` does not validate.
    ///
    /// # Panics
    /// When no executor can be resolved from the calling context.
    pub fn with_config<F>(config: CooldownConfig, action: F) -> Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        Ok(Self {
            inner: EventCooldown::with_config(config, move |()| action())?,
        })
    }
}

impl<R: Runtime> Cooldown<R> {
    /// # Errors
    /// Returns [`LullError::InvalidConfig`](lull_core::LullError::InvalidConfig)
    /// when `config` does not validate.
    pub fn with_executor<F>(
        config: CooldownConfig,
        executor: R::Executor,
        action: F,
    ) -> Result<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        Ok(Self {
            inner: EventCooldown::with_executor(config, executor, move |()| action())?,
        })
    }

    #[track_caller]
    pub fn accumulate(&self) -> bool {
        self.inner.accumulate(())
    }

    pub fn now(&self) -> bool {
        self.inner.now_with(())
    }

    pub fn cancel(&self) -> bool {
        self.inner.cancel()
    }

    pub fn is_any(&self) -> bool {
        self.inner.is_any()
    }

    pub fn is_now(&self) -> bool {
        self.inner.is_now()
    }

    pub fn accumulated(&self) -> usize {
        self.inner.accumulated()
    }

    pub fn config(&self) -> &CooldownConfig {
        self.inner.config()
    }

    pub fn keep_last_caller(&self, keep: bool) {
        self.inner.keep_last_caller(keep);
    }

    pub fn last_caller(&self) -> Option<&'static Location<'static>> {
        self.inner.last_caller()
    }

    pub fn dispose(&self) -> bool {
        self.inner.dispose()
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }
}

impl<R: Runtime> fmt::Debug for Cooldown<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cooldown").field(&self.inner).finish()
    }
}
