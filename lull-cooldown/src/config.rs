// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use lull_core::{LullError, Result};

/// Timing configuration of a cooldown.
///
/// `accumulate_after` is the silence gap. The two optional ceilings bound how
/// long a continuous burst may keep postponing the action:
///
/// - `max_accumulation`: once this much time has passed since the first signal
///   of a burst, the action fires even though signals keep arriving
/// - `max_accumulations`: once `accumulate` has been called more than this many
///   times without a fire, the next call flushes synchronously
///
/// # Example
///
/// ```
/// use lull_cooldown::CooldownConfig;
/// use std::time::Duration;
///
/// let config = CooldownConfig::new(Duration::from_secs(2))
///     .max_accumulation(Duration::from_secs(5));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CooldownConfig {
    pub accumulate_after: Duration,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_accumulation: Option<Duration>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_accumulations: Option<usize>,
}

impl CooldownConfig {
    pub fn new(accumulate_after: Duration) -> Self {
        Self {
            accumulate_after,
            max_accumulation: None,
            max_accumulations: None,
        }
    }

    /// Fire at the latest `ceiling` after the first signal of a burst.
    #[must_use]
    pub fn max_accumulation(mut self, ceiling: Duration) -> Self {
        self.max_accumulation = Some(ceiling);
        self
    }

    /// Flush once more than `count` signals arrived without a fire.
    #[must_use]
    pub fn max_accumulations(mut self, count: usize) -> Self {
        self.max_accumulations = Some(count);
        self
    }

    /// # Errors
    /// Returns [`LullError::InvalidConfig`] for a zero ceiling.
    pub fn validate(&self) -> Result<()> {
        if self.max_accumulation == Some(Duration::ZERO) {
            return Err(LullError::invalid_config(
                "max_accumulation must be greater than zero",
            ));
        }
        if self.max_accumulations == Some(0) {
            return Err(LullError::invalid_config(
                "max_accumulations must be at least 1",
            ));
        }
        Ok(())
    }

    /// Delay to arm the timer with, `elapsed` into the current burst.
    ///
    /// `None` means the duration ceiling is already reached.
    pub(crate) fn delay_after(&self, elapsed: Duration) -> Option<Duration> {
        match self.max_accumulation {
            None => Some(self.accumulate_after),
            Some(ceiling) if elapsed >= ceiling => None,
            Some(ceiling) => Some(self.accumulate_after.min(ceiling - elapsed)),
        }
    }

    pub(crate) fn count_exceeded(&self, accumulated: usize) -> bool {
        self.max_accumulations
            .is_some_and(|max| accumulated > max)
    }
}

impl From<Duration> for CooldownConfig {
    fn from(accumulate_after: Duration) -> Self {
        Self::new(accumulate_after)
    }
}
