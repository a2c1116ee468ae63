// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! One-shot, shareable result slot.
//!
//! A [`Completion`] is settled at most once; every clone observes the same
//! outcome. Waiters park on an [`event_listener::Event`] the same way
//! [`Cancelled`](crate::Cancelled) does.

use crate::{LullError, Result};
use core::fmt;
use event_listener::Event;
use parking_lot::Mutex;
use std::sync::Arc;

/// Externally observable completion handle.
///
/// Cancellation is reported as [`LullError::Cancelled`].
///
/// # Example
///
/// ```
/// use lull_core::Completion;
///
/// # async fn example() {
/// let completion = Completion::new();
/// let observer = completion.clone();
///
/// assert!(completion.settle(Ok(7)));
/// assert!(!completion.settle(Ok(8)));
///
/// assert_eq!(observer.wait().await.unwrap(), 7);
/// # }
/// ```
pub struct Completion<T> {
    inner: Arc<Inner<T>>,
}

struct Inner<T> {
    slot: Mutex<Option<Result<T>>>,
    event: Event,
}

impl<T> Completion<T> {
    /// Create an unsettled completion.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                slot: Mutex::new(None),
                event: Event::new(),
            }),
        }
    }

    /// Create a completion that is already settled with `result`.
    pub fn settled(result: Result<T>) -> Self {
        let completion = Self::new();
        completion.settle(result);
        completion
    }

    /// Settle the completion and wake every waiter.
    ///
    /// The first call wins. Returns `false` if the completion was already
    /// settled, in which case `result` is dropped.
    pub fn settle(&self, result: Result<T>) -> bool {
        {
            let mut slot = self.inner.slot.lock();
            if slot.is_some() {
                return false;
            }
            *slot = Some(result);
        }
        self.inner.event.notify(usize::MAX);
        true
    }

    /// Settle as cancelled. Shorthand for `settle(Err(LullError::cancelled(..)))`.
    pub fn cancel(&self, context: impl Into<String>) -> bool {
        self.settle(Err(LullError::cancelled(context)))
    }

    /// Whether a result (value, error or cancellation) has been recorded.
    pub fn is_settled(&self) -> bool {
        self.inner.slot.lock().is_some()
    }

    /// Whether two handles observe the same slot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> Completion<T> {
    /// The recorded result, if any, without waiting.
    pub fn try_result(&self) -> Option<Result<T>> {
        self.inner.slot.lock().clone()
    }

    /// Wait until the completion is settled and return a copy of its result.
    ///
    /// # Errors
    /// Returns the error the completion was settled with, including
    /// [`LullError::Cancelled`] when the observed work was cancelled.
    pub async fn wait(&self) -> Result<T> {
        loop {
            if let Some(result) = self.try_result() {
                return result;
            }

            let listener = self.inner.event.listen();

            // A settle() between the check above and listen() has already notified
            if let Some(result) = self.try_result() {
                return result;
            }

            listener.await;
        }
    }
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Completion<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.inner.slot.lock() {
            None => "pending",
            Some(Ok(_)) => "succeeded",
            Some(Err(e)) if e.is_cancelled() => "cancelled",
            Some(Err(_)) => "failed",
        };
        f.debug_struct("Completion").field("state", &state).finish()
    }
}
