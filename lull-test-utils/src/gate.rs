// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Semaphore;
use tokio::task::yield_now;

/// Holds actions inside their execution until the test opens it.
///
/// Each [`pass`](Self::pass) counts as one entry and consumes one permit.
#[derive(Debug)]
pub struct Gate {
    permits: Semaphore,
    entered: AtomicUsize,
}

impl Gate {
    /// A closed gate.
    pub fn new() -> Self {
        Self {
            permits: Semaphore::new(0),
            entered: AtomicUsize::new(0),
        }
    }

    /// Record an entry, then wait for a permit.
    pub async fn pass(&self) {
        self.entered.fetch_add(1, Ordering::SeqCst);
        if let Ok(permit) = self.permits.acquire().await {
            permit.forget();
        }
    }

    /// Let `count` more passes through.
    pub fn open(&self, count: usize) {
        self.permits.add_permits(count);
    }

    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    /// Yield until at least `count` entries were recorded.
    pub async fn wait_entered(&self, count: usize) {
        while self.entered() < count {
            yield_now().await;
        }
    }
}

impl Default for Gate {
    fn default() -> Self {
        Self::new()
    }
}
