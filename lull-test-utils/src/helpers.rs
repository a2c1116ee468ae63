// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use tokio::task::yield_now;
use tokio::time::advance;

/// Let spawned tasks (timer callbacks, drivers) run to their next await point.
pub async fn settle() {
    for _ in 0..16 {
        yield_now().await;
    }
}

/// Move the paused clock forward and let woken tasks run.
pub async fn advance_and_settle(duration: Duration) {
    advance(duration).await;
    settle().await;
}
