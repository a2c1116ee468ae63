// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::FutureExt;
use lull_runtime::{Timer, TokioTimer};
use std::time::Duration;
use tokio::time::{advance, pause};

#[tokio::test]
async fn test_sleep_completes_only_after_duration() {
    // Arrange
    pause();
    let timer = TokioTimer;
    let mut sleep = Box::pin(timer.sleep_future(Duration::from_millis(500)));

    // Act & Assert
    assert!((&mut sleep).now_or_never().is_none());

    advance(Duration::from_millis(499)).await;
    assert!((&mut sleep).now_or_never().is_none());

    advance(Duration::from_millis(1)).await;
    assert!((&mut sleep).now_or_never().is_some());
}

#[tokio::test]
async fn test_now_follows_paused_clock() {
    // Arrange
    pause();
    let timer = TokioTimer;
    let start = timer.now();

    // Act
    advance(Duration::from_secs(3)).await;

    // Assert
    assert_eq!(timer.now() - start, Duration::from_secs(3));
    assert_eq!(start + Duration::from_secs(3), timer.now());
}
