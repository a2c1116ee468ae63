// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull_runtime::{Executor, LullTask, SmolExecutor, SmolTimer, Timer};
use std::time::Duration;

#[test]
fn test_smol_timer_sleeps_at_least_the_duration() {
    smol::block_on(async {
        // Arrange
        let timer = SmolTimer;
        let start = timer.now();

        // Act
        timer.sleep_future(Duration::from_millis(20)).await;

        // Assert
        assert!(timer.now() - start >= Duration::from_millis(20));
    });
}

#[test]
fn test_smol_executor_runs_spawned_future() {
    smol::block_on(async {
        // Arrange
        let (tx, rx) = smol::channel::bounded(1);

        // Act
        SmolExecutor::current().spawn(async move {
            let _ = tx.send(7).await;
        });

        // Assert
        assert_eq!(rx.recv().await.ok(), Some(7));
    });
}

#[test]
fn test_smol_task_observes_cancel_on_drop() {
    smol::block_on(async {
        // Arrange
        let (tx, rx) = smol::channel::bounded(1);
        let task = LullTask::spawn(&SmolExecutor, move |cancel| async move {
            cancel.cancelled().await;
            let _ = tx.send("cancelled").await;
        });

        // Act
        drop(task);

        // Assert
        assert_eq!(rx.recv().await.ok(), Some("cancelled"));
    });
}
