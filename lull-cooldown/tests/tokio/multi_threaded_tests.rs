// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull_cooldown::{CooldownConfig, EventCooldown};
use lull_runtime::{Executor, TokioExecutor, TokioRuntime};
use lull_test_utils::Recorder;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_accumulate_fires_once() {
    // Arrange
    let recorder = Recorder::new();
    let cooldown = Arc::new(EventCooldown::new(
        Duration::from_millis(200),
        recorder.callback(),
    ));
    let barrier = Arc::new(Barrier::new(8));

    // Act
    let handles: Vec<_> = (0..8u32)
        .map(|worker| {
            let cooldown = cooldown.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..100 {
                    cooldown.accumulate(worker * 1_000 + i);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }
    sleep(Duration::from_millis(600)).await;

    // Assert
    assert_eq!(recorder.count(), 1);
    assert!(!cooldown.is_any());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cooldown_built_on_foreign_thread_with_captured_executor() -> anyhow::Result<()> {
    // Arrange
    let recorder = Recorder::new();
    let executor = TokioExecutor::current();
    let callback = recorder.callback();

    // Act
    let cooldown = thread::spawn(move || -> lull_core::Result<_> {
        let cooldown = EventCooldown::<&'static str, TokioRuntime>::with_executor(
            CooldownConfig::new(Duration::from_millis(20)),
            executor,
            callback,
        )?;
        cooldown.accumulate("from a plain thread");
        Ok(cooldown)
    })
    .join()
    .expect("builder thread panicked")?;
    sleep(Duration::from_millis(300)).await;

    // Assert
    assert_eq!(recorder.values(), vec!["from a plain thread"]);
    assert!(!cooldown.is_any());
    Ok(())
}
