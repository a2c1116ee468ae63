// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull_exec::Sequencer;
use lull_test_utils::TestError;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_next_resolves_with_last_started_unit() -> anyhow::Result<()> {
    // Arrange
    let sequencer: Arc<Sequencer<u32>> = Arc::new(Sequencer::new());
    let barrier = Arc::new(Barrier::new(8));

    // Act
    let handles: Vec<_> = (0..8u32)
        .map(|worker| {
            let sequencer = sequencer.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                for i in 0..50 {
                    let value = worker * 100 + i;
                    sequencer.next(move |token| async move {
                        if value % 3 == 0 {
                            tokio::time::sleep(Duration::from_millis(5)).await;
                        }
                        if token.is_cancelled() {
                            Err(TestError::new("superseded"))
                        } else {
                            Ok(value)
                        }
                    });
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker panicked");
    }
    let completion = sequencer.next(|_| async { Ok::<_, TestError>(999) });

    // Assert
    assert_eq!(completion.wait().await?, 999);
    assert_eq!(sequencer.generation(), 401);
    Ok(())
}
