// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull_exec::{RunOutcome, RunQueue, Sequencer};
use lull_runtime::{SmolExecutor, SmolRuntime};
use lull_test_utils::TestError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn test_smol_sequencer_reports_latest_unit() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let sequencer: Sequencer<u32, SmolRuntime> = Sequencer::with_executor(SmolExecutor);

        // Act
        sequencer.next(|token| async move {
            smol::Timer::after(Duration::from_millis(50)).await;
            if token.is_cancelled() {
                Err(TestError::new("superseded"))
            } else {
                Ok(1)
            }
        });
        let completion = sequencer.next(|_| async { Ok::<_, TestError>(2) });

        // Assert
        assert_eq!(completion.wait().await?, 2);
        Ok(())
    })
}

#[test]
fn test_smol_run_queue_runs_action() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let runs = Arc::new(AtomicUsize::new(0));
        let queue = RunQueue::new(&runs, |runs: Arc<AtomicUsize>| async move {
            smol::Timer::after(Duration::from_millis(5)).await;
            runs.fetch_add(1, Ordering::SeqCst);
            Ok::<(), TestError>(())
        });

        // Act
        let outcome = queue.run_async().await?;

        // Assert
        assert_eq!(outcome, RunOutcome::Executed { runs: 1 });
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        Ok(())
    })
}
