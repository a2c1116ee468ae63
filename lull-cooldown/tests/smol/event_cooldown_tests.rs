// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull_cooldown::{CooldownConfig, EventCooldown};
use lull_runtime::{SmolExecutor, SmolRuntime};
use lull_test_utils::Recorder;
use std::time::Duration;

#[test]
fn test_smol_burst_fires_once_with_last_value() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let recorder = Recorder::new();
        let cooldown = EventCooldown::<u32, SmolRuntime>::with_executor(
            CooldownConfig::new(Duration::from_millis(50)),
            SmolExecutor,
            recorder.callback(),
        )?;

        // Act
        for value in 1..=3 {
            cooldown.accumulate(value);
        }
        smol::Timer::after(Duration::from_millis(300)).await;

        // Assert
        assert_eq!(recorder.values(), vec![3]);
        assert!(!cooldown.is_any());
        Ok(())
    })
}

#[test]
fn test_smol_now_skips_the_wait() -> anyhow::Result<()> {
    smol::block_on(async {
        // Arrange
        let recorder = Recorder::new();
        let cooldown = EventCooldown::<&str, SmolRuntime>::with_executor(
            CooldownConfig::new(Duration::from_millis(50)),
            SmolExecutor,
            recorder.callback(),
        )?;
        cooldown.accumulate("queued");

        // Act
        cooldown.now();
        smol::Timer::after(Duration::from_millis(200)).await;

        // Assert
        assert_eq!(recorder.values(), vec!["queued"]);
        Ok(())
    })
}
