// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull_cooldown::{CooldownConfig, EventCooldown};
use lull_test_utils::{advance_and_settle, Recorder};
use std::time::Duration;
use tokio::time::pause;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[tokio::test]
async fn test_duration_ceiling_fires_during_continuous_burst() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let cooldown = EventCooldown::with_config(
        CooldownConfig::new(ms(200)).max_accumulation(ms(500)),
        recorder.callback(),
    )?;

    // Act & Assert: a signal every 100ms would postpone a plain debounce forever
    for value in 0..5 {
        cooldown.accumulate(value);
        advance_and_settle(ms(100)).await;
        if value < 4 {
            assert_eq!(recorder.count(), 0, "fired early at signal {value}");
        }
    }

    assert_eq!(recorder.values(), vec![4]);
    assert!(!cooldown.is_now());
    Ok(())
}

#[tokio::test]
async fn test_duration_ceiling_restarts_with_next_burst() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let cooldown = EventCooldown::with_config(
        CooldownConfig::new(ms(200)).max_accumulation(ms(500)),
        recorder.callback(),
    )?;

    // Act
    for value in 0..10 {
        cooldown.accumulate(value);
        advance_and_settle(ms(100)).await;
    }
    advance_and_settle(ms(200)).await;

    // Assert: each burst is cut at its ceiling
    assert_eq!(recorder.values(), vec![4, 9]);
    Ok(())
}

#[tokio::test]
async fn test_count_ceiling_flushes_synchronously() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let cooldown = EventCooldown::with_config(
        CooldownConfig::new(ms(500)).max_accumulations(3),
        recorder.callback(),
    )?;

    // Act
    for value in 1..=3 {
        cooldown.accumulate(value);
    }
    assert_eq!(recorder.count(), 0);
    assert_eq!(cooldown.accumulated(), 3);

    cooldown.accumulate(4);

    // Assert
    assert_eq!(recorder.values(), vec![4]);
    assert!(cooldown.is_now());
    assert!(!cooldown.is_any());
    assert_eq!(cooldown.accumulated(), 0);

    advance_and_settle(ms(1_000)).await;
    assert_eq!(recorder.values(), vec![4]);
    Ok(())
}

#[tokio::test]
async fn test_count_ceiling_resets_after_timer_fire() -> anyhow::Result<()> {
    // Arrange
    pause();
    let recorder = Recorder::new();
    let cooldown = EventCooldown::with_config(
        CooldownConfig::new(ms(100)).max_accumulations(2),
        recorder.callback(),
    )?;

    // Act
    cooldown.accumulate(1);
    cooldown.accumulate(2);
    advance_and_settle(ms(100)).await;
    cooldown.accumulate(3);
    cooldown.accumulate(4);
    advance_and_settle(ms(100)).await;

    // Assert
    assert_eq!(recorder.values(), vec![2, 4]);
    Ok(())
}

#[tokio::test]
async fn test_zero_duration_ceiling_is_rejected() {
    let recorder = Recorder::<u8>::new();

    let result = EventCooldown::with_config(
        CooldownConfig::new(ms(100)).max_accumulation(Duration::ZERO),
        recorder.callback(),
    );

    assert!(result.is_err_and(|e| e.to_string().contains("max_accumulation")));
}
