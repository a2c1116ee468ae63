// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull_core::{Completion, LullError};
use std::time::Duration;

#[test]
fn test_first_settle_wins() {
    let completion = Completion::new();

    assert!(completion.settle(Ok(1)));
    assert!(!completion.settle(Ok(2)));
    assert!(!completion.cancel("late"));

    assert_eq!(completion.try_result().unwrap().unwrap(), 1);
}

#[test]
fn test_new_completion_is_pending() {
    let completion = Completion::<u32>::new();

    assert!(!completion.is_settled());
    assert!(completion.try_result().is_none());
    assert_eq!(format!("{completion:?}"), "Completion { state: \"pending\" }");
}

#[test]
fn test_clones_share_the_slot() {
    let completion = Completion::<&str>::new();
    let observer = completion.clone();

    completion.cancel("superseded");

    assert!(observer.ptr_eq(&completion));
    assert!(observer.try_result().unwrap().unwrap_err().is_cancelled());
    assert!(!observer.ptr_eq(&Completion::new()));
}

#[tokio::test]
async fn test_wait_returns_settled_value() -> anyhow::Result<()> {
    let completion = Completion::settled(Ok("done"));

    assert_eq!(completion.wait().await?, "done");
    assert_eq!(completion.wait().await?, "done");

    Ok(())
}

#[tokio::test]
async fn test_all_waiters_observe_failure() {
    let completion = Completion::<u8>::new();

    let waiters: Vec<_> = (0..5)
        .map(|_| {
            let completion = completion.clone();
            tokio::spawn(async move { completion.wait().await })
        })
        .collect();

    tokio::task::yield_now().await;
    completion.settle(Err(LullError::invalid_config("bad")));

    for waiter in waiters {
        let result = tokio::time::timeout(Duration::from_millis(100), waiter)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(result, Err(LullError::InvalidConfig { .. })));
    }
}
