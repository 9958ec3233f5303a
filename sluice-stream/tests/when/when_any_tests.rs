// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::{CancelCause, CancellationToken, Pipe};
use sluice_stream::{generate, when_any};
use sluice_test_utils::{collect_within, completion_signal};
use std::time::Duration;
use tokio::time::{sleep, timeout};

#[tokio::test]
async fn test_when_any_fires_on_first_completion() -> anyhow::Result<()> {
    // Arrange
    let parent = CancellationToken::new();
    let (_first, first_done) = completion_signal();
    let (second, second_done) = completion_signal();
    let (_third, third_done) = completion_signal();
    let barrier = when_any(&parent, vec![first_done, second_done, third_done]);

    sleep(Duration::from_millis(20)).await;
    assert!(!barrier.is_cancelled());

    // Act
    drop(second);

    // Assert
    timeout(Duration::from_millis(500), barrier.cancelled()).await?;
    assert_eq!(barrier.cause(), Some(CancelCause::AnyCompleted));
    assert!(!parent.is_cancelled());

    Ok(())
}

#[tokio::test]
async fn test_when_any_stops_sibling_stages() -> anyhow::Result<()> {
    // Arrange - an endless stage runs on the barrier token
    let parent = CancellationToken::new();
    let (signal, done) = completion_signal();
    let barrier = when_any(&parent, vec![done]);
    let endless = generate(&barrier, 0u64..);

    // Act
    drop(signal);

    // Assert
    collect_within(endless, 1000).await;
    assert!(barrier.is_cancelled());

    Ok(())
}

#[tokio::test]
async fn test_when_any_without_signals_waits_for_parent() -> anyhow::Result<()> {
    // Arrange
    let parent = CancellationToken::new();
    let barrier = when_any(&parent, Vec::<Pipe<()>>::new());

    // Act
    sleep(Duration::from_millis(50)).await;
    assert!(!barrier.is_cancelled());
    parent.cancel();

    // Assert
    assert!(barrier.is_cancelled());
    assert_eq!(barrier.cause(), Some(CancelCause::ParentCancelled));

    Ok(())
}

#[tokio::test]
async fn test_when_any_cancelling_barrier_leaves_parent_alone() -> anyhow::Result<()> {
    let parent = CancellationToken::new();
    let (_signal, done) = completion_signal();
    let barrier = when_any(&parent, vec![done]);

    barrier.cancel();

    assert!(barrier.is_cancelled());
    assert_eq!(barrier.cause(), Some(CancelCause::Requested));
    assert!(!parent.is_cancelled());

    Ok(())
}
