// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::{CancellationToken, Pipe};
use sluice_stream::{broadcast, fan_out, generate, map};
use sluice_test_utils::next_within;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn counted_source(cancel: &CancellationToken, produced: &Arc<AtomicUsize>) -> Pipe<u64> {
    let counter = Arc::clone(produced);
    map(cancel, generate(cancel, 0u64..), move |n| {
        counter.fetch_add(1, Ordering::SeqCst);
        n
    })
}

async fn assert_settled(produced: &AtomicUsize, ceiling: usize) {
    sleep(Duration::from_millis(50)).await;
    let settled = produced.load(Ordering::SeqCst);
    sleep(Duration::from_millis(50)).await;

    assert!(settled <= ceiling, "upstream kept producing: {settled}");
    assert_eq!(produced.load(Ordering::SeqCst), settled);
}

#[tokio::test]
async fn test_dropping_the_last_pipe_stops_the_chain() -> anyhow::Result<()> {
    // Arrange - the token is never cancelled
    let cancel = CancellationToken::new();
    let produced = Arc::new(AtomicUsize::new(0));
    let mut doubled = map(&cancel, counted_source(&cancel, &produced), |n| n * 2);

    // Act
    assert_eq!(next_within(&mut doubled, 500).await, Some(0));
    assert_eq!(next_within(&mut doubled, 500).await, Some(2));
    drop(doubled);

    // Assert
    assert_settled(&produced, 10).await;
    assert!(!cancel.is_cancelled());

    Ok(())
}

#[tokio::test]
async fn test_dropping_every_broadcast_output_stops_upstream() -> anyhow::Result<()> {
    // Arrange
    let cancel = CancellationToken::new();
    let produced = Arc::new(AtomicUsize::new(0));
    let mut outputs = broadcast(&cancel, counted_source(&cancel, &produced), 2)?;

    // Act
    for output in &mut outputs {
        assert_eq!(next_within(output, 500).await, Some(0));
    }
    drop(outputs);

    // Assert
    assert_settled(&produced, 8).await;

    Ok(())
}

#[tokio::test]
async fn test_dropping_every_fan_out_output_stops_upstream() -> anyhow::Result<()> {
    // Arrange
    let cancel = CancellationToken::new();
    let produced = Arc::new(AtomicUsize::new(0));
    let mut outputs = fan_out(&cancel, counted_source(&cancel, &produced), 3, |n| n)?;

    // Act
    assert!(next_within(&mut outputs[0], 500).await.is_some());
    drop(outputs);

    // Assert - each worker may hold one item besides the pipes' contents
    assert_settled(&produced, 12).await;

    Ok(())
}
