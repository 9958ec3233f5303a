// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::CancellationToken;
use sluice_stream::{generate, map, skip_items, take_items};
use sluice_test_utils::{collect_within, test_channel};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_take_items_yields_first_n() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let items = collect_within(take_items(&cancel, generate(&cancel, 1..=10), 3), 500).await;

    assert_eq!(items, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test]
async fn test_take_items_zero_yields_nothing() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let items = collect_within(take_items(&cancel, generate(&cancel, 1..=10), 0), 500).await;

    assert!(items.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_take_items_more_than_available_yields_everything() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let items = collect_within(take_items(&cancel, generate(&cancel, 1..=4), 100), 500).await;

    assert_eq!(items, vec![1, 2, 3, 4]);

    Ok(())
}

#[tokio::test]
async fn test_take_items_closes_without_waiting_for_upstream_end() -> anyhow::Result<()> {
    // Arrange - upstream stays open for the whole test
    let cancel = CancellationToken::new();
    let (tx, rx) = test_channel();
    let taken = take_items(&cancel, rx, 2);

    // Act
    tx.unbounded_send(1)?;
    tx.unbounded_send(2)?;
    tx.unbounded_send(3)?;

    // Assert
    assert_eq!(collect_within(taken, 500).await, vec![1, 2]);

    Ok(())
}

#[tokio::test]
async fn test_take_items_releases_endless_upstream() -> anyhow::Result<()> {
    // Arrange - count how many items the endless source gets to produce
    let cancel = CancellationToken::new();
    let produced = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&produced);
    let source = map(&cancel, generate(&cancel, 0u64..), move |n| {
        counter.fetch_add(1, Ordering::SeqCst);
        n
    });

    // Act
    let items = collect_within(take_items(&cancel, source, 3), 500).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    let after_take = produced.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Assert - upstream stopped shortly after the take completed
    assert_eq!(items, vec![0, 1, 2]);
    assert!(after_take <= 6, "upstream kept producing: {after_take}");
    assert_eq!(produced.load(Ordering::SeqCst), after_take);

    Ok(())
}

#[tokio::test]
async fn test_take_then_skip_same_count_is_empty() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let taken = take_items(&cancel, generate(&cancel, 0..20), 5);
    let items = collect_within(skip_items(&cancel, taken, 5), 500).await;

    assert!(items.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_skip_then_take_yields_middle_slice() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let skipped = skip_items(&cancel, generate(&cancel, 0..20), 5);
    let items = collect_within(take_items(&cancel, skipped, 4), 500).await;

    assert_eq!(items, vec![5, 6, 7, 8]);

    Ok(())
}
