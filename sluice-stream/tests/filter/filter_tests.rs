// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::CancellationToken;
use sluice_stream::{filter, filter_all, generate, Predicate};
use sluice_test_utils::{assert_no_element_emitted, collect_within, next_within, test_channel};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[tokio::test]
async fn test_filter_keeps_matching_items_in_order() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let evens = filter(&cancel, generate(&cancel, 1..=10), |n: &i32| n % 2 == 0);

    assert_eq!(collect_within(evens, 500).await, vec![2, 4, 6, 8, 10]);

    Ok(())
}

#[tokio::test]
async fn test_filter_all_requires_every_predicate() -> anyhow::Result<()> {
    // Arrange
    let cancel = CancellationToken::new();
    let predicates: Vec<Predicate<i32>> = vec![
        Box::new(|n: &i32| n % 2 == 0),
        Box::new(|n: &i32| n % 3 == 0),
    ];

    // Act
    let numbers = generate(&cancel, 1..=20);
    let items = collect_within(filter_all(&cancel, numbers, predicates), 500).await;

    // Assert
    assert_eq!(items, vec![6, 12, 18]);

    Ok(())
}

#[tokio::test]
async fn test_filter_all_short_circuits_on_first_rejection() -> anyhow::Result<()> {
    // Arrange
    let cancel = CancellationToken::new();
    let second_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&second_calls);
    let predicates: Vec<Predicate<i32>> = vec![
        Box::new(|n: &i32| *n > 5),
        Box::new(move |_: &i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        }),
    ];

    // Act
    let numbers = generate(&cancel, 1..=8);
    let items = collect_within(filter_all(&cancel, numbers, predicates), 500).await;

    // Assert
    assert_eq!(items, vec![6, 7, 8]);
    assert_eq!(second_calls.load(Ordering::SeqCst), 3);

    Ok(())
}

#[tokio::test]
async fn test_filter_all_without_predicates_forwards_everything() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    let numbers = generate(&cancel, 1..=3);
    let items = collect_within(filter_all(&cancel, numbers, Vec::new()), 500).await;

    assert_eq!(items, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test]
async fn test_filter_rejected_items_emit_nothing() -> anyhow::Result<()> {
    // Arrange
    let cancel = CancellationToken::new();
    let (tx, rx) = test_channel();
    let mut positives = filter(&cancel, rx, |n: &i32| *n > 0);

    // Act & Assert
    tx.unbounded_send(-1)?;
    tx.unbounded_send(-2)?;
    assert_no_element_emitted(&mut positives, 100).await;

    tx.unbounded_send(7)?;
    assert_eq!(next_within(&mut positives, 500).await, Some(7));

    Ok(())
}
