// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use sluice_core::CancellationToken;
use sluice_stream::generate;
use sluice_stream_time::{rate_limiter, RateLimit};
use sluice_test_utils::{
    assert_no_element_emitted, collect_timed, collect_within, next_within, test_channel,
};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::sleep;

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[tokio::test(start_paused = true)]
async fn test_rate_limiter_burst_of_ten() -> anyhow::Result<()> {
    // Arrange - 3 tokens per second, 2 buffer slots, 10 items at once
    let cancel = CancellationToken::new();
    let limit = RateLimit::new(3, Duration::from_secs(1), 2)?;
    let limited = rate_limiter(&cancel, generate(&cancel, 1..=10), limit);

    // Act
    let timed = collect_timed(limited, 60_000).await;

    // Assert - 1..=3 spend the initial tokens, 4 and 5 wait for the first tick
    // in the buffer, 6..=10 find the buffer full and are dropped
    assert_eq!(
        timed,
        vec![
            (1, ms(0)),
            (2, ms(0)),
            (3, ms(0)),
            (4, ms(1000)),
            (5, ms(1000)),
        ]
    );

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rate_limiter_paced_arrivals() -> anyhow::Result<()> {
    // Arrange - one item every 100ms, offset from the ticks by 50ms
    let cancel = CancellationToken::new();
    let limit = RateLimit::new(2, Duration::from_secs(1), 1)?;
    let (tx, rx) = test_channel();
    let limited = rate_limiter(&cancel, rx, limit);

    tokio::spawn(async move {
        sleep(ms(50)).await;
        for value in 0..30 {
            let _ = tx.unbounded_send(value);
            sleep(ms(100)).await;
        }
    });

    // Act
    let timed = collect_timed(limited, 60_000).await;

    // Assert - per second: two direct sends, one buffered for the next tick
    assert_eq!(
        timed,
        vec![
            (0, ms(50)),
            (1, ms(150)),
            (2, ms(1000)),
            (10, ms(1050)),
            (11, ms(2000)),
            (20, ms(2050)),
            (21, ms(3000)),
        ]
    );

    let mut per_second: BTreeMap<u128, usize> = BTreeMap::new();
    for (_, at) in &timed {
        *per_second.entry(at.as_millis() / 1000).or_default() += 1;
    }
    assert!(per_second.values().all(|&count| count <= limit.limit()));

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rate_limiter_without_buffer_drops_excess() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let limit = RateLimit::new(2, Duration::from_secs(1), 0)?;

    let limited = rate_limiter(&cancel, generate(&cancel, 1..=10), limit);

    assert_eq!(collect_timed(limited, 60_000).await, vec![(1, ms(0)), (2, ms(0))]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rate_limiter_cancel_discards_buffer() -> anyhow::Result<()> {
    // Arrange - one token per hour, so 2 and 3 stay buffered
    let cancel = CancellationToken::new();
    let limit = RateLimit::new(1, Duration::from_secs(3600), 5)?;
    let mut limited = rate_limiter(&cancel, generate(&cancel, 1..=3), limit);

    // Act
    assert_eq!(next_within(&mut limited, 500).await, Some(1));
    sleep(ms(10)).await;
    cancel.cancel();

    // Assert
    assert!(collect_within(limited, 500).await.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_rate_limit_rejects_impossible_parameters() -> anyhow::Result<()> {
    let zero_limit = RateLimit::new(0, Duration::from_secs(1), 4);
    let zero_period = RateLimit::new(1, Duration::ZERO, 4);

    assert!(zero_limit.is_err_and(|e| e.is_config_error()));
    assert!(zero_period.is_err_and(|e| e.is_config_error()));
    assert_eq!(RateLimit::new(3, ms(10), 0)?.buffer(), 0);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rate_limiter_huge_buffer_passes_everything_through() -> anyhow::Result<()> {
    let cancel = CancellationToken::new();
    let limit = RateLimit::new(5, Duration::from_secs(1), usize::MAX)?;

    let limited = rate_limiter(&cancel, generate(&cancel, [1, 2, 3]), limit);

    assert_eq!(collect_within(limited, 500).await, vec![1, 2, 3]);

    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rate_limiter_huge_period_never_refills() -> anyhow::Result<()> {
    // Arrange - 2 tokens, one buffer slot, no refill in sight
    let cancel = CancellationToken::new();
    let limit = RateLimit::new(2, Duration::MAX, 1)?;
    let mut limited = rate_limiter(&cancel, generate(&cancel, 1..=5), limit);

    // Act
    assert_eq!(next_within(&mut limited, 500).await, Some(1));
    assert_eq!(next_within(&mut limited, 500).await, Some(2));

    // Assert - 3 waits in the buffer for a tick that does not come
    assert_no_element_emitted(&mut limited, 500).await;

    Ok(())
}
