// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Pacing without loss.

use crate::timer::{deadline_after, sleep_until};
use core::time::Duration;
use futures::Stream;
use sluice_core::{
    forward, pipe, pull, spawn_stage, CancellationToken, Pipe, Pulled, Result, SluiceError,
    StageExit,
};
use tokio::time::Instant;

/// Forward every item, keeping at least `rate` between consecutive emissions.
///
/// After an item has been handed downstream the stage waits until `rate` has
/// passed before forwarding the next one. Nothing is dropped: a fast upstream is
/// slowed down to the throttle's pace through backpressure.
///
/// # Errors
///
/// Returns [`SluiceError::InvalidConfig`] if `rate` is zero.
///
/// # Example
///
/// ```rust
/// use futures::StreamExt;
/// use sluice_core::CancellationToken;
/// use sluice_stream::generate;
/// use sluice_stream_time::throttle;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() -> sluice_core::Result<()> {
/// let cancel = CancellationToken::new();
/// let paced = throttle(&cancel, generate(&cancel, 1..=3), Duration::from_millis(100))?;
///
/// assert_eq!(paced.collect::<Vec<_>>().await, vec![1, 2, 3]);
/// # Ok(())
/// # }
/// ```
pub fn throttle<S, T>(cancel: &CancellationToken, input: S, rate: Duration) -> Result<Pipe<T>>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
{
    if rate.is_zero() {
        return Err(SluiceError::invalid_config("throttle", "rate must be non-zero"));
    }

    let (outlet, output) = pipe(cancel);
    let cancel = cancel.clone();

    spawn_stage("throttle", async move {
        let mut input = input;
        let mut next_allowed: Option<Instant> = None;
        loop {
            match pull(&mut input, &cancel).await {
                Pulled::Item(item) => {
                    if let Some(deadline) = next_allowed {
                        if !sleep_until(deadline, &cancel).await {
                            return StageExit::Cancelled;
                        }
                    }
                    forward!(outlet, item);
                    next_allowed = Some(deadline_after(Instant::now(), rate));
                }
                Pulled::Closed => return StageExit::Completed,
                Pulled::Cancelled => return StageExit::Cancelled,
            }
        }
    });

    Ok(output)
}
