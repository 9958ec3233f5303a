// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Cadence by dropping.
//!
//! The first interval ends `rate` after [`sample`] is called. Items that arrive
//! before the current interval has ended are discarded. The first item arriving at
//! or after the end is forwarded, and the next interval starts at that moment. If
//! upstream is quiet when an interval ends, the stage simply forwards whatever
//! arrives next.

use crate::timer::deadline_after;
use core::time::Duration;
use futures::Stream;
use sluice_core::{
    forward, pipe, pull, spawn_stage, CancellationToken, Pipe, Pulled, Result, SluiceError,
    StageExit,
};
use tokio::time::Instant;

/// Forward at most one item per `rate`, discarding the rest.
///
/// # Errors
///
/// Returns [`SluiceError::InvalidConfig`] if `rate` is zero.
pub fn sample<S, T>(cancel: &CancellationToken, input: S, rate: Duration) -> Result<Pipe<T>>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
{
    if rate.is_zero() {
        return Err(SluiceError::invalid_config("sample", "rate must be non-zero"));
    }

    let (outlet, output) = pipe(cancel);
    let cancel = cancel.clone();
    let mut interval_end = deadline_after(Instant::now(), rate);

    spawn_stage("sample", async move {
        let mut input = input;
        loop {
            match pull(&mut input, &cancel).await {
                Pulled::Item(item) => {
                    let now = Instant::now();
                    if now < interval_end {
                        continue;
                    }
                    interval_end = deadline_after(now, rate);
                    forward!(outlet, item);
                }
                Pulled::Closed => return StageExit::Completed,
                Pulled::Cancelled => return StageExit::Cancelled,
            }
        }
    });

    Ok(output)
}
