// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Token-bucket rate limiting with a bounded overflow buffer.
//!
//! ## Characteristics
//!
//! - **Fixed ticks**: the bucket starts full and is refilled to `limit` on a
//!   fixed tick every `per`, the first one `per` after construction. Ticks missed
//!   while the stage was blocked on a slow consumer are skipped, not replayed.
//! - **Buffered first**: whenever tokens are available, buffered items are sent
//!   before any new upstream item is looked at.
//! - **Lossy overflow**: with no tokens left, items go to a FIFO buffer of
//!   `buffer` slots; once it is full further items are dropped. Upstream is never
//!   blocked by the limiter itself.
//! - **Drains on close**: after upstream closes, the buffer keeps draining on
//!   later ticks; the output closes once it is empty.

use crate::timer::deadline_after;
use core::time::Duration;
use futures::{Stream, StreamExt};
use sluice_core::{
    forward, pipe, spawn_stage, CancellationToken, Pipe, Result, SluiceError, StageExit,
};
use std::collections::VecDeque;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Parameters of a [`rate_limiter`] stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    limit: usize,
    per: Duration,
    buffer: usize,
}

impl RateLimit {
    /// `limit` items per `per`, with room for `buffer` items waiting for tokens.
    ///
    /// A `buffer` of zero drops every item that finds the bucket empty.
    ///
    /// # Errors
    ///
    /// Returns [`SluiceError::InvalidConfig`] if `limit` is zero or `per` is zero.
    pub fn new(limit: usize, per: Duration, buffer: usize) -> Result<Self> {
        if limit == 0 {
            return Err(SluiceError::invalid_config("rate_limiter", "limit must be at least 1"));
        }
        if per.is_zero() {
            return Err(SluiceError::invalid_config("rate_limiter", "period must be non-zero"));
        }

        Ok(Self { limit, per, buffer })
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub const fn per(&self) -> Duration {
        self.per
    }

    #[must_use]
    pub const fn buffer(&self) -> usize {
        self.buffer
    }
}

/// Forward at most `limit` items per `per`, buffering or dropping the excess.
///
/// # Example
///
/// ```rust
/// use futures::StreamExt;
/// use sluice_core::CancellationToken;
/// use sluice_stream::generate;
/// use sluice_stream_time::{rate_limiter, RateLimit};
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread", start_paused = true)]
/// # async fn main() -> sluice_core::Result<()> {
/// let cancel = CancellationToken::new();
/// let limit = RateLimit::new(3, Duration::from_secs(1), 2)?;
///
/// // Three go through at once, two wait for the next tick, the rest are dropped.
/// let passed: Vec<i32> = rate_limiter(&cancel, generate(&cancel, 1..=10), limit)
///     .collect()
///     .await;
/// assert_eq!(passed, vec![1, 2, 3, 4, 5]);
/// # Ok(())
/// # }
/// ```
pub fn rate_limiter<S, T>(cancel: &CancellationToken, input: S, limit: RateLimit) -> Pipe<T>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
{
    let (outlet, output) = pipe(cancel);
    let cancel = cancel.clone();
    let first_tick = deadline_after(Instant::now(), limit.per);

    spawn_stage("rate_limiter", async move {
        let mut input = input;
        let mut ticks = interval_at(first_tick, limit.per);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut tokens = limit.limit;
        let mut backlog: VecDeque<T> = VecDeque::new();
        let mut upstream_open = true;
        #[cfg_attr(not(feature = "tracing"), allow(unused_variables, unused_assignments))]
        let mut dropped: u64 = 0;

        loop {
            while tokens > 0 {
                let Some(item) = backlog.pop_front() else {
                    break;
                };
                forward!(outlet, item);
                tokens -= 1;
            }

            if !upstream_open && backlog.is_empty() {
                sluice_core::debug!(dropped, "rate limiter drained");
                return StageExit::Completed;
            }

            tokio::select! {
                biased;

                () = cancel.cancelled() => return StageExit::Cancelled,
                _ = ticks.tick() => tokens = limit.limit,
                next = input.next(), if upstream_open => match next {
                    Some(item) if tokens > 0 => {
                        forward!(outlet, item);
                        tokens -= 1;
                    }
                    Some(item) if backlog.len() < limit.buffer => backlog.push_back(item),
                    Some(_) => {
                        dropped += 1;
                        sluice_core::trace!(dropped, "rate limiter buffer full, item dropped");
                    }
                    None => upstream_open = false,
                },
            }
        }
    });

    output
}
