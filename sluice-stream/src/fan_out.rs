// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Distributing one stream across a pool of workers.
//!
//! ## Characteristics
//!
//! - **One output per worker**: worker `i` writes only to output `i`
//! - **Exactly once**: every input item is handled by exactly one worker
//! - **Load-driven assignment**: workers queue for the shared input and the one
//!   whose receive completes first takes the item, so idle workers pick up more
//!   work than busy ones. Assignment is not round-robin.
//! - **Unordered**: across outputs, results may complete out of input order
//!
//! Merge the outputs back with [`fan_in`](crate::fan_in).

use core::pin::pin;
use futures::future::{select, Either};
use futures::{Stream, StreamExt};
use sluice_core::{
    forward, pipe, pull, spawn_stage, CancellationToken, Pipe, Pulled, Result, SluiceError,
    StageExit,
};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Spread `input` over `workers` workers, each applying `f` and writing to its own pipe.
///
/// # Errors
///
/// Returns [`SluiceError::InvalidConfig`] if `workers` is zero.
///
/// # Example
///
/// ```rust
/// use futures::StreamExt;
/// use sluice_core::CancellationToken;
/// use sluice_stream::{fan_in, fan_out, generate};
///
/// # #[tokio::main]
/// # async fn main() -> sluice_core::Result<()> {
/// let cancel = CancellationToken::new();
/// let outputs = fan_out(&cancel, generate(&cancel, 1..=10), 4, |n: i32| n * n)?;
///
/// let total: i32 = fan_in(&cancel, outputs).fold(0, |acc, n| async move { acc + n }).await;
/// assert_eq!(total, 385);
/// # Ok(())
/// # }
/// ```
pub fn fan_out<S, T, U, F>(
    cancel: &CancellationToken,
    input: S,
    workers: usize,
    f: F,
) -> Result<Vec<Pipe<U>>>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
    U: Send + 'static,
    F: Fn(T) -> U + Send + Sync + 'static,
{
    if workers == 0 {
        return Err(SluiceError::invalid_config(
            "fan_out",
            "worker count must be at least 1",
        ));
    }

    // Fused: workers keep polling after the first one has seen the end.
    let input = Arc::new(Mutex::new(input.fuse()));
    let f = Arc::new(f);

    let outputs = (0..workers)
        .map(|_| {
            let (outlet, output) = pipe(cancel);
            let input = Arc::clone(&input);
            let f = Arc::clone(&f);
            let cancel = cancel.clone();

            spawn_stage("fan_out", async move {
                loop {
                    let pulled = {
                        let lock = pin!(input.lock());
                        let locked = select(lock, cancel.cancelled()).await;
                        let mut shared = match locked {
                            Either::Left((guard, _)) => guard,
                            Either::Right(((), _)) => return StageExit::Cancelled,
                        };
                        pull(&mut *shared, &cancel).await
                    };

                    match pulled {
                        Pulled::Item(item) => forward!(outlet, f(item)),
                        Pulled::Closed => return StageExit::Completed,
                        Pulled::Cancelled => return StageExit::Cancelled,
                    }
                }
            });

            output
        })
        .collect();

    Ok(outputs)
}
