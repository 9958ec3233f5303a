// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Partition operator that splits a stream into two based on a predicate.
//!
//! ## Characteristics
//!
//! - **Routing**: every item goes to exactly one output stream
//! - **Order-preserving**: each output keeps the relative order of its items
//! - **Backpressure**: a slow consumer on either side holds up the stage
//! - **Dropping one side is safe**: items routed to a dropped output are discarded;
//!   the stage stops once both outputs are gone
//! - **Completion**: both outputs close when upstream closes
//!
//! ## Example
//!
//! ```rust
//! use futures::StreamExt;
//! use sluice_core::CancellationToken;
//! use sluice_stream::{generate, partition};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let cancel = CancellationToken::new();
//! let (evens, odds) = partition(&cancel, generate(&cancel, 1..=6), |n: &i32| n % 2 == 0);
//!
//! let (evens, odds): (Vec<i32>, Vec<i32>) = futures::join!(evens.collect(), odds.collect());
//! assert_eq!(evens, vec![2, 4, 6]);
//! assert_eq!(odds, vec![1, 3, 5]);
//! # }
//! ```

use futures::Stream;
use sluice_core::{pipe, pull, spawn_stage, CancellationToken, Halted, Pipe, Pulled, StageExit};

/// Route items satisfying `predicate` to the first pipe and the rest to the second.
pub fn partition<S, T, F>(cancel: &CancellationToken, input: S, predicate: F) -> (Pipe<T>, Pipe<T>)
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
    F: FnMut(&T) -> bool + Send + 'static,
{
    let (matched_tx, matched) = pipe(cancel);
    let (rest_tx, rest) = pipe(cancel);
    let cancel = cancel.clone();

    spawn_stage("partition", async move {
        let mut input = input;
        let mut predicate = predicate;
        loop {
            match pull(&mut input, &cancel).await {
                Pulled::Item(item) => {
                    let target = if predicate(&item) { &matched_tx } else { &rest_tx };
                    match target.send(item).await {
                        Ok(()) => {}
                        Err(Halted::Cancelled) => return StageExit::Cancelled,
                        Err(Halted::Disconnected) => {
                            if matched_tx.is_closed() && rest_tx.is_closed() {
                                return StageExit::Disconnected;
                            }
                        }
                    }
                }
                Pulled::Closed => return StageExit::Completed,
                Pulled::Cancelled => return StageExit::Cancelled,
            }
        }
    });

    (matched, rest)
}
