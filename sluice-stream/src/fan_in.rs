// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Merging several streams into one.
//!
//! ## Characteristics
//!
//! - **Spawns tasks**: one forwarding stage per input, all writing to one pipe
//! - **Unordered**: items from different inputs interleave as they arrive; each
//!   input's own order is preserved
//! - **Completion**: the output closes once every input has closed and been drained

use futures::Stream;
use sluice_core::{forward, pipe, pull, spawn_stage, CancellationToken, Pipe, Pulled, StageExit};

/// Merge `inputs` into a single pipe.
///
/// An empty set of inputs yields a pipe that is already closed.
///
/// # Example
///
/// ```rust
/// use futures::StreamExt;
/// use sluice_core::CancellationToken;
/// use sluice_stream::{fan_in, generate};
///
/// # #[tokio::main]
/// # async fn main() {
/// let cancel = CancellationToken::new();
/// let merged = fan_in(&cancel, vec![generate(&cancel, vec![1, 2]), generate(&cancel, vec![3])]);
///
/// let mut items: Vec<i32> = merged.collect().await;
/// items.sort_unstable();
/// assert_eq!(items, vec![1, 2, 3]);
/// # }
/// ```
pub fn fan_in<I, S, T>(cancel: &CancellationToken, inputs: I) -> Pipe<T>
where
    I: IntoIterator<Item = S>,
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
{
    let (outlet, output) = pipe(cancel);

    for input in inputs {
        let outlet = outlet.clone();
        let cancel = cancel.clone();
        spawn_stage("fan_in", async move {
            let mut input = input;
            loop {
                match pull(&mut input, &cancel).await {
                    Pulled::Item(item) => forward!(outlet, item),
                    Pulled::Closed => return StageExit::Completed,
                    Pulled::Cancelled => return StageExit::Cancelled,
                }
            }
        });
    }

    // The output closes when the last forwarder drops its clone.
    output
}
