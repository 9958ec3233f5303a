// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use sluice_core::{forward, pipe, pull, spawn_stage, CancellationToken, Pipe, Pulled, StageExit};

/// Fold the whole stream into one value.
///
/// Starting from `initial`, applies `f(acc, item)` to every item and emits the
/// result once upstream is exhausted. If upstream closes without yielding
/// anything, `zero` is emitted instead of `initial`, so "no items" stays
/// distinguishable from "one item folded into `initial`". Exactly one value is
/// emitted, unless the stage is cancelled first, in which case the pipe closes empty.
///
/// # Example
///
/// ```rust
/// use futures::StreamExt;
/// use sluice_core::CancellationToken;
/// use sluice_stream::{generate, reduce};
///
/// # #[tokio::main]
/// # async fn main() {
/// let cancel = CancellationToken::new();
///
/// let mut sum = reduce(&cancel, generate(&cancel, 1..=4), 0, -1, |acc, n| acc + n);
/// assert_eq!(sum.next().await, Some(10));
///
/// let mut empty = reduce(&cancel, generate(&cancel, Vec::<i32>::new()), 0, -1, |acc, n| acc + n);
/// assert_eq!(empty.next().await, Some(-1));
/// # }
/// ```
pub fn reduce<S, T, A, F>(
    cancel: &CancellationToken,
    input: S,
    initial: A,
    zero: A,
    f: F,
) -> Pipe<A>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
    A: Send + 'static,
    F: FnMut(A, T) -> A + Send + 'static,
{
    let (outlet, output) = pipe(cancel);
    let cancel = cancel.clone();

    spawn_stage("reduce", async move {
        let mut input = input;
        let mut f = f;
        let mut acc = initial;
        let mut seen = false;
        loop {
            match pull(&mut input, &cancel).await {
                Pulled::Item(item) => {
                    acc = f(acc, item);
                    seen = true;
                }
                Pulled::Closed => break,
                Pulled::Cancelled => return StageExit::Cancelled,
            }
        }

        forward!(outlet, if seen { acc } else { zero });
        StageExit::Completed
    });

    output
}
