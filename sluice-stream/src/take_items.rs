// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use sluice_core::{forward, pipe, pull, spawn_stage, CancellationToken, Pipe, Pulled, StageExit};

/// Forward at most the first `n` upstream items, then close.
///
/// The stage stops reading once it has forwarded `n` items and drops its input,
/// so the upstream stage sees its consumer go away instead of blocking on it.
/// `n == 0` yields an empty pipe.
pub fn take_items<S, T>(cancel: &CancellationToken, input: S, n: usize) -> Pipe<T>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
{
    let (outlet, output) = pipe(cancel);
    let cancel = cancel.clone();

    spawn_stage("take_items", async move {
        let mut input = input;
        for _ in 0..n {
            match pull(&mut input, &cancel).await {
                Pulled::Item(item) => forward!(outlet, item),
                Pulled::Closed => break,
                Pulled::Cancelled => return StageExit::Cancelled,
            }
        }
        StageExit::Completed
    });

    output
}
