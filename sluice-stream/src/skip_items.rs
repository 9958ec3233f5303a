// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use sluice_core::{forward, pipe, pull, spawn_stage, CancellationToken, Pipe, Pulled, StageExit};

/// Discard the first `n` upstream items and forward the rest unchanged.
///
/// `n == 0` forwards everything.
pub fn skip_items<S, T>(cancel: &CancellationToken, input: S, n: usize) -> Pipe<T>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
{
    let (outlet, output) = pipe(cancel);
    let cancel = cancel.clone();

    spawn_stage("skip_items", async move {
        let mut input = input;
        let mut skipped = 0;
        loop {
            match pull(&mut input, &cancel).await {
                Pulled::Item(_) if skipped < n => skipped += 1,
                Pulled::Item(item) => forward!(outlet, item),
                Pulled::Closed => return StageExit::Completed,
                Pulled::Cancelled => return StageExit::Cancelled,
            }
        }
    });

    output
}
