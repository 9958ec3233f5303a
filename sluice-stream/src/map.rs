// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use sluice_core::{forward, pipe, pull, spawn_stage, CancellationToken, Pipe, Pulled, StageExit};

/// Apply `f` to every item and forward the result.
///
/// `f` runs to completion once started; cancellation is checked between items.
pub fn map<S, T, U, F>(cancel: &CancellationToken, input: S, f: F) -> Pipe<U>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
    U: Send + 'static,
    F: FnMut(T) -> U + Send + 'static,
{
    let (outlet, output) = pipe(cancel);
    let cancel = cancel.clone();

    spawn_stage("map", async move {
        let mut input = input;
        let mut f = f;
        loop {
            match pull(&mut input, &cancel).await {
                Pulled::Item(item) => forward!(outlet, f(item)),
                Pulled::Closed => return StageExit::Completed,
                Pulled::Cancelled => return StageExit::Cancelled,
            }
        }
    });

    output
}

/// Worker variant of [`map`] for fallible transforms.
///
/// A failing item becomes an `Err` in the output instead of stopping the stage,
/// so one bad item cannot end an otherwise healthy pipeline. Drain the results
/// with [`collect_results`](crate::collect_results) to gather every failure.
pub fn try_map<S, T, U, E, F>(cancel: &CancellationToken, input: S, f: F) -> Pipe<Result<U, E>>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
    U: Send + 'static,
    E: Send + 'static,
    F: FnMut(T) -> Result<U, E> + Send + 'static,
{
    map(cancel, input, f)
}
