// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Consecutive-duplicate suppression.
//!
//! Only runs of equal keys are collapsed: `1, 1, 2, 1` becomes `1, 2, 1`. The stage
//! remembers a single key, so memory stays constant on unbounded streams.

use futures::Stream;
use sluice_core::{forward, pipe, pull, spawn_stage, CancellationToken, Pipe, Pulled, StageExit};

/// Drop items equal to the previously forwarded one.
pub fn distinct<S, T>(cancel: &CancellationToken, input: S) -> Pipe<T>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Clone + PartialEq + Send + 'static,
{
    distinct_by(cancel, input, T::clone)
}

/// Drop items whose key equals the key of the previously forwarded item.
///
/// The first item is always forwarded.
pub fn distinct_by<S, T, K, F>(cancel: &CancellationToken, input: S, key_fn: F) -> Pipe<T>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
    K: PartialEq + Send + 'static,
    F: FnMut(&T) -> K + Send + 'static,
{
    let (outlet, output) = pipe(cancel);
    let cancel = cancel.clone();

    spawn_stage("distinct", async move {
        let mut input = input;
        let mut key_fn = key_fn;
        let mut last: Option<K> = None;
        loop {
            match pull(&mut input, &cancel).await {
                Pulled::Item(item) => {
                    let key = key_fn(&item);
                    if last.as_ref() != Some(&key) {
                        last = Some(key);
                        forward!(outlet, item);
                    }
                }
                Pulled::Closed => return StageExit::Completed,
                Pulled::Cancelled => return StageExit::Cancelled,
            }
        }
    });

    output
}
