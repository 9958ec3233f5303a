// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Fixed-size batching.

use core::mem;
use futures::Stream;
use sluice_core::{
    forward, pipe, pull, spawn_stage, CancellationToken, Pipe, Pulled, Result, SluiceError,
    StageExit,
};

/// Group items into `Vec`s of `size`.
///
/// A full chunk is emitted as soon as it fills. When upstream closes, any partial
/// chunk is emitted as the last item, so flattening the output gives back the input.
///
/// # Errors
///
/// Returns [`SluiceError::InvalidConfig`] if `size` is zero.
pub fn chunk<S, T>(cancel: &CancellationToken, input: S, size: usize) -> Result<Pipe<Vec<T>>>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
{
    if size == 0 {
        return Err(SluiceError::invalid_config("chunk", "size must be at least 1"));
    }

    let (outlet, output) = pipe(cancel);
    let cancel = cancel.clone();

    spawn_stage("chunk", async move {
        let mut input = input;
        let mut buffer = Vec::new();
        loop {
            match pull(&mut input, &cancel).await {
                Pulled::Item(item) => {
                    buffer.push(item);
                    if buffer.len() == size {
                        forward!(outlet, mem::take(&mut buffer));
                    }
                }
                Pulled::Closed => break,
                Pulled::Cancelled => return StageExit::Cancelled,
            }
        }

        if !buffer.is_empty() {
            forward!(outlet, buffer);
        }
        StageExit::Completed
    });

    Ok(output)
}
