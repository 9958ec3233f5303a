// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Duplicating one stream to several consumers.
//!
//! ## Characteristics
//!
//! - **Full duplication**: every output receives every item, in input order
//! - **Lock-step**: the next upstream item is pulled only after every live output
//!   has accepted the current one, so the slowest consumer paces the whole stage
//! - **Dropped consumers**: an output whose pipe was dropped is skipped from then
//!   on; the stage stops once no output is left

use futures::future::join_all;
use futures::Stream;
use sluice_core::{
    pipe, pull, spawn_stage, CancellationToken, Halted, Pipe, Pulled, Result, SluiceError,
    StageExit,
};

/// Send every item of `input` to each of `n` output pipes.
///
/// # Errors
///
/// Returns [`SluiceError::InvalidConfig`] if `n` is zero.
pub fn broadcast<S, T>(cancel: &CancellationToken, input: S, n: usize) -> Result<Vec<Pipe<T>>>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Clone + Send + 'static,
{
    if n == 0 {
        return Err(SluiceError::invalid_config(
            "broadcast",
            "output count must be at least 1",
        ));
    }

    let (outlets, outputs): (Vec<_>, Vec<_>) = (0..n).map(|_| pipe(cancel)).unzip();
    let cancel = cancel.clone();

    spawn_stage("broadcast", async move {
        let mut input = input;
        let mut outlets = outlets;
        loop {
            match pull(&mut input, &cancel).await {
                Pulled::Item(item) => {
                    let sends = outlets.iter().map(|outlet| outlet.send(item.clone()));
                    let sent = join_all(sends).await;
                    if sent.contains(&Err(Halted::Cancelled)) {
                        return StageExit::Cancelled;
                    }

                    outlets = outlets
                        .into_iter()
                        .zip(sent)
                        .filter_map(|(outlet, result)| result.is_ok().then_some(outlet))
                        .collect();
                    if outlets.is_empty() {
                        return StageExit::Disconnected;
                    }
                }
                Pulled::Closed => return StageExit::Completed,
                Pulled::Cancelled => return StageExit::Cancelled,
            }
        }
    });

    Ok(outputs)
}
