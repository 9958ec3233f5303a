// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Sliding and hopping windows.
//!
//! A window is emitted every time the buffer holds `size` items; the oldest
//! `slide` items are then discarded. With `slide < size` consecutive windows share
//! `size - slide` items. With `slide > size` the windows hop: after an emission
//! the next `slide - size` upstream items are skipped before filling resumes.
//!
//! When upstream closes, whatever is left in the buffer is emitted as a final,
//! shorter window.
//!
//! # Example
//!
//! ```rust
//! use futures::StreamExt;
//! use sluice_core::CancellationToken;
//! use sluice_stream::{generate, window};
//!
//! # #[tokio::main]
//! # async fn main() -> sluice_core::Result<()> {
//! let cancel = CancellationToken::new();
//! let windows: Vec<Vec<i32>> = window(&cancel, generate(&cancel, 1..=5), 3, 2)?
//!     .collect()
//!     .await;
//! assert_eq!(windows, vec![vec![1, 2, 3], vec![3, 4, 5], vec![5]]);
//! # Ok(())
//! # }
//! ```

use futures::Stream;
use sluice_core::{
    forward, pipe, pull, spawn_stage, CancellationToken, Pipe, Pulled, Result, SluiceError,
    StageExit,
};
use std::collections::VecDeque;

/// Emit overlapping (or hopping) windows of `size` items, advancing by `slide`.
///
/// # Errors
///
/// Returns [`SluiceError::InvalidConfig`] if `size` or `slide` is zero.
pub fn window<S, T>(
    cancel: &CancellationToken,
    input: S,
    size: usize,
    slide: usize,
) -> Result<Pipe<Vec<T>>>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Clone + Send + 'static,
{
    if size == 0 {
        return Err(SluiceError::invalid_config("window", "size must be at least 1"));
    }
    if slide == 0 {
        return Err(SluiceError::invalid_config("window", "slide must be at least 1"));
    }

    let (outlet, output) = pipe(cancel);
    let cancel = cancel.clone();

    spawn_stage("window", async move {
        let mut input = input;
        let mut buffer = VecDeque::new();
        let mut skip = 0;
        loop {
            match pull(&mut input, &cancel).await {
                Pulled::Item(_) if skip > 0 => skip -= 1,
                Pulled::Item(item) => {
                    buffer.push_back(item);
                    if buffer.len() == size {
                        forward!(outlet, buffer.iter().cloned().collect::<Vec<T>>());
                        let evicted = slide.min(size);
                        buffer.drain(..evicted);
                        skip = slide - evicted;
                    }
                }
                Pulled::Closed => break,
                Pulled::Cancelled => return StageExit::Cancelled,
            }
        }

        if !buffer.is_empty() {
            forward!(outlet, Vec::from(buffer));
        }
        StageExit::Completed
    });

    Ok(output)
}
