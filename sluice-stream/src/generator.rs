// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Source operator turning a fixed sequence into a pipe.

use sluice_core::{forward, pipe, spawn_stage, CancellationToken, Pipe, StageExit};

/// Emit every item of `items` in order, then close.
///
/// If `cancel` fires mid-sequence the pipe closes without the remaining items.
///
/// # Example
///
/// ```rust
/// use futures::StreamExt;
/// use sluice_core::CancellationToken;
/// use sluice_stream::generate;
///
/// # #[tokio::main]
/// # async fn main() {
/// let cancel = CancellationToken::new();
/// let items: Vec<i32> = generate(&cancel, vec![1, 2, 3]).collect().await;
/// assert_eq!(items, vec![1, 2, 3]);
/// # }
/// ```
pub fn generate<I>(cancel: &CancellationToken, items: I) -> Pipe<I::Item>
where
    I: IntoIterator,
    I::IntoIter: Send + 'static,
    I::Item: Send + 'static,
{
    let (outlet, output) = pipe(cancel);
    let items = items.into_iter();

    spawn_stage("generate", async move {
        for item in items {
            forward!(outlet, item);
        }
        StageExit::Completed
    });

    output
}
