// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Predicate filtering.
//!
//! [`filter_all`] keeps an item only if every predicate accepts it. Predicates run
//! in order and evaluation stops at the first rejection. An empty predicate list
//! forwards everything.

use futures::Stream;
use sluice_core::{forward, pipe, pull, spawn_stage, CancellationToken, Pipe, Pulled, StageExit};

/// A boxed predicate, so differently-typed closures can share one list.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Forward items for which `predicate` returns `true`.
pub fn filter<S, T, F>(cancel: &CancellationToken, input: S, predicate: F) -> Pipe<T>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
    F: Fn(&T) -> bool + Send + Sync + 'static,
{
    filter_all(cancel, input, vec![Box::new(predicate)])
}

/// Forward items accepted by **all** of `predicates`.
///
/// # Example
///
/// ```rust
/// use futures::StreamExt;
/// use sluice_core::CancellationToken;
/// use sluice_stream::{filter_all, generate, Predicate};
///
/// # #[tokio::main]
/// # async fn main() {
/// let cancel = CancellationToken::new();
/// let predicates: Vec<Predicate<i32>> =
///     vec![Box::new(|n: &i32| n % 2 == 0), Box::new(|n: &i32| *n > 2)];
/// let kept: Vec<i32> = filter_all(&cancel, generate(&cancel, 1..=6), predicates).collect().await;
/// assert_eq!(kept, vec![4, 6]);
/// # }
/// ```
pub fn filter_all<S, T>(
    cancel: &CancellationToken,
    input: S,
    predicates: Vec<Predicate<T>>,
) -> Pipe<T>
where
    S: Stream<Item = T> + Send + Unpin + 'static,
    T: Send + 'static,
{
    let (outlet, output) = pipe(cancel);
    let cancel = cancel.clone();

    spawn_stage("filter", async move {
        let mut input = input;
        loop {
            match pull(&mut input, &cancel).await {
                Pulled::Item(item) => {
                    if predicates.iter().all(|accept| accept(&item)) {
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
