// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Spawning stages and reading their input under cancellation.

use crate::{CancellationToken, Halted};
use core::future::Future;
use futures::future::{select, Either};
use futures::{Stream, StreamExt};
use tokio::task::JoinHandle;

/// How a stage's worker ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageExit {
    /// Upstream was exhausted (or the stage reached its own end condition).
    Completed,
    /// The cancellation token fired.
    Cancelled,
    /// Every consumer dropped its output pipe.
    Disconnected,
}

impl From<Halted> for StageExit {
    fn from(halted: Halted) -> Self {
        match halted {
            Halted::Cancelled => Self::Cancelled,
            Halted::Disconnected => Self::Disconnected,
        }
    }
}

/// Outcome of [`pull`].
#[derive(Debug, PartialEq, Eq)]
pub enum Pulled<T> {
    Item(T),
    Closed,
    Cancelled,
}

/// Wait for the next upstream item, giving up as soon as `cancel` fires.
pub async fn pull<S>(input: &mut S, cancel: &CancellationToken) -> Pulled<S::Item>
where
    S: Stream + Unpin,
{
    if cancel.is_cancelled() {
        return Pulled::Cancelled;
    }

    match select(input.next(), cancel.cancelled()).await {
        Either::Left((Some(item), _)) => Pulled::Item(item),
        Either::Left((None, _)) => Pulled::Closed,
        Either::Right(((), _)) => Pulled::Cancelled,
    }
}

/// Send an item through an [`Outlet`](crate::Outlet), returning the matching
/// [`StageExit`] from the enclosing stage worker if the send is refused.
#[macro_export]
macro_rules! forward {
    ($outlet:expr, $item:expr) => {
        if let Err(halted) = $outlet.send($item).await {
            return $crate::StageExit::from(halted);
        }
    };
}

/// Run a stage worker on the tokio runtime.
///
/// Must be called from within a runtime context.
pub fn spawn_stage<F>(name: &'static str, worker: F) -> JoinHandle<()>
where
    F: Future<Output = StageExit> + Send + 'static,
{
    crate::trace!(stage = name, "stage started");
    tokio::spawn(async move {
        let exit = worker.await;
        crate::debug!(stage = name, ?exit, "stage finished");
    })
}
