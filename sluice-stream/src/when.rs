// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Barrier operators over completion signals.
//!
//! A completion signal is any stream whose end marks the end of some component's
//! lifetime: an operator's output pipe, a pipe whose writer a component drops on
//! exit, or [`CancellationToken::done`]. Items on a signal are drained and ignored;
//! only its end counts.
//!
//! Both barriers return a child of `parent`, so cancelling `parent` cancels the
//! returned token at once, whatever the signals are doing. Stages started on the
//! returned token are cancelled together when the barrier trips.

use core::pin::pin;
use futures::future::{join_all, select, Either};
use futures::stream::{FuturesUnordered, Stream, StreamExt};
use sluice_core::{spawn_stage, CancelCause, CancellationToken, StageExit};

async fn drain<S>(mut signal: S)
where
    S: Stream + Unpin,
{
    while signal.next().await.is_some() {}
}

/// Token that is cancelled once **every** signal has ended.
///
/// With no signals the token is returned already cancelled.
pub fn when_all<I, S>(parent: &CancellationToken, signals: I) -> CancellationToken
where
    I: IntoIterator<Item = S>,
    S: Stream + Send + Unpin + 'static,
    S::Item: Send,
{
    let derived = parent.child_token();
    let signals: Vec<S> = signals.into_iter().collect();
    if signals.is_empty() {
        derived.cancel_with(CancelCause::AllCompleted);
        return derived;
    }

    let watcher = derived.clone();

    spawn_stage("when_all", async move {
        let all = pin!(join_all(signals.into_iter().map(drain)));
        match select(all, watcher.cancelled()).await {
            Either::Left(_) => {
                watcher.cancel_with(CancelCause::AllCompleted);
                StageExit::Completed
            }
            Either::Right(_) => StageExit::Cancelled,
        }
    });

    derived
}

/// Token that is cancelled as soon as **any** signal ends.
///
/// With no signals only `parent` can cancel the token.
pub fn when_any<I, S>(parent: &CancellationToken, signals: I) -> CancellationToken
where
    I: IntoIterator<Item = S>,
    S: Stream + Send + Unpin + 'static,
    S::Item: Send,
{
    let derived = parent.child_token();
    let watcher = derived.clone();
    let mut drains: FuturesUnordered<_> = signals.into_iter().map(drain).collect();

    spawn_stage("when_any", async move {
        if drains.is_empty() {
            watcher.cancelled().await;
            return StageExit::Cancelled;
        }

        match select(drains.next(), watcher.cancelled()).await {
            Either::Left(_) => {
                watcher.cancel_with(CancelCause::AnyCompleted);
                StageExit::Completed
            }
            Either::Right(_) => StageExit::Cancelled,
        }
    });

    derived
}
