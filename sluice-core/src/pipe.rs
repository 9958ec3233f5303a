// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The stream type connecting pipeline stages.
//!
//! A [`Pipe`] is the read side handed to the consumer, an [`Outlet`] is the write
//! side kept by the stage that owns the stream. The channel between them holds a
//! single item, so a stage that runs ahead of its consumer waits on its next send.
//!
//! Every send races the stage's cancellation token, and a dropped `Pipe` is seen by
//! the owning stage as [`Halted::Disconnected`]. Either way the stage stops instead
//! of waiting on a consumer that is gone.

use crate::CancellationToken;
use core::pin::{pin, Pin};
use core::task::{Context, Poll};
use futures::future::{select, Either};
use futures::Stream;
use tokio::sync::mpsc;

const PIPE_CAPACITY: usize = 1;

/// Why an [`Outlet`] refused an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Halted {
    /// The stage's cancellation token fired.
    #[error("stage cancelled")]
    Cancelled,
    /// The consumer dropped its [`Pipe`].
    #[error("downstream pipe dropped")]
    Disconnected,
}

/// Create a connected `(Outlet, Pipe)` pair whose sends observe `cancel`.
pub fn pipe<T>(cancel: &CancellationToken) -> (Outlet<T>, Pipe<T>) {
    let (tx, rx) = mpsc::channel(PIPE_CAPACITY);
    (
        Outlet {
            tx,
            cancel: cancel.clone(),
        },
        Pipe { rx },
    )
}

/// Read side of a stage's output.
///
/// Single consumer: to feed several stages from one stream use `broadcast`.
/// The pipe ends once every [`Outlet`] for it has been dropped.
#[derive(Debug)]
pub struct Pipe<T> {
    rx: mpsc::Receiver<T>,
}

impl<T> Pipe<T> {
    /// Receive the next item, or `None` once the pipe is closed.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

impl<T> Stream for Pipe<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.rx.poll_recv(cx)
    }
}

/// Write side of a stage's output.
///
/// Cloning an outlet adds another writer; the pipe closes when the last one drops.
#[derive(Debug)]
pub struct Outlet<T> {
    tx: mpsc::Sender<T>,
    cancel: CancellationToken,
}

impl<T> Clone for Outlet<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            cancel: self.cancel.clone(),
        }
    }
}

impl<T> Outlet<T> {
    /// Send `item`, waiting for room in the pipe.
    ///
    /// # Errors
    ///
    /// Returns [`Halted::Cancelled`] if the token fires before the item is
    /// accepted, [`Halted::Disconnected`] if the consumer dropped its pipe.
    pub async fn send(&self, item: T) -> Result<(), Halted> {
        if self.cancel.is_cancelled() {
            return Err(Halted::Cancelled);
        }

        let send = pin!(self.tx.send(item));
        match select(send, self.cancel.cancelled()).await {
            Either::Left((Ok(()), _)) => Ok(()),
            Either::Left((Err(_), _)) => Err(Halted::Disconnected),
            Either::Right(((), _)) => Err(Halted::Cancelled),
        }
    }

    /// Whether the consumer has dropped its pipe.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
