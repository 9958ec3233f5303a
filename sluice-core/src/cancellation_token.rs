// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hierarchical cancellation token.
//!
//! Every pipeline stage observes one of these. Cancelling a token wakes every
//! waiter and cancels every token derived from it with [`CancellationToken::child_token`].
//! Cancelling a child never touches its parent.

use core::future::Future;
use core::pin::Pin;
use core::task::{ready, Context, Poll};
use core::time::Duration;
use event_listener::{Event, EventListener};
use futures::future::{select, Either};
use futures::stream::{self, Stream, StreamExt};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Why a token was cancelled.
///
/// The first cause recorded wins; later cancellations leave it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelCause {
    /// `cancel()` was called on this token.
    Requested,
    /// An ancestor token was cancelled.
    ParentCancelled,
    /// A deadline armed with [`CancellationToken::cancel_after`] expired.
    DeadlineExceeded,
    /// Every completion signal watched by a `when_all` barrier finished.
    AllCompleted,
    /// One completion signal watched by a `when_any` barrier finished.
    AnyCompleted,
}

/// Cancellation signal shared by all stages of a pipeline.
///
/// Clones share the same state. Use [`child_token`](Self::child_token) to derive
/// a token that is cancelled together with this one but can also be cancelled
/// on its own.
///
/// # Example
///
/// ```
/// use sluice_core::{CancelCause, CancellationToken};
///
/// let parent = CancellationToken::new();
/// let child = parent.child_token();
///
/// child.cancel();
/// assert!(child.is_cancelled());
/// assert!(!parent.is_cancelled());
///
/// let other = parent.child_token();
/// parent.cancel();
/// assert_eq!(other.cause(), Some(CancelCause::ParentCancelled));
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    event: Event,
    state: Mutex<State>,
}

#[derive(Debug, Default)]
struct State {
    cause: Option<CancelCause>,
    children: Vec<Weak<Inner>>,
}

impl Inner {
    fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            event: Event::new(),
            state: Mutex::new(State::default()),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    fn cancel(&self, cause: CancelCause) {
        let children = {
            let mut state = self.state.lock();
            if state.cause.is_some() {
                return;
            }
            state.cause = Some(cause);
            self.cancelled.store(true, Ordering::Release);
            core::mem::take(&mut state.children)
        };

        self.event.notify(usize::MAX);

        // Parent lock is released here, so child locks are never nested in it.
        for child in children.iter().filter_map(Weak::upgrade) {
            child.cancel(CancelCause::ParentCancelled);
        }
    }
}

impl CancellationToken {
    /// Create a new root token. It starts out not cancelled.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner::new()),
        }
    }

    /// Derive a child token.
    ///
    /// The child is cancelled whenever this token is. If this token is already
    /// cancelled the child is returned already cancelled.
    pub fn child_token(&self) -> Self {
        let child = Arc::new(Inner::new());
        {
            let mut state = self.inner.state.lock();
            if state.cause.is_none() {
                state.children.retain(|c| c.strong_count() > 0);
                state.children.push(Arc::downgrade(&child));
                return Self { inner: child };
            }
        }
        child.cancel(CancelCause::ParentCancelled);
        Self { inner: child }
    }

    /// Cancel the token with [`CancelCause::Requested`].
    ///
    /// Idempotent: only the first call has an effect.
    pub fn cancel(&self) {
        self.inner.cancel(CancelCause::Requested);
    }

    /// Cancel the token recording `cause`, unless it is already cancelled.
    pub fn cancel_with(&self, cause: CancelCause) {
        self.inner.cancel(cause);
    }

    /// Check if the token has been cancelled (non-blocking).
    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    /// The recorded cause, or `None` while the token is live.
    pub fn cause(&self) -> Option<CancelCause> {
        self.inner.state.lock().cause
    }

    /// Wait until the token is cancelled.
    ///
    /// Resolves immediately if it already is.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            inner: &self.inner,
            listener: None,
        }
    }

    /// Owned variant of [`cancelled`](Self::cancelled), usable in spawned tasks.
    pub fn cancelled_owned(self) -> CancelledOwned {
        CancelledOwned {
            inner: self.inner,
            listener: None,
        }
    }

    /// Cancel with [`CancelCause::DeadlineExceeded`] once `duration` elapses.
    ///
    /// Spawns a timer on the current tokio runtime; the timer stops early if the
    /// token is cancelled first.
    pub fn cancel_after(&self, duration: Duration) {
        let token = self.clone();
        tokio::spawn(async move {
            let deadline = core::pin::pin!(tokio::time::sleep(duration));
            if let Either::Left(_) = select(deadline, token.cancelled()).await {
                token.cancel_with(CancelCause::DeadlineExceeded);
            }
        });
    }

    /// A stream that never yields and ends once the token is cancelled.
    ///
    /// Lets a token take part in `when_all` / `when_any` as a completion signal.
    pub fn done(&self) -> impl Stream<Item = ()> + Send + Unpin + 'static {
        stream::once(self.clone().cancelled_owned()).filter(|_| futures::future::ready(false))
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

fn poll_cancelled(
    inner: &Inner,
    listener: &mut Option<EventListener>,
    cx: &mut Context<'_>,
) -> Poll<()> {
    loop {
        if inner.is_cancelled() {
            return Poll::Ready(());
        }

        match listener.as_mut() {
            // Flag is re-checked on the next turn, after registering.
            None => *listener = Some(inner.event.listen()),
            Some(l) => {
                ready!(Pin::new(l).poll(cx));
                *listener = None;
            }
        }
    }
}

/// Future returned by [`CancellationToken::cancelled()`].
#[derive(Debug)]
pub struct Cancelled<'a> {
    inner: &'a Inner,
    listener: Option<EventListener>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = &mut *self;
        poll_cancelled(this.inner, &mut this.listener, cx)
    }
}

/// Future returned by [`CancellationToken::cancelled_owned()`].
#[derive(Debug)]
pub struct CancelledOwned {
    inner: Arc<Inner>,
    listener: Option<EventListener>,
}

impl Future for CancelledOwned {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = &mut *self;
        poll_cancelled(&this.inner, &mut this.listener, cx)
    }
}
