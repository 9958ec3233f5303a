// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::channel::mpsc;
use futures::stream::{Stream, StreamExt};
use sluice_core::{pipe, CancellationToken, Outlet, Pipe};
use std::time::Duration;
use tokio::time::{sleep, timeout, Instant};

/// Drain `stream` to the end, panicking if it is still open after `timeout_ms`.
pub async fn collect_within<S, T>(stream: S, timeout_ms: u64) -> Vec<T>
where
    S: Stream<Item = T>,
{
    timeout(Duration::from_millis(timeout_ms), stream.collect::<Vec<T>>())
        .await
        .unwrap_or_else(|_| panic!("stream did not end within {timeout_ms}ms"))
}

/// Like [`collect_within`], pairing each item with the time elapsed since the call.
///
/// Uses tokio's clock, so the timings are exact under paused time.
pub async fn collect_timed<S, T>(stream: S, timeout_ms: u64) -> Vec<(T, Duration)>
where
    S: Stream<Item = T>,
{
    let start = Instant::now();
    collect_within(stream.map(move |item| (item, start.elapsed())), timeout_ms).await
}

/// Next item of `stream`, panicking if nothing (not even the end) arrives in time.
pub async fn next_within<S, T>(stream: &mut S, timeout_ms: u64) -> Option<T>
where
    S: Stream<Item = T> + Unpin,
{
    timeout(Duration::from_millis(timeout_ms), stream.next())
        .await
        .unwrap_or_else(|_| panic!("no item within {timeout_ms}ms"))
}

/// Assert that `stream` ends (yields `None`) within `timeout_ms`.
pub async fn assert_stream_ended<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    assert!(
        next_within(stream, timeout_ms).await.is_none(),
        "expected stream to have ended"
    );
}

/// Assert that `stream` neither yields nor ends for `timeout_ms`.
pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _item = stream.next() => {
            panic!("Unexpected emission, expected the stream to stay silent.");
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

/// A completion signal for barrier tests: the pipe ends when the outlet is dropped.
pub fn completion_signal() -> (Outlet<()>, Pipe<()>) {
    pipe(&CancellationToken::new())
}

/// Unbounded channel for feeding an operator by hand from a test.
pub fn test_channel<T>() -> (mpsc::UnboundedSender<T>, mpsc::UnboundedReceiver<T>) {
    mpsc::unbounded()
}
