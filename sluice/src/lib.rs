// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Sluice
//!
//! Composable stream pipelines where every stage runs concurrently and every
//! stage stops on one shared cancellation signal.
//!
//! ## Overview
//!
//! A pipeline is a chain of operator calls. Each call spawns its stage on the
//! tokio runtime and returns the stage's output [`Pipe`], which is itself a
//! [`futures::Stream`](https://docs.rs/futures) and the input of the next stage.
//!
//! - **Transform**: [`map`], [`try_map`], [`filter`], [`take_items`], [`skip_items`],
//!   [`distinct`], [`chunk`], [`window`]
//! - **Flow control**: [`throttle`], [`sample`], [`rate_limiter`]
//! - **Fan**: [`fan_in`], [`fan_out`], [`broadcast`], [`partition`]
//! - **Terminal**: [`reduce`], [`when_all`], [`when_any`], [`collect_results`]
//!
//! Stages end in one of three ways: upstream closes, the
//! [`CancellationToken`] fires, or the consumer drops the stage's pipe. A
//! dropped pipe stops the stage that feeds it, which drops its own input in
//! turn, so abandoning the end of a pipeline unwinds all of it.
//!
//! ## Quick Start
//!
//! ```rust
//! use sluice::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> sluice::Result<()> {
//!     let cancel = CancellationToken::new();
//!
//!     let numbers = generate(&cancel, 1..=20);
//!     let evens = filter(&cancel, numbers, |n: &i32| n % 2 == 0);
//!     let squares = fan_out(&cancel, evens, 4, |n| n * n)?;
//!     let mut total = reduce(&cancel, fan_in(&cancel, squares), 0, 0, |acc, n| acc + n);
//!
//!     assert_eq!(total.recv().await, Some(1540));
//!     Ok(())
//! }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub use sluice_core::{
    pipe, CancelCause, CancellationToken, Halted, Outlet, Pipe, Result, SluiceError,
};
pub use sluice_stream::{
    broadcast, chunk, collect_results, distinct, distinct_by, fan_in, fan_out, filter, filter_all,
    generate, map, partition, reduce, skip_items, take_items, try_map, when_all, when_any, window,
    Predicate,
};
pub use sluice_stream_time::{rate_limiter, sample, throttle, RateLimit};

/// Prelude module for convenient imports
pub mod prelude {
    pub use sluice_core::{CancelCause, CancellationToken, Pipe};
    pub use sluice_stream::prelude::*;
    pub use sluice_stream_time::prelude::*;
}
