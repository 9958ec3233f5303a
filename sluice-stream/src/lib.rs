// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrent pipeline operators.
//!
//! Each operator takes a [`CancellationToken`](sluice_core::CancellationToken) first,
//! spawns its own stage worker and returns the [`Pipe`](sluice_core::Pipe)(s) it
//! writes to. Stages are connected only through pipes; none shares state with
//! another.
//!
//! # Operators
//!
//! | Kind | Operators |
//! |------|-----------|
//! | Source | [`generate`] |
//! | Transform | [`take_items`], [`skip_items`], [`filter`], [`filter_all`], [`map`], [`try_map`], [`distinct`], [`distinct_by`], [`chunk`], [`window`] |
//! | Fan | [`fan_in`], [`fan_out`], [`broadcast`], [`partition`] |
//! | Terminal | [`reduce`], [`when_all`], [`when_any`], [`collect_results`] |
//!
//! Time-based flow control (throttle, sample, rate limiting) lives in
//! `sluice-stream-time`.
//!
//! # Ordering
//!
//! Single-input, single-output operators preserve input order. [`fan_in`] and
//! [`fan_out`] do not order items across their inputs or workers.
//!
//! # Example
//!
//! ```rust
//! use futures::StreamExt;
//! use sluice_core::CancellationToken;
//! use sluice_stream::prelude::*;
//!
//! # #[tokio::main]
//! # async fn main() -> sluice_core::Result<()> {
//! let cancel = CancellationToken::new();
//!
//! let numbers = generate(&cancel, 1..=10);
//! let evens = filter(&cancel, numbers, |n: &i32| n % 2 == 0);
//! let pairs = chunk(&cancel, evens, 2)?;
//!
//! let pairs: Vec<Vec<i32>> = pairs.collect().await;
//! assert_eq!(pairs, vec![vec![2, 4], vec![6, 8], vec![10]]);
//! # Ok(())
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod broadcast;
pub mod chunk;
pub mod collect_results;
pub mod distinct;
pub mod fan_in;
pub mod fan_out;
pub mod filter;
pub mod generator;
pub mod map;
pub mod partition;
pub mod prelude;
pub mod reduce;
pub mod skip_items;
pub mod take_items;
pub mod when;
pub mod window;

pub use self::broadcast::broadcast;
pub use self::chunk::chunk;
pub use self::collect_results::collect_results;
pub use self::distinct::{distinct, distinct_by};
pub use self::fan_in::fan_in;
pub use self::fan_out::fan_out;
pub use self::filter::{filter, filter_all, Predicate};
pub use self::generator::generate;
pub use self::map::{map, try_map};
pub use self::partition::partition;
pub use self::reduce::reduce;
pub use self::skip_items::skip_items;
pub use self::take_items::take_items;
pub use self::when::{when_all, when_any};
pub use self::window::window;
