// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Time-based pipeline operators.
//!
//! | Operator | Loses items | Behavior |
//! |---|---|---|
//! | [`throttle`] | no | at least `rate` between emissions, upstream is slowed down |
//! | [`sample`] | yes | at most one item per `rate`, items inside an interval are discarded |
//! | [`rate_limiter`] | yes | token bucket, `limit` per `per`, bounded overflow buffer |
//!
//! All three run on tokio's clock, so tests can drive them with paused time.
//! Like every sluice operator they take the
//! [`CancellationToken`](sluice_core::CancellationToken) first, and a cancelled
//! token ends any wait on a timer at once.

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

pub mod prelude;
pub mod rate_limiter;
pub mod sample;
pub mod throttle;
mod timer;

pub use self::rate_limiter::{rate_limiter, RateLimit};
pub use self::sample::sample;
pub use self::throttle::throttle;
