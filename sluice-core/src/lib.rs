// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Plumbing shared by every sluice operator.
//!
//! - [`CancellationToken`] - hierarchical, one-way cancellation signal
//! - [`Pipe`] / [`Outlet`] - read and write halves of a stage's output stream
//! - [`spawn_stage`] / [`pull`] - run a stage worker and read its input under cancellation
//! - [`SluiceError`] - construction-time errors and aggregated user errors

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]

mod logging;

pub mod cancellation_token;
pub mod error;
pub mod pipe;
pub mod stage;

#[cfg(feature = "tracing")]
#[doc(hidden)]
pub use tracing::{debug, trace};

pub use self::cancellation_token::{CancelCause, CancellationToken, Cancelled, CancelledOwned};
pub use self::error::{Result, SluiceError};
pub use self::pipe::{pipe, Halted, Outlet, Pipe};
pub use self::stage::{pull, spawn_stage, Pulled, StageExit};
