// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for sluice operators.
//!
//! Designed for use in development and testing only, not for production code.
//!
//! # Example
//!
//! ```rust
//! use sluice_test_utils::collect_within;
//!
//! # async fn example() {
//! let items = collect_within(futures::stream::iter(vec![1, 2, 3]), 100).await;
//! assert_eq!(items, vec![1, 2, 3]);
//! # }
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod helpers;

pub use helpers::{
    assert_no_element_emitted, assert_stream_ended, collect_timed, collect_within,
    completion_signal, next_within, test_channel,
};
