// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! All operators in one import.

pub use crate::{
    broadcast, chunk, collect_results, distinct, distinct_by, fan_in, fan_out, filter, filter_all,
    generate, map, partition, reduce, skip_items, take_items, try_map, when_all, when_any, window,
    Predicate,
};
