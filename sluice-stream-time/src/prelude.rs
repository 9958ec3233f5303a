// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Convenience re-exports for time-based operators.

pub use crate::{rate_limiter, sample, throttle, RateLimit};
