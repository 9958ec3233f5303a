// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::time::Duration;
use sluice_core::CancellationToken;
use tokio::time::Instant;

// About 30 years.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// `now + period`, saturating to a far-future instant instead of overflowing.
pub(crate) fn deadline_after(now: Instant, period: Duration) -> Instant {
    now.checked_add(period).unwrap_or_else(|| now + FAR_FUTURE)
}

/// Sleep until `deadline`. Returns `false` if `cancel` fired first.
pub(crate) async fn sleep_until(deadline: Instant, cancel: &CancellationToken) -> bool {
    tokio::select! {
        () = tokio::time::sleep_until(deadline) => true,
        () = cancel.cancelled() => false,
    }
}
