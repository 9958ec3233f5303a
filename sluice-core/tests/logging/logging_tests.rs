// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

// Same call shapes must build with and without the `tracing` feature.

#[test]
#[allow(unused_variables)]
fn test_logging_macros_accept_fields_and_messages() {
    let dropped: u64 = 3;
    let exit = "cancelled";

    sluice_core::trace!(dropped, "rate limiter buffer full, item dropped");
    sluice_core::debug!(stage = "window", ?exit, "stage finished");
    sluice_core::debug!("plain message");
}
