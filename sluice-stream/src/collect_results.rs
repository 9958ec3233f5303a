// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use futures::Stream;
use sluice_core::{pull, CancellationToken, Pulled, Result, SluiceError};

/// Drain a stream of per-item results, keeping every success and every failure.
///
/// This is the caller-side end of a worker pipeline built with
/// [`try_map`](crate::try_map) or a fallible [`fan_out`](crate::fan_out): failures
/// travel as items, and are surfaced together once the stream ends. If `cancel`
/// fires first, whatever was gathered so far is judged the same way.
///
/// # Errors
///
/// Returns [`SluiceError::MultipleErrors`] holding every `Err` seen, if any.
pub async fn collect_results<S, T, E>(cancel: &CancellationToken, input: S) -> Result<Vec<T>>
where
    S: Stream<Item = std::result::Result<T, E>> + Unpin,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut input = input;
    let mut values = Vec::new();
    let mut errors = Vec::new();

    while let Pulled::Item(result) = pull(&mut input, cancel).await {
        match result {
            Ok(value) => values.push(value),
            Err(error) => errors.push(error),
        }
    }

    if errors.is_empty() {
        Ok(values)
    } else {
        Err(SluiceError::from_user_errors(errors))
    }
}
