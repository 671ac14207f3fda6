use crate::shared::Result;
use std::future::Future;
use std::time::Duration;

/// Base backoff between attempts; attempt `n` waits `n * RETRY_BACKOFF_MS`.
pub const RETRY_BACKOFF_MS: u64 = 100;

/// Runs `operation` up to `max_retries` times, sleeping with linear backoff
/// between failed attempts. Returns the last error when every attempt fails.
///
/// A `max_retries` of 0 is treated as 1 so the operation always runs once.
pub async fn retry_with_backoff<T, F, Fut>(max_retries: u32, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let attempts = max_retries.max(1);
    let mut last_error = None;

    for attempt in 1..=attempts {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                last_error = Some(e);
                if attempt < attempts {
                    tokio::time::sleep(Duration::from_millis(RETRY_BACKOFF_MS * attempt as u64))
                        .await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow::anyhow!("retry loop ran zero attempts")))
}
