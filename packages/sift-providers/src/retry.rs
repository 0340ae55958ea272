use std::{future::Future, time::Duration};

use sift_config::RetryPolicy;

use crate::Result;

/// Runs `op` until it succeeds, fails with a non-retryable error, or the policy's attempts run out.
pub async fn with_backoff<T, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> Result<T>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = Result<T>>,
{
	let mut attempt = 1;

	loop {
		match op().await {
			Ok(value) => return Ok(value),
			Err(err) if err.is_retryable() && attempt < policy.max_attempts => {
				let delay = backoff_delay(policy, attempt);

				tracing::warn!(
					provider = label,
					attempt,
					delay_ms = delay.as_millis() as u64,
					error = %err,
					"Provider call failed. Retrying."
				);

				tokio::time::sleep(delay).await;

				attempt += 1;
			},
			Err(err) => return Err(err),
		}
	}
}

/// Exponential backoff for the given 1-based attempt, capped at `max_backoff_ms`.
pub fn backoff_delay(policy: &RetryPolicy, attempt: u32) -> Duration {
	let factor = 1_u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
	let millis = policy.base_backoff_ms.saturating_mul(factor).min(policy.max_backoff_ms);

	Duration::from_millis(millis)
}
