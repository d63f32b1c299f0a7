//! Bounded store calls
//!
//! Every call into the relational store runs under a fixed upper bound so a
//! stuck connection surfaces as an error instead of a hung request.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Default bound for a single store call
pub const STORE_TIMEOUT: Duration = Duration::from_secs(3);

/// Failure of a bounded call
#[derive(Debug, Error)]
pub enum DeadlineError<E> {
    #[error("operation did not complete within {0:?}")]
    Elapsed(Duration),

    #[error(transparent)]
    Inner(E),
}

/// Await `fut`, giving up after `limit`
pub async fn within<F, T, E>(limit: Duration, fut: F) -> Result<T, DeadlineError<E>>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result.map_err(DeadlineError::Inner),
        Err(_) => Err(DeadlineError::Elapsed(limit)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_within_passes_result_through() {
        let ok: Result<u8, DeadlineError<&str>> =
            within(Duration::from_secs(1), async { Ok(7) }).await;
        assert_eq!(ok.unwrap(), 7);

        let err: Result<u8, DeadlineError<&str>> =
            within(Duration::from_secs(1), async { Err("boom") }).await;
        assert!(matches!(err, Err(DeadlineError::Inner("boom"))));
    }

    #[tokio::test]
    async fn test_within_times_out() {
        let result: Result<(), DeadlineError<&str>> = within(Duration::from_millis(50), async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Ok(())
        })
        .await;

        assert!(matches!(result, Err(DeadlineError::Elapsed(d)) if d == Duration::from_millis(50)));
    }
}
