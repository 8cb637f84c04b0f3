use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::RetryConfig;
use crate::error::FetchError;

/// Re-attempt a fetch while its failures look transient.
///
/// Permanent failures (see [`FetchError::is_transient`]) are returned on
/// the spot so the batch can skip the document instead of hammering a
/// page that will 404 forever. Transient ones back off exponentially
/// with jitter until `max_attempts` is exhausted.
pub async fn retry_transient<T, F, Fut>(
    config: &RetryConfig,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0;
    let mut backoff_ms = config.backoff_base_ms;

    loop {
        attempt += 1;

        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !err.is_transient() {
            debug!("Permanent failure, not retrying: {}", err);
            return Err(err);
        }
        if attempt >= config.max_attempts {
            warn!("Giving up after {} attempts: {}", attempt, err);
            return Err(err);
        }

        let jitter = rand::random::<u64>() % config.backoff_base_ms.max(1);
        let delay = Duration::from_millis(backoff_ms + jitter);
        warn!("Attempt {} failed: {}. Retrying in {:?}", attempt, err, delay);

        sleep(delay).await;
        backoff_ms = backoff_ms.saturating_mul(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    const URL: &str = "https://code4rena.com/reports/2022-01-demo";

    fn config() -> RetryConfig {
        RetryConfig {
            max_attempts: 3,
            backoff_base_ms: 5,
        }
    }

    fn status(code: u16) -> FetchError {
        FetchError::Status {
            url: URL.to_string(),
            status: code,
        }
    }

    #[test]
    fn test_transient_classification() {
        assert!(status(500).is_transient());
        assert!(status(503).is_transient());
        assert!(!status(404).is_transient());
        assert!(!status(403).is_transient());
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result: Result<String, _> = retry_transient(&config(), || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(status(404))
            }
        })
        .await;

        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_server_error_retried_until_success() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = retry_transient(&config(), || {
            let attempts = attempts_clone.clone();
            async move {
                let n = attempts.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(status(502))
                } else {
                    Ok("<html></html>".to_string())
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "<html></html>");
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result: Result<String, _> = retry_transient(&config(), || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(status(500))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }
}
