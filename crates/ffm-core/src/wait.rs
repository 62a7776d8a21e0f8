//! Generic "await an observed UI state, with timeout" primitive.
//!
//! The host page enables and hides its controls asynchronously after
//! selection mutations propagate. A fixed sleep would be either wastefully
//! slow or racy; sampling the observed state until a deadline lets cycles
//! run as fast as the page allows.

use futures::future::BoxFuture;
use std::time::Duration;
use tokio::time::Instant;

use crate::page::UiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitOutcome {
    Satisfied,
    TimedOut,
}

/// Sample `probe` every `interval` until it reports true or `timeout`
/// elapses. The probe is always sampled at least once, so an
/// already-satisfied state returns immediately.
pub async fn until_signaled<'a, F>(
    timeout: Duration,
    interval: Duration,
    mut probe: F,
) -> Result<WaitOutcome, UiError>
where
    F: FnMut() -> BoxFuture<'a, Result<bool, UiError>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if probe().await? {
            return Ok(WaitOutcome::Satisfied);
        }
        if Instant::now() >= deadline {
            return Ok(WaitOutcome::TimedOut);
        }
        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn satisfied_immediately() {
        let outcome = until_signaled(Duration::from_millis(100), Duration::from_millis(1), || {
            async { Ok::<bool, UiError>(true) }.boxed()
        })
        .await
        .unwrap();
        assert_eq!(outcome, WaitOutcome::Satisfied);
    }

    #[tokio::test]
    async fn satisfied_after_several_samples() {
        let calls = Arc::new(AtomicUsize::new(0));
        let probe_calls = Arc::clone(&calls);
        let outcome = until_signaled(
            Duration::from_millis(500),
            Duration::from_millis(1),
            move || {
                let calls = Arc::clone(&probe_calls);
                async move { Ok::<bool, UiError>(calls.fetch_add(1, Ordering::SeqCst) + 1 >= 3) }
                    .boxed()
            },
        )
        .await
        .unwrap();
        assert_eq!(outcome, WaitOutcome::Satisfied);
        assert!(calls.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn times_out_when_never_satisfied() {
        let outcome = until_signaled(Duration::from_millis(20), Duration::from_millis(2), || {
            async { Ok::<bool, UiError>(false) }.boxed()
        })
        .await
        .unwrap();
        assert_eq!(outcome, WaitOutcome::TimedOut);
    }

    #[tokio::test]
    async fn probe_errors_propagate() {
        let result = until_signaled(Duration::from_millis(20), Duration::from_millis(2), || {
            async { Err::<bool, UiError>(UiError::MissingControl("bulk download control")) }
                .boxed()
        })
        .await;
        assert!(matches!(result, Err(UiError::MissingControl(_))));
    }
}
