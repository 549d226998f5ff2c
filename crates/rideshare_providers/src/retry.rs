use std::{future::Future, time::Duration};

use tracing::{debug, warn};

use crate::error::TransportError;

/// Bounded retry with a fixed backoff between attempts.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Runs `request` until it succeeds, fails with a permanent error or the
    /// attempts are exhausted. The last error is returned in the two latter cases.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut request: F) -> Result<T, TransportError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
    {
        let max_attempts = self.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            debug!("{}: attempt {}/{}", operation, attempt, max_attempts);

            match request().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < max_attempts => {
                    warn!(
                        "{}: attempt {}/{} failed, retrying in {:?}: {}",
                        operation, attempt, max_attempts, self.backoff, err
                    );
                    tokio::time::sleep(self.backoff).await;
                }
                Err(err) => return Err(err),
            }
        }

        unreachable!("the last attempt always returns")
    }
}
