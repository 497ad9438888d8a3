//! Ambient deadline and cancellation for adapter operations

use std::future::Future;
use std::time::{Duration, Instant};

use dialplane_domain::{DialplaneError, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Carries the engine-imposed deadline and cancellation signal into every
/// adapter operation. Cloning shares the same cancellation token.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    deadline: Option<Instant>,
    cancel: CancellationToken,
}

impl OperationContext {
    /// No deadline, never cancelled unless [`cancel`](Self::cancel) is called.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { deadline: Some(Instant::now() + timeout), cancel: CancellationToken::new() }
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` to completion unless the deadline passes or the context
    /// is cancelled first; the in-flight future is dropped in either case.
    ///
    /// # Errors
    /// `DialplaneError::Timeout` on deadline expiry, `DialplaneError::Cancelled`
    /// on cancellation, otherwise whatever `fut` returns.
    pub async fn run<F, T>(&self, operation: &str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let bounded = async {
            match self.deadline {
                Some(deadline) => {
                    tokio::time::timeout_at(tokio::time::Instant::from_std(deadline), fut)
                        .await
                        .unwrap_or_else(|_| {
                            debug!(operation, "deadline exceeded");
                            Err(DialplaneError::Timeout(format!("{operation} exceeded its deadline")))
                        })
                }
                None => fut.await,
            }
        };

        tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                debug!(operation, "operation cancelled");
                Err(DialplaneError::Cancelled(operation.to_string()))
            }
            result = bounded => result,
        }
    }
}
