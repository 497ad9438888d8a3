use std::fmt;
use std::time::Duration;

use dialplane_common::resilience::{
    Backoff, RetryConfig, RetryDecision, RetryError, RetryExecutor, RetryPolicy,
};
use dialplane_domain::constants::{DEFAULT_MAX_ATTEMPTS, DEFAULT_REQUEST_TIMEOUT_SECS};
use dialplane_domain::DialplaneError;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response, StatusCode};
use tracing::warn;

use crate::errors::InfraError;

/// Longest `Retry-After` the client is willing to honour.
const MAX_RETRY_AFTER: Duration = Duration::from_secs(60);

/// Ceiling for the doubling backoff between attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// reqwest client that retries transient failures.
///
/// 5xx, 429 and connection-level failures are retried with doubling backoff
/// (or the server's `Retry-After`, when present). Every other response is
/// returned as is; status classification happens one layer up.
#[derive(Clone)]
pub struct HttpClient {
    inner: ReqwestClient,
    retry: RetryConfig,
}

/// A failed attempt, as seen by the retry loop.
enum Attempt {
    /// The server answered with a retryable status
    Status(Response),
    Transport(reqwest::Error),
    /// The body is a stream and cannot be sent twice
    Unreplayable,
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(response) => write!(f, "{} returned {}", response.url(), response.status()),
            Self::Transport(err) => err.fmt(f),
            Self::Unreplayable => f.write_str("streaming request bodies cannot be retried"),
        }
    }
}

/// Retries throttled and failing responses plus transient transport errors.
struct TransientHttp;

impl RetryPolicy<Attempt> for TransientHttp {
    fn should_retry(&self, failure: &Attempt, _attempt: u32) -> RetryDecision {
        match failure {
            Attempt::Status(response) => {
                retry_after(response).map_or(RetryDecision::Retry, RetryDecision::RetryAfter)
            }
            Attempt::Transport(err) if is_transient_error(err) => RetryDecision::Retry,
            Attempt::Transport(_) | Attempt::Unreplayable => RetryDecision::Stop,
        }
    }
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn new() -> Result<Self, DialplaneError> {
        Self::builder().build()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.inner.request(method, url)
    }

    /// Send `builder`, retrying transient failures.
    ///
    /// The last response is returned even when its status is retryable, so
    /// callers always see the final server answer.
    ///
    /// # Errors
    /// `DialplaneError::Network` when the final attempt fails at the
    /// transport level, `Internal` for bodies that cannot be replayed.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, DialplaneError> {
        let executor = RetryExecutor::new(self.retry.clone(), TransientHttp);
        let outcome = executor
            .execute(|| {
                let request = builder.try_clone();
                async move {
                    let request = request.ok_or(Attempt::Unreplayable)?;
                    match request.send().await {
                        Ok(response) if is_transient_status(response.status()) => {
                            Err(Attempt::Status(response))
                        }
                        Ok(response) => Ok(response),
                        Err(err) => Err(Attempt::Transport(err)),
                    }
                }
            })
            .await;

        match outcome {
            Ok(response) => Ok(response),
            Err(
                RetryError::AttemptsExhausted { last, .. } | RetryError::TimeoutExceeded { last, .. },
            ) => match last {
                Attempt::Status(response) => Ok(response),
                other => {
                    warn!(error = %other, "giving up on request");
                    Err(other.into_error())
                }
            },
            Err(RetryError::NonRetryable { error }) => Err(error.into_error()),
            Err(RetryError::InvalidConfiguration { message }) => Err(DialplaneError::Config(message)),
        }
    }
}

impl Attempt {
    fn into_error(self) -> DialplaneError {
        match self {
            Self::Transport(err) => InfraError::from(err).into(),
            Self::Status(response) => DialplaneError::Upstream {
                status: response.status().as_u16(),
                message: format!("{} returned {}", response.url(), response.status()),
            },
            Self::Unreplayable => {
                DialplaneError::Internal("streaming request bodies cannot be retried".into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: u32,
    base_backoff: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_backoff: Duration::from_millis(200),
            user_agent: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Total attempts per request, first try included. At least one.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, DialplaneError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let inner = builder.build().map_err(|e| DialplaneError::from(InfraError::from(e)))?;
        let backoff = Backoff::Doubling { initial: self.base_backoff, max: MAX_BACKOFF };
        Ok(HttpClient { inner, retry: RetryConfig::attempts(self.max_attempts, backoff) })
    }
}

fn is_transient_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

fn is_transient_error(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request()
}

/// `Retry-After` in delta-seconds form, capped.
fn retry_after(response: &Response) -> Option<Duration> {
    let secs = response.headers().get(RETRY_AFTER)?.to_str().ok()?.trim().parse::<u64>().ok()?;
    Some(Duration::from_secs(secs).min(MAX_RETRY_AFTER))
}

#[cfg(test)]
mod tests {
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use std::time::Instant;

    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    use super::*;

    fn fast_client(max_attempts: u32) -> HttpClient {
        HttpClient::builder()
            .base_backoff(Duration::from_millis(2))
            .max_attempts(max_attempts)
            .build()
            .expect("http client")
    }

    /// Responds with `failures` in order, then 200 forever.
    async fn flaky_server(failures: Vec<ResponseTemplate>) -> (MockServer, Arc<AtomicU32>) {
        let server = MockServer::start().await;
        let hits = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&hits);
        Mock::given(method("GET"))
            .respond_with(move |_: &Request| {
                let n = counter.fetch_add(1, Ordering::SeqCst) as usize;
                failures.get(n).cloned().unwrap_or_else(|| ResponseTemplate::new(200))
            })
            .mount(&server)
            .await;
        (server, hits)
    }

    #[tokio::test]
    async fn success_is_not_retried() {
        let (server, hits) = flaky_server(vec![]).await;
        let client = fast_client(3);

        let response = client.send(client.request(Method::GET, server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn server_errors_and_throttling_are_retried() {
        let (server, hits) =
            flaky_server(vec![ResponseTemplate::new(503), ResponseTemplate::new(429)]).await;
        let client = fast_client(3);

        let response = client.send(client.request(Method::GET, server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn client_errors_are_returned_immediately() {
        let (server, hits) = flaky_server(vec![ResponseTemplate::new(404)]).await;
        let client = fast_client(3);

        let response = client.send(client.request(Method::GET, server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn last_retryable_response_is_handed_back() {
        let (server, hits) =
            flaky_server(vec![ResponseTemplate::new(500), ResponseTemplate::new(502)]).await;
        let client = fast_client(2);

        let response = client.send(client.request(Method::GET, server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn retry_after_header_sets_the_delay() {
        let (server, _) = flaky_server(vec![
            ResponseTemplate::new(429).insert_header("Retry-After", "1"),
        ])
        .await;
        let client = fast_client(2);

        let started = Instant::now();
        let response = client.send(client.request(Method::GET, server.uri())).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(started.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn refused_connection_becomes_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let client = fast_client(2);
        match client.send(client.request(Method::GET, &url)).await {
            Err(DialplaneError::Network(msg)) => assert!(msg.contains("http")),
            other => panic!("expected network error, got {other:?}"),
        }
    }
}
