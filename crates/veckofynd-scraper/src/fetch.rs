//! Page fetching: the opaque "rendered HTML in, raw records out of scope"
//! seam in front of the extractor.
//!
//! The listing site renders its offers client-side behind infinite
//! scroll; how a fetcher obtains the final HTML (headless browser, render
//! service, fixture file) is its own business. [`HttpFetcher`] is the
//! plain-HTTP implementation used in production.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Returns the fully rendered HTML for a listing page URL.
pub trait PageFetcher {
    fn fetch_page(
        &self,
        url: &str,
    ) -> impl Future<Output = Result<String, ScraperError>> + Send;
}

/// HTTP page fetcher with configured timeout, `User-Agent`, and
/// exponential-backoff retry on transient errors.
pub struct HttpFetcher {
    client: Client,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl HttpFetcher {
    /// Creates an `HttpFetcher`.
    ///
    /// `max_retries` is the number of additional attempts after the first
    /// failure for retriable errors; set to `0` to disable retries.
    /// `backoff_base_secs` controls the base delay for exponential
    /// backoff: the wait before the n-th retry is
    /// `backoff_base_secs * 2^(n-1)` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_secs,
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<String, ScraperError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.as_u16() == 404 {
            return Err(ScraperError::NotFound {
                url: url.to_owned(),
            });
        }
        if status.as_u16() == 429 {
            return Err(ScraperError::RateLimited {
                url: url.to_owned(),
            });
        }
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text().await?)
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            self.fetch_once(url)
        })
        .await
    }
}

/// Returns `true` if `err` represents a transient condition that should
/// be retried after a backoff delay: rate limiting, network-level
/// failures, and server-side (5xx) statuses. Client errors such as 404
/// are propagated immediately — retrying would return the same result.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } | ScraperError::Http(_) => true,
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        _ => false,
    }
}

/// Executes `operation` with exponential backoff retries on transient
/// errors.
///
/// On a retriable error the function sleeps for
/// `backoff_base_secs * 2^attempt` seconds and tries again, up to
/// `max_retries` additional attempts after the first try. If all retries
/// are exhausted the last error is returned. Non-retriable errors are
/// returned immediately without sleeping.
async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut last_err;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                last_err = err;
            }
        }

        // Exponential backoff: base * 2^attempt seconds, capped to avoid
        // shift overflow on extreme configs.
        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %last_err,
            "transient fetch error — retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn fetcher(max_retries: u32) -> HttpFetcher {
        // Zero backoff base keeps retry tests fast.
        HttpFetcher::new(5, "veckofynd-test/0.1", max_retries, 0).unwrap()
    }

    #[tokio::test]
    async fn fetch_page_returns_body_on_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/erbjudanden"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>offers</html>"))
            .mount(&server)
            .await;

        let body = fetcher(0)
            .fetch_page(&format!("{}/erbjudanden", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<html>offers</html>");
    }

    #[tokio::test]
    async fn fetch_page_404_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let err = fetcher(3)
            .fetch_page(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, ScraperError::NotFound { .. }));
    }

    #[tokio::test]
    async fn fetch_page_retries_after_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let body = fetcher(2).fetch_page(&server.uri()).await.unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn fetch_page_gives_up_when_retries_exhausted() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .expect(2)
            .mount(&server)
            .await;

        let err = fetcher(1).fetch_page(&server.uri()).await.unwrap_err();
        assert!(matches!(err, ScraperError::RateLimited { .. }));
    }
}
