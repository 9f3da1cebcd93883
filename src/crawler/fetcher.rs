//! HTTP fetcher
//!
//! One GET per URL with a bounded timeout. Every non-success outcome is
//! classified into a [`FetchOutcome`] variant the engine can act on; nothing
//! here is an error that could abort the crawl.

use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of fetching one URL
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response with a body
    Success { status_code: u16, body: String },

    /// Response arrived but outside the 2xx range
    HttpError { status_code: u16 },

    /// The request exceeded the configured timeout
    Timeout,

    /// Transport-level failure (connection refused, DNS, TLS, ...)
    NetworkError { error: String },
}

/// Builds the HTTP client used for the whole crawl
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// Timeouts, transport errors, and non-2xx statuses are all terminal for the
/// URL; the engine skips it and moves on. There is no retry.
pub async fn fetch_page(client: &Client, url: &Url) -> FetchOutcome {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                return FetchOutcome::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Success {
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) if e.is_timeout() => FetchOutcome::Timeout,
                Err(e) => FetchOutcome::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) if e.is_timeout() => FetchOutcome::Timeout,
        Err(e) if e.is_connect() => FetchOutcome::NetworkError {
            error: "connection failed".to_string(),
        },
        Err(e) => FetchOutcome::NetworkError {
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client("quarry-test/0.1", Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_network_error_on_unreachable_host() {
        let client = build_http_client("quarry-test/0.1", Duration::from_secs(1)).unwrap();
        // Reserved TEST-NET-1 address, nothing listens there.
        let url = Url::parse("http://192.0.2.1:9/").unwrap();

        match fetch_page(&client, &url).await {
            FetchOutcome::NetworkError { .. } | FetchOutcome::Timeout => {}
            other => panic!("expected network error or timeout, got {:?}", other),
        }
    }
}
