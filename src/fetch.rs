// src/fetch.rs
// =============================================================================
// The HTTP plumbing shared by the page fetch and the download pass.
//
// Both passes:
// - Open their own session (a reqwest Client) and drop it when they finish
// - Send the same browser-like User-Agent with the same short timeout
// - Treat any non-2xx status as a failure, just like a broken connection
//
// The timeout bounds each network wait (connecting, waiting for the response
// head, waiting for the next body chunk), not the whole transfer. A large
// file that keeps arriving is never cut off; a server that goes quiet is.
//
// Failures are sorted into three kinds (HTTP status, timeout, anything else)
// so the report can say what actually went wrong.
// =============================================================================

use bytes::Bytes;
use futures::StreamExt;
use reqwest::{Client, Response};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::FetchConfig;

// Why a request failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The server answered with a 4xx/5xx status
    #[error("HTTP error occurred: {status} for url ({url})")]
    Status { status: u16, url: String },

    /// No answer within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// DNS, connection refused, TLS, malformed URL, broken body stream...
    #[error("Other error occurred: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        classify_error(error)
    }
}

// Opens a session for one pass.
//
// The Client owns a connection pool, so consecutive requests to the same host
// reuse connections. Redirects are followed (reqwest's default policy), which
// is why callers read the final URL from the response, not the request.
pub fn open_session(config: &FetchConfig) -> Result<Client, FetchError> {
    let client = Client::builder()
        .connect_timeout(config.timeout)
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}

// Sends a GET and turns error statuses into errors.
//
// The body is not read here: the caller either reads it whole (page fetch)
// or streams it to disk (downloads).
pub async fn get(client: &Client, url: &str, timeout: Duration) -> Result<Response, FetchError> {
    debug!(url, "GET");
    let response = within(timeout, client.get(url).send()).await??;
    let response = response.error_for_status()?;
    debug!(url, status = response.status().as_u16(), "response received");
    Ok(response)
}

// Reads a whole response body, allowing at most `timeout` between chunks
pub async fn read_body(response: Response, timeout: Duration) -> Result<Vec<u8>, FetchError> {
    let mut stream = response.bytes_stream();
    let mut body = Vec::new();
    while let Some(chunk) = next_chunk(&mut stream, timeout).await? {
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

// Waits for the next body chunk. Ok(None) means the body is complete.
pub async fn next_chunk<S>(stream: &mut S, timeout: Duration) -> Result<Option<Bytes>, FetchError>
where
    S: futures::Stream<Item = reqwest::Result<Bytes>> + Unpin,
{
    match within(timeout, stream.next()).await? {
        Some(chunk) => Ok(Some(chunk?)),
        None => Ok(None),
    }
}

// Runs one network wait, failing with FetchError::Timeout if it takes longer
// than `timeout`
async fn within<F: Future>(timeout: Duration, future: F) -> Result<F::Output, FetchError> {
    tokio::time::timeout(timeout, future)
        .await
        .map_err(|_| FetchError::Timeout(format!("no data for {} ms", timeout.as_millis())))
}

// Sorts a reqwest error into our three failure kinds
fn classify_error(error: reqwest::Error) -> FetchError {
    if let Some(status) = error.status() {
        let url = error
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        FetchError::Status {
            status: status.as_u16(),
            url,
        }
    } else if error.is_timeout() {
        FetchError::Timeout(error.to_string())
    } else {
        FetchError::Transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_TIMEOUT;

    #[tokio::test]
    async fn test_get_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/ok")
            .match_header("user-agent", crate::config::DEFAULT_USER_AGENT)
            .with_status(200)
            .with_body("hello")
            .create_async()
            .await;

        let client = open_session(&FetchConfig::default()).unwrap();
        let response = get(&client, &format!("{}/ok", server.url()), DEFAULT_TIMEOUT).await.unwrap();
        assert_eq!(response.text().await.unwrap(), "hello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_error_status() {
        let mut server = mockito::Server::new_async().await;
        let _missing = server
            .mock("GET", "/missing")
            .with_status(404)
            .create_async()
            .await;

        let client = open_session(&FetchConfig::default()).unwrap();
        let err = get(&client, &format!("{}/missing", server.url()), DEFAULT_TIMEOUT)
            .await
            .unwrap_err();
        match err {
            FetchError::Status { status, url } => {
                assert_eq!(status, 404);
                assert!(url.ends_with("/missing"));
            }
            other => panic!("expected a status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_connection_refused() {
        let client = open_session(&FetchConfig::default()).unwrap();
        let err = get(&client, "http://127.0.0.1:1/nothing", DEFAULT_TIMEOUT).await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Transport(_) | FetchError::Timeout(_)
        ));
    }

    #[tokio::test]
    async fn test_get_invalid_url() {
        let client = open_session(&FetchConfig::default()).unwrap();
        let err = get(&client, "not a url", DEFAULT_TIMEOUT).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert!(err.to_string().starts_with("Other error occurred"));
    }
}
