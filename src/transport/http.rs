//! One-shot HTTP transport
//!
//! A thin adapter over reqwest: one request, one response, no retries.
//! Non-2xx responses surface as [`ClientError::Http`] with the status code
//! and raw body text preserved so callers can branch on them. Retry and
//! backoff policy belongs to the caller.

use reqwest::{Client, Method};
use serde_json::Value;
use std::time::Duration;

use crate::core::{ClientError, ClientResult};

/// A successful (2xx) response, body kept as raw text
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Response status code
    pub status: u16,
    /// Raw body text, decoded by the caller
    pub body: String,
}

/// HTTP adapter for the session server's REST API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for the given base URL
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> ClientResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("HTTP client: {}", e)))?;

        let base_url = base_url.into();
        let base_url = base_url.trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    /// Perform one request against `{base_url}{path}`
    ///
    /// `query` pairs are appended to the URL; `body` is sent as JSON when
    /// present. Network I/O only; this never retries.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> ClientResult<RawResponse> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {} (query: {:?})", method, url, query);

        let mut request = self.client.request(method, &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!("Response {} ({} bytes)", status, body.len());

        if !status.is_success() {
            tracing::error!("Server returned {}: {}", status, body);
            return Err(ClientError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve exactly one canned HTTP/1.1 response, then close
    async fn one_shot_server(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
        });

        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_success_returns_raw_body() {
        let base = one_shot_server("200 OK", r#"{"session_id":"s1"}"#).await;
        let transport = HttpTransport::new(base, None).unwrap();

        let response = transport
            .request(Method::GET, "/api/sessions/s1", &[], None)
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"session_id":"s1"}"#);
    }

    #[tokio::test]
    async fn test_non_2xx_preserves_status_and_body() {
        let base = one_shot_server("404 Not Found", "not found").await;
        let transport = HttpTransport::new(base, None).unwrap();

        let err = transport
            .request(Method::GET, "/api/sessions/missing", &[], None)
            .await
            .unwrap_err();

        match err {
            ClientError::Http { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "not found");
            }
            other => panic!("expected Http error, got {:?}", other),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let transport = HttpTransport::new("http://localhost:3030/", None).unwrap();
        assert_eq!(transport.base_url, "http://localhost:3030");
    }
}
