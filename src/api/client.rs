//! HTTP client for the member list.
//!
//! The list is fetched once per session with a single GET. There is no retry:
//! a failed fetch simply leaves the table empty.

use std::time::Duration;

use reqwest::{header, Client, Response};
use tracing::{debug, info, instrument, warn};

use super::error::{ApiError, Result};
use super::types::parse_records;
use crate::config::Settings;
use crate::table::RecordFields;

/// Client for the static member list endpoint.
#[derive(Debug, Clone)]
pub struct MembersClient {
    /// The HTTP client.
    client: Client,
    /// Where the member list lives.
    url: String,
}

impl MembersClient {
    /// Create a client from the application settings.
    pub fn new(settings: &Settings) -> Result<Self> {
        let timeout = settings.request_timeout_secs.map(Duration::from_secs);
        Self::with_url(&settings.source_url, timeout)
    }

    /// Create a client for an explicit URL and optional timeout.
    pub fn with_url(url: &str, timeout: Option<Duration>) -> Result<Self> {
        let url = normalize_url(url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ApiError::Network)?;

        Ok(Self { client, url })
    }

    /// Fetch the whole member list.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch_records(&self) -> Result<Vec<RecordFields>> {
        debug!("Fetching member records");

        let response = self
            .client
            .get(&self.url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let records = self.handle_response(response).await?;
        info!(count = records.len(), "Fetched member records");
        Ok(records)
    }

    /// Check the status and parse the body.
    async fn handle_response(&self, response: Response) -> Result<Vec<RecordFields>> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", body);
            return Err(ApiError::from_status(status, &self.url));
        }

        let body = response.text().await?;
        parse_records(&body)
    }

    /// The URL the list is fetched from.
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Trim whitespace and make sure the URL is HTTP(S).
fn normalize_url(url: &str) -> Result<String> {
    let url = url.trim();

    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(ApiError::InvalidUrl(url.to_string()));
    }

    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}", url);
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}/members.json", addr)
    }

    #[test]
    fn test_normalize_url_trims() {
        assert_eq!(
            normalize_url("  https://example.com/members.json ").unwrap(),
            "https://example.com/members.json"
        );
    }

    #[test]
    fn test_normalize_url_rejects_other_schemes() {
        assert!(matches!(
            normalize_url("ftp://example.com/members.json"),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(normalize_url("example.com").is_err());
    }

    #[test]
    fn test_client_from_settings() {
        let settings = Settings::default();
        let client = MembersClient::new(&settings).unwrap();
        assert_eq!(client.url(), settings.source_url);
    }

    #[tokio::test]
    async fn test_fetch_records_success() {
        let url = serve_once(
            "200 OK",
            r#"[{"id":"1","name":"Aaron Miles","email":"aaron@mailinator.com","role":"member"}]"#,
        )
        .await;
        let client = MembersClient::with_url(&url, None).unwrap();

        let records = client.fetch_records().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0][1].1, "Aaron Miles");
    }

    #[tokio::test]
    async fn test_fetch_records_http_error() {
        let url = serve_once("404 Not Found", "").await;
        let client = MembersClient::with_url(&url, None).unwrap();

        let err = client.fetch_records().await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_fetch_records_bad_body() {
        let url = serve_once("200 OK", r#"{"not":"a list"}"#).await;
        let client = MembersClient::with_url(&url, None).unwrap();

        let err = client.fetch_records().await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_configured_timeout_aborts_slow_fetch() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            // Hold the connection open without answering.
            tokio::time::sleep(Duration::from_secs(10)).await;
            drop(socket);
        });

        let settings = Settings {
            source_url: format!("http://{}/members.json", addr),
            request_timeout_secs: Some(1),
            ..Settings::default()
        };
        let client = MembersClient::new(&settings).unwrap();

        let started = std::time::Instant::now();
        let err = client.fetch_records().await.unwrap_err();
        assert!(matches!(&err, ApiError::Network(e) if e.is_timeout()));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_fetch_records_connection_refused() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client =
            MembersClient::with_url(&format!("http://{}/members.json", addr), None).unwrap();
        let err = client.fetch_records().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}
