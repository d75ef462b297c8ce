//! HTTP/JSON page source.
//!
//! Talks to a JSON-Server style endpoint: page `n` of size `m` is
//! `GET {endpoint}?_page=n&_limit=m`, answered with a JSON array of posts.
//! `https://jsonplaceholder.typicode.com/posts` is the default.

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};

use super::{DataSource, FetchError, Item};

/// A page source backed by a paginated JSON endpoint.
pub struct HttpSource {
    /// Base endpoint; paging parameters are appended per request.
    endpoint: Url,
    /// Label shown in the UI title.
    label: String,
    client: Client,
}

impl HttpSource {
    /// Create a new HTTP source.
    ///
    /// # Arguments
    ///
    /// * `endpoint` — collection URL, e.g.
    ///   `https://jsonplaceholder.typicode.com/posts`. Existing query
    ///   parameters are kept.
    /// * `label` — short name displayed in the TUI.
    pub fn new(endpoint: &str, label: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Self::with_client(endpoint, label, client)
    }

    /// Like [`new`](Self::new), but with a caller-built client.
    pub fn with_client(endpoint: &str, label: impl Into<String>, client: Client) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .with_context(|| format!("invalid endpoint URL `{endpoint}`"))?;

        Ok(Self {
            endpoint,
            label: label.into(),
            client,
        })
    }

    /// The URL requested for page `page` of size `limit`.
    pub fn page_url(&self, page: u32, limit: usize) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("_page", &page.to_string())
            .append_pair("_limit", &limit.to_string());
        url
    }

    /// Treat any non-2xx response as a failed fetch.
    pub fn check_status(status: StatusCode) -> Result<(), FetchError> {
        if status.is_success() {
            Ok(())
        } else {
            Err(FetchError::Status(status))
        }
    }

    /// Decode a response body into items.
    ///
    /// Pure (no I/O) so tests can exercise decoding without the network.
    pub fn parse_page(body: &[u8]) -> Result<Vec<Item>, FetchError> {
        Ok(serde_json::from_slice(body)?)
    }
}

impl DataSource for HttpSource {
    fn name(&self) -> &str {
        &self.label
    }

    fn fetch_page(&self, page: u32, limit: usize) -> Result<Vec<Item>, FetchError> {
        let url = self.page_url(page, limit);
        tracing::debug!(%url, "GET page");

        let response = self.client.get(url).send()?;
        Self::check_status(response.status())?;

        let body = response.bytes()?;
        Self::parse_page(&body)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    use super::*;

    /// Serve exactly one HTTP response on a local port and return the
    /// endpoint URL together with the thread handle yielding the request line.
    fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        let addr = listener.local_addr().expect("addr");

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            let mut req = vec![0u8; 8192];
            let n = stream.read(&mut req).expect("read request");
            let request_line = String::from_utf8_lossy(&req[..n])
                .lines()
                .next()
                .unwrap_or_default()
                .to_string();

            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).expect("write response");
            request_line
        });

        (format!("http://{addr}/posts"), handle)
    }

    /// A source for a local endpoint, bypassing any proxy from the environment.
    fn local_source(endpoint: &str) -> HttpSource {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpSource::with_client(endpoint, "Posts", client).unwrap()
    }

    #[test]
    fn check_status_accepts_success_only() {
        assert!(HttpSource::check_status(StatusCode::OK).is_ok());

        let err = HttpSource::check_status(StatusCode::INTERNAL_SERVER_ERROR).unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
        assert!(err.to_string().contains("500"));

        let err = HttpSource::check_status(StatusCode::NOT_FOUND).unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s == StatusCode::NOT_FOUND));
    }

    #[test]
    fn fetch_page_reports_server_error_status() {
        let (endpoint, server) = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#);
        let src = local_source(&endpoint);

        let err = src.fetch_page(2, 20).unwrap_err();

        assert!(matches!(err, FetchError::Status(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
        let request_line = server.join().unwrap();
        assert!(request_line.starts_with("GET /posts?_page=2&_limit=20 "));
    }

    #[test]
    fn fetch_page_reports_malformed_body() {
        let (endpoint, server) = serve_once("200 OK", "not json");
        let src = local_source(&endpoint);

        let err = src.fetch_page(1, 20).unwrap_err();

        assert!(matches!(err, FetchError::Malformed(_)));
        server.join().unwrap();
    }

    #[test]
    fn fetch_page_decodes_successful_response() {
        let (endpoint, server) = serve_once(
            "200 OK",
            r#"[{"userId": 1, "id": 7, "title": "hello", "body": "world"}]"#,
        );
        let src = local_source(&endpoint);

        let items = src.fetch_page(1, 1).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 7);
        assert_eq!(items[0].title, "hello");
        server.join().unwrap();
    }

    #[test]
    fn parse_page_extracts_items() {
        let json = br#"[
            {"userId": 1, "id": 1, "title": "first", "body": "line one\nline two"},
            {"userId": 1, "id": 2, "title": "second", "body": ""}
        ]"#;

        let items = HttpSource::parse_page(json).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].title, "first");
        assert_eq!(items[0].body, "line one\nline two");
        assert_eq!(items[1].id, 2);
    }

    #[test]
    fn parse_page_accepts_empty_array() {
        let items = HttpSource::parse_page(b"[]").unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn parse_page_rejects_non_array() {
        let err = HttpSource::parse_page(br#"{"posts": []}"#).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn parse_page_rejects_missing_fields() {
        let err = HttpSource::parse_page(br#"[{"id": 1}]"#).unwrap_err();
        assert!(err.to_string().starts_with("malformed response"));
    }

    #[test]
    fn page_url_appends_paging_parameters() {
        let src = HttpSource::new("https://example.com/posts", "Posts").unwrap();
        assert_eq!(
            src.page_url(3, 20).as_str(),
            "https://example.com/posts?_page=3&_limit=20"
        );
    }

    #[test]
    fn page_url_keeps_existing_query() {
        let src = HttpSource::new("https://example.com/posts?userId=2", "Posts").unwrap();
        assert_eq!(
            src.page_url(1, 5).as_str(),
            "https://example.com/posts?userId=2&_page=1&_limit=5"
        );
    }

    #[test]
    fn new_rejects_invalid_url() {
        assert!(HttpSource::new("not a url", "x").is_err());
    }

    #[test]
    fn name_returns_label() {
        let src = HttpSource::new("https://example.com/posts", "My Posts").unwrap();
        assert_eq!(src.name(), "My Posts");
    }
}
