//! Network transport capability.
//!
//! The downloader never talks to reqwest directly: it goes through the
//! [`Transport`] trait so hosts (and tests) can swap the network layer.
//! [`ReqwestTransport`] is the production implementation.

use super::client::{create_http_client, HttpClientConfig};
use crate::error::{Error, Result};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::future::{self, BoxFuture};
use futures::stream::{self, BoxStream};
use futures::{FutureExt, StreamExt};
use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::{StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Incremental reader over a response body.
pub type ChunkStream = BoxStream<'static, Result<Bytes>>;

/// Request options forwarded verbatim to the transport.
///
/// The downloader never looks inside; they only matter to the [`Transport`].
#[derive(Clone, Default)]
pub struct RequestOptions {
    headers: HeaderMap,
    basic_auth: Option<(String, Option<String>)>,
    bearer_auth: Option<String>,
    timeout: Option<Duration>,
}

impl fmt::Debug for RequestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestOptions")
            .field("headers", &self.headers)
            .field("basic_auth", &self.basic_auth.is_some())
            .field("bearer_auth", &self.bearer_auth.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RequestOptions {
    /// Creates empty request options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a set of headers into the options.
    ///
    /// Can be called multiple times; later values win.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Add a single header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Send HTTP basic credentials.
    pub fn basic_auth(mut self, username: impl Into<String>, password: Option<String>) -> Self {
        self.basic_auth = Some((username.into(), password));
        self
    }

    /// Send a bearer token.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_auth = Some(token.into());
        self
    }

    /// Give up on the request after `timeout`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the extra headers.
    pub fn header_map(&self) -> &HeaderMap {
        &self.headers
    }

    /// Get the per-request timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

/// Body of a [`TransportResponse`].
pub enum Body {
    /// The transport exposes an incremental chunk reader.
    Stream(ChunkStream),
    /// The transport can only hand over the complete body.
    Buffered(BoxFuture<'static, Result<Bytes>>),
}

impl Body {
    /// A body that is already fully available.
    pub fn from_bytes(data: impl Into<Bytes>) -> Self {
        let data: Bytes = data.into();
        Body::Buffered(future::ready(Ok::<_, Error>(data)).boxed())
    }

    /// A streamed body yielding the given chunks in order.
    pub fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = Result<Bytes>>,
        I::IntoIter: Send + 'static,
    {
        Body::Stream(stream::iter(chunks).boxed())
    }

    /// Whether the body can be read chunk by chunk.
    pub fn is_streaming(&self) -> bool {
        matches!(self, Body::Stream(_))
    }

    /// Wait for the complete body.
    pub async fn collect(self) -> Result<Bytes> {
        match self {
            Body::Buffered(fut) => fut.await,
            Body::Stream(mut chunks) => {
                let mut buffer = BytesMut::new();
                while let Some(chunk) = chunks.next().await {
                    buffer.extend_from_slice(&chunk?);
                }
                Ok(buffer.freeze())
            }
        }
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Body::Stream(_) => f.write_str("Body::Stream"),
            Body::Buffered(_) => f.write_str("Body::Buffered"),
        }
    }
}

/// Response handed back by a [`Transport`].
#[derive(Debug)]
pub struct TransportResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Body,
}

impl TransportResponse {
    /// Create a new response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Body) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Get the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the reason phrase of the status, empty if unknown.
    pub fn status_text(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("")
    }

    /// Get the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Split the response into its headers and body.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Body) {
        (self.status, self.headers, self.body)
    }
}

/// Issues a single request and returns the raw response.
///
/// Implementations must not retry on their own behalf nor treat non-success
/// statuses as errors: that decision belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Request `address` with the passthrough `options`.
    async fn send(&self, address: &str, options: &RequestOptions) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a reqwest client with middleware.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: ClientWithMiddleware,
    base_url: Option<Url>,
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ReqwestTransport {
    /// Build a transport from an HTTP client configuration.
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let base_url = config.base_url.clone();
        let client = create_http_client(config)?;
        Ok(Self { client, base_url })
    }

    /// Build a transport around an existing client.
    pub fn with_client(client: ClientWithMiddleware, base_url: Option<Url>) -> Self {
        Self { client, base_url }
    }

    /// Get the base address relative locators are resolved against.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Turn an address into a requestable URL.
    ///
    /// Absolute addresses are used as is; anything else is joined onto the base
    /// address, and fails when there is none.
    pub fn resolve_url(&self, address: &str) -> Result<Url> {
        if let Ok(url) = Url::parse(address) {
            return Ok(url);
        }
        match &self.base_url {
            Some(base) => base.join(address).map_err(|e| {
                Error::InvalidUrl(format!(
                    "The address \"{}\" cannot be joined onto \"{}\": {}",
                    address, base, e
                ))
            }),
            None => Err(Error::InvalidUrl(format!(
                "The address \"{}\" is relative and no base URL is configured",
                address
            ))),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, address: &str, options: &RequestOptions) -> Result<TransportResponse> {
        let url = self.resolve_url(address)?;
        debug!("Fetching {}", url);

        let mut req = self.client.get(url);
        if !options.headers.is_empty() {
            req = req.headers(options.headers.clone());
        }
        if let Some((username, password)) = &options.basic_auth {
            req = req.basic_auth(username, password.as_ref());
        }
        if let Some(token) = &options.bearer_auth {
            req = req.bearer_auth(token);
        }
        if let Some(timeout) = options.timeout {
            req = req.timeout(timeout);
        }

        let res = req.send().await?;
        let status = res.status();
        let headers = res.headers().clone();
        let body = Body::Stream(res.bytes_stream().map(|c| c.map_err(Error::from)).boxed());

        Ok(TransportResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::{Method::GET, MockServer};
    use reqwest::header::{CONTENT_LENGTH, USER_AGENT};

    #[tokio::test]
    async fn test_body_collect_stream() {
        let body = Body::from_chunks(vec![
            Ok(Bytes::from_static(b"hello ")),
            Ok(Bytes::from_static(b"world")),
        ]);
        assert!(body.is_streaming());
        assert_eq!(body.collect().await.unwrap(), Bytes::from_static(b"hello world"));
    }

    #[tokio::test]
    async fn test_body_collect_stream_error() {
        let body = Body::from_chunks(vec![
            Ok(Bytes::from_static(b"hello")),
            Err(Error::Transport("connection reset".into())),
        ]);
        assert!(body.collect().await.is_err());
    }

    #[tokio::test]
    async fn test_body_collect_buffered() {
        let body = Body::from_bytes(vec![1u8, 2, 3]);
        assert!(!body.is_streaming());
        assert_eq!(body.collect().await.unwrap().as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn test_request_options_debug_hides_credentials() {
        let options = RequestOptions::new()
            .basic_auth("user", Some("hunter2".into()))
            .bearer_auth("secret-token");
        let debug_str = format!("{:?}", options);
        assert!(!debug_str.contains("hunter2"));
        assert!(!debug_str.contains("secret-token"));
    }

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("http://localhost:8080/app/").unwrap();
        let transport = ReqwestTransport::with_client(
            create_http_client(HttpClientConfig::default()).unwrap(),
            Some(base),
        );

        assert_eq!(
            transport.resolve_url("/report.pdf").unwrap().as_str(),
            "http://localhost:8080/report.pdf"
        );
        assert_eq!(
            transport.resolve_url("https://cdn.example.com/x.pdf").unwrap().as_str(),
            "https://cdn.example.com/x.pdf"
        );
    }

    #[test]
    fn test_resolve_url_without_base() {
        let transport = ReqwestTransport::new(HttpClientConfig::default()).unwrap();
        assert!(matches!(
            transport.resolve_url("/report.pdf"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_send_forwards_headers_and_reports_status() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/report.pdf")
                .header("user-agent", "fetch-save-test");
            then.status(200).body(vec![7u8; 64]);
        });
        let transport = ReqwestTransport::new(HttpClientConfig {
            base_url: Some(Url::parse(&server.base_url()).unwrap()),
            ..HttpClientConfig::default()
        })
        .unwrap();
        let options = RequestOptions::new()
            .header(USER_AGENT, HeaderValue::from_static("fetch-save-test"));

        let response = transport.send("/report.pdf", &options).await.unwrap();

        mock.assert();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(CONTENT_LENGTH).unwrap().to_str().unwrap(),
            "64"
        );
        let (_, _, body) = response.into_parts();
        assert!(body.is_streaming());
        assert_eq!(body.collect().await.unwrap().len(), 64);
    }

    #[tokio::test]
    async fn test_send_does_not_fail_on_error_status() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/missing.pdf");
            then.status(404);
        });
        let transport = ReqwestTransport::new(HttpClientConfig::default()).unwrap();

        let response = transport
            .send(&server.url("/missing.pdf"), &RequestOptions::default())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.status_text(), "Not Found");
    }
}
