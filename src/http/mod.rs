//! HTTP module containing the network transport.
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`transport`] - The [`Transport`] capability and its reqwest implementation
//!
//! # Examples
//!
//! ```rust
//! use fetch_save::http::{HttpClientConfig, ReqwestTransport};
//! use reqwest::Url;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = ReqwestTransport::new(HttpClientConfig {
//!     base_url: Some(Url::parse("https://example.com/")?),
//!     ..HttpClientConfig::default()
//! })?;
//! assert_eq!(
//!     transport.resolve_url("/report.pdf")?.as_str(),
//!     "https://example.com/report.pdf"
//! );
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod transport;

pub use client::{create_http_client, HttpClientConfig};
pub use transport::{Body, ChunkStream, ReqwestTransport, RequestOptions, Transport, TransportResponse};
