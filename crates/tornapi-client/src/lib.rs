//! Runtime client for the Torn API.
//!
//! Requests go through a [`Transport`] chosen when the client is built, and
//! successful responses can be kept in any [`ResponseCache`]. The client never
//! returns a Rust error: failures come back as an [`ApiResponse::Error`].

pub mod cache;
pub mod client;
pub mod error;
pub mod request;
pub mod transport;

pub use cache::{MemoryCache, ResponseCache};
pub use client::{ApiError, ApiResponse, TornApiClient, TornApiClientBuilder};
pub use error::{CacheError, TransportError};
pub use request::{ApiVersion, CacheKey, GetRequest, RequestOptions};
pub use transport::{CancellableTransport, HttpTransport, ReqwestTransport, Transport};
