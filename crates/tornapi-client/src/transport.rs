//! HTTP transport seam.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::error::TransportError;

/// Fetches a URL and decodes its body as JSON.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get_json(&self, url: &Url) -> Result<Value, TransportError>;
}

/// A transport that can abandon an exchange after a deadline.
#[async_trait]
pub trait CancellableTransport: HttpTransport {
    async fn get_json_with_timeout(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> Result<Value, TransportError>;
}

/// The transport a client dispatches through, with its capability fixed when
/// the client is built.
#[derive(Clone)]
pub enum Transport {
    Plain(Arc<dyn HttpTransport>),
    Cancellable(Arc<dyn CancellableTransport>),
}

impl Transport {
    pub fn plain(transport: impl HttpTransport + 'static) -> Self {
        Transport::Plain(Arc::new(transport))
    }

    pub fn cancellable(transport: impl CancellableTransport + 'static) -> Self {
        Transport::Cancellable(Arc::new(transport))
    }

    pub fn is_cancellable(&self) -> bool {
        matches!(self, Transport::Cancellable(_))
    }

    /// A timeout is only applied by a cancellable transport; a plain one
    /// ignores it.
    pub async fn get_json(
        &self,
        url: &Url,
        timeout: Option<Duration>,
    ) -> Result<Value, TransportError> {
        match (self, timeout) {
            (Transport::Cancellable(transport), Some(timeout)) => {
                transport.get_json_with_timeout(url, timeout).await
            }
            (Transport::Cancellable(transport), None) => transport.get_json(url).await,
            (Transport::Plain(transport), _) => transport.get_json(url).await,
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transport::Plain(_) => f.write_str("Transport::Plain"),
            Transport::Cancellable(_) => f.write_str("Transport::Cancellable"),
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Transport::cancellable(ReqwestTransport::default())
    }
}

/// `reqwest`-backed transport. The body is decoded regardless of the status
/// code, since the API reports failures inside a 200 JSON payload.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get_json(&self, url: &Url) -> Result<Value, TransportError> {
        let response = self.client.get(url.clone()).send().await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl CancellableTransport for ReqwestTransport {
    async fn get_json_with_timeout(
        &self,
        url: &Url,
        timeout: Duration,
    ) -> Result<Value, TransportError> {
        let timed_out = |e: reqwest::Error| {
            if e.is_timeout() {
                TransportError::Timeout(timeout)
            } else {
                TransportError::Http(e)
            }
        };
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(timed_out)?;
        response.json().await.map_err(timed_out)
    }
}
