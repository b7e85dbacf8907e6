use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use url::Url;

use crate::cache::{ResponseCache, now_ms};
use crate::error::TransportError;
use crate::request::{ApiVersion, GetRequest, RequestOptions};
use crate::transport::Transport;

pub const API_BASE: &str = "https://api.torn.com/";

/// How long a response stays cached when the caller sets no expiry.
pub const DEFAULT_EXPIRY_MS: u64 = 30_000;

/// Error code used for failures that never reached the API.
pub const TRANSPORT_ERROR_CODE: i64 = -1;

/// The `error` object of an error-shaped payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub code: i64,
    pub error: String,
}

/// Outcome of a `get`: the payload, tagged by whether it carries an `error`.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    Success(Value),
    Error(ApiError),
}

impl ApiResponse {
    pub fn from_value(value: Value) -> Self {
        match value.get("error") {
            Some(error) => {
                let error = serde_json::from_value(error.clone()).unwrap_or_else(|_| ApiError {
                    code: TRANSPORT_ERROR_CODE,
                    error: error.to_string(),
                });
                ApiResponse::Error(error)
            }
            None => ApiResponse::Success(value),
        }
    }

    fn transport_failure(message: impl Into<String>) -> Self {
        ApiResponse::Error(ApiError {
            code: TRANSPORT_ERROR_CODE,
            error: message.into(),
        })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ApiResponse::Error(_))
    }

    /// The payload as the API would have sent it.
    pub fn into_value(self) -> Value {
        match self {
            ApiResponse::Success(value) => value,
            ApiResponse::Error(error) => json!({ "error": error }),
        }
    }
}

/// Builder for [`TornApiClient`].
#[derive(Debug, Default)]
pub struct TornApiClientBuilder {
    transport: Option<Transport>,
    base_url: Option<String>,
    cache: Option<Arc<dyn ResponseCache>>,
    default_comment: Option<String>,
    default_timeout: Option<Duration>,
}

impl TornApiClientBuilder {
    pub fn transport(mut self, transport: Transport) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Overrides [`API_BASE`]; must end with `/` to keep its path.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn default_comment(mut self, comment: impl Into<String>) -> Self {
        self.default_comment = Some(comment.into());
        self
    }

    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> TornApiClient {
        TornApiClient {
            transport: self.transport.unwrap_or_default(),
            base_url: self.base_url.unwrap_or_else(|| API_BASE.to_string()),
            cache: self.cache,
            default_comment: self.default_comment,
            default_timeout: self.default_timeout,
        }
    }
}

/// Client for both API generations.
///
/// Never fails: transport problems come back as an [`ApiResponse::Error`]
/// with code `-1`, and cache problems are logged and skipped.
#[derive(Debug)]
pub struct TornApiClient {
    transport: Transport,
    base_url: String,
    cache: Option<Arc<dyn ResponseCache>>,
    default_comment: Option<String>,
    default_timeout: Option<Duration>,
}

impl Default for TornApiClient {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl TornApiClient {
    pub fn builder() -> TornApiClientBuilder {
        TornApiClientBuilder::default()
    }

    pub async fn get_v1(&self, request: &GetRequest, options: RequestOptions) -> ApiResponse {
        self.get(ApiVersion::V1, request, options).await
    }

    pub async fn get_v2(&self, request: &GetRequest, options: RequestOptions) -> ApiResponse {
        self.get(ApiVersion::V2, request, options).await
    }

    async fn get(
        &self,
        version: ApiVersion,
        request: &GetRequest,
        options: RequestOptions,
    ) -> ApiResponse {
        let cache_key = request.cache_key(version);
        if let Some(cache) = &self.cache {
            match cache.get(&cache_key).await {
                Ok(Some(cached)) => {
                    log::debug!("cache hit for {version:?} {}", request.section);
                    return ApiResponse::from_value(cached);
                }
                Ok(None) => {}
                Err(e) => log::warn!("cache lookup failed: {e}"),
            }
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| TransportError::Url(format!("{}: {e}", self.base_url)))
            .and_then(|base| request.url(&base, version, self.default_comment.as_deref()));
        let url = match url {
            Ok(url) => url,
            Err(e) => return ApiResponse::transport_failure(e.to_string()),
        };
        let timeout = options.timeout.or(self.default_timeout);
        let value = match self.transport.get_json(&url, timeout).await {
            Ok(value) => value,
            Err(e) => {
                log::warn!("request to {} failed: {e}", request.section);
                return ApiResponse::transport_failure(e.to_string());
            }
        };

        let response = ApiResponse::from_value(value);
        if let (Some(cache), ApiResponse::Success(value)) = (&self.cache, &response) {
            let expiry = options.expiry.unwrap_or_else(|| now_ms() + DEFAULT_EXPIRY_MS);
            if let Err(e) = cache.set(cache_key, value.clone(), expiry).await {
                log::warn!("cache store failed: {e}");
            }
        }
        response
    }
}
