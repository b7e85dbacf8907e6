use std::time::Duration;

use url::Url;

use crate::error::TransportError;

/// Which API generation a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiVersion {
    V1,
    V2,
}

impl ApiVersion {
    fn path_prefix(self) -> Option<&'static str> {
        match self {
            ApiVersion::V1 => None,
            ApiVersion::V2 => Some("v2"),
        }
    }
}

/// One `get` call: a section, its selections, and the query to send.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GetRequest {
    pub section: String,
    pub selections: Vec<String>,
    pub id: Option<String>,
    /// Extra query parameters, sent after the built-in ones in this order.
    pub params: Vec<(String, String)>,
    pub key: String,
    pub comment: Option<String>,
}

impl GetRequest {
    pub fn new(section: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn selections<I, S>(mut self, selections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selections = selections.into_iter().map(Into::into).collect();
        self
    }

    pub fn id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// The cache identity of this request. The comment is not part of it.
    pub fn cache_key(&self, version: ApiVersion) -> CacheKey {
        CacheKey {
            version,
            section: self.section.clone(),
            selections: self.selections.clone(),
            id: self.id.clone(),
            params: self.params.clone(),
            key: self.key.clone(),
        }
    }

    /// `{base}{v2/}{section}/{id}?key=..&comment=..&selections=a,b&<params>`,
    /// leaving out every parameter whose value is empty.
    pub fn url(
        &self,
        base: &Url,
        version: ApiVersion,
        default_comment: Option<&str>,
    ) -> Result<Url, TransportError> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| TransportError::Url(format!("{base} cannot be a base URL")))?;
            segments.pop_if_empty();
            segments.extend(version.path_prefix());
            segments.push(&self.section);
            segments.push(self.id.as_deref().unwrap_or(""));
        }

        let selections = self.selections.join(",");
        let comment = self.comment.as_deref().or(default_comment).unwrap_or("");
        let builtin = [
            ("key", self.key.as_str()),
            ("comment", comment),
            ("selections", selections.as_str()),
        ];
        let extra = self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()));

        let pairs: Vec<(&str, &str)> = builtin
            .into_iter()
            .chain(extra)
            .filter(|(_, value)| !value.is_empty())
            .collect();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }
}

/// Per-call knobs that are not part of the request identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Absolute expiry for the cached response, in epoch milliseconds.
    pub expiry: Option<u64>,
    /// Only honoured by a cancellable transport.
    pub timeout: Option<Duration>,
}

/// Everything that identifies a response for caching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub version: ApiVersion,
    pub section: String,
    pub selections: Vec<String>,
    pub id: Option<String>,
    pub params: Vec<(String, String)>,
    pub key: String,
}
