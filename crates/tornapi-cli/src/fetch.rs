//! Schema sources: where the OpenAPI document and the legacy schema come from.

use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use tornapi_core::legacy::{ErrorCode, ErrorList, LegacySection, SectionList, SectionSchema};

/// Read-only access to the published schemas.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// The OpenAPI document, as raw text.
    async fn openapi(&self) -> Result<String>;

    /// `GET /sections`
    async fn sections(&self) -> Result<SectionList>;

    /// `GET /schema/{section}`
    async fn section_schema(&self, section: &str) -> Result<SectionSchema>;

    /// `GET /errors`
    async fn errors(&self) -> Result<ErrorList>;
}

/// Everything fetched from the legacy schema service.
#[derive(Debug, Clone)]
pub struct LegacyBundle {
    pub sections: Vec<LegacySection>,
    pub errors: Vec<ErrorCode>,
}

/// Fetch the section list, then every section schema and the error list
/// concurrently. Sections keep the order of the section list.
pub async fn fetch_legacy(source: &dyn SchemaSource) -> Result<LegacyBundle> {
    let list = source.sections().await?;
    log::info!("fetching {} legacy sections", list.sections.len());

    let schemas = try_join_all(list.sections.iter().map(|name| async move {
        let schema = source
            .section_schema(name)
            .await
            .with_context(|| format!("failed to fetch legacy schema for section `{name}`"))?;
        Ok::<_, anyhow::Error>(LegacySection {
            name: name.clone(),
            schema,
        })
    }));
    let (sections, errors) = tokio::try_join!(schemas, source.errors())?;

    Ok(LegacyBundle {
        sections,
        errors: errors.errors,
    })
}

/// Fetches over HTTP from the live services.
#[derive(Debug, Clone)]
pub struct HttpSchemaSource {
    client: reqwest::Client,
    openapi_url: String,
    legacy_base_url: String,
}

impl HttpSchemaSource {
    pub fn new(openapi_url: impl Into<String>, legacy_base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            openapi_url: openapi_url.into(),
            legacy_base_url: legacy_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        log::debug!("GET {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to fetch {url}"))?
            .error_for_status()
            .with_context(|| format!("failed to fetch {url}"))?;
        response
            .text()
            .await
            .with_context(|| format!("failed to read response body from {url}"))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).with_context(|| format!("unexpected response shape from {url}"))
    }
}

#[async_trait]
impl SchemaSource for HttpSchemaSource {
    async fn openapi(&self) -> Result<String> {
        self.get_text(&self.openapi_url).await
    }

    async fn sections(&self) -> Result<SectionList> {
        self.get_json(&format!("{}/sections", self.legacy_base_url))
            .await
    }

    async fn section_schema(&self, section: &str) -> Result<SectionSchema> {
        self.get_json(&format!("{}/schema/{section}", self.legacy_base_url))
            .await
    }

    async fn errors(&self) -> Result<ErrorList> {
        self.get_json(&format!("{}/errors", self.legacy_base_url))
            .await
    }
}
