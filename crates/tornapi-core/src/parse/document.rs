//! The slice of an OpenAPI 3.x document the Torn generator reads.
//!
//! The Torn API is read-only, so path items only carry `GET`. Everything
//! else in the document (servers, tags, security, examples) is ignored
//! during deserialization.

use indexmap::IndexMap;
use serde::Deserialize;

use super::schema::SchemaOrRef;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenApiSpec {
    pub openapi: String,
    pub info: Info,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    pub components: Option<Components>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Info {
    pub title: String,
    pub version: String,
}

/// Reusable definitions. Only schemas and parameters are referenced by the
/// Torn document.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: IndexMap<String, SchemaOrRef>,
    #[serde(default)]
    pub parameters: IndexMap<String, RefOr<Parameter>>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PathItem {
    /// Shared by every operation under the path.
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
    pub get: Option<Operation>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    #[serde(default)]
    pub parameters: Vec<RefOr<Parameter>>,
    /// Keyed by status code (`"200"`, `"default"`).
    #[serde(default)]
    pub responses: IndexMap<String, RefOr<Response>>,
}

impl Operation {
    /// Schema of the `200` response for `media_type`, when inline.
    pub fn ok_schema(&self, media_type: &str) -> Option<&SchemaOrRef> {
        self.responses
            .get("200")?
            .inline()?
            .content
            .get(media_type)?
            .schema
            .as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MediaType {
    pub schema: Option<SchemaOrRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

/// Either a `$ref` object or the inline definition.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RefOr<T> {
    Ref {
        #[serde(rename = "$ref")]
        ref_path: String,
    },
    Inline(T),
}

impl<T> RefOr<T> {
    pub fn inline(&self) -> Option<&T> {
        match self {
            RefOr::Inline(item) => Some(item),
            RefOr::Ref { .. } => None,
        }
    }

    /// Trailing segment of the `$ref` path, i.e. the component name.
    pub fn ref_name(&self) -> Option<&str> {
        match self {
            RefOr::Ref { ref_path } => ref_path.rsplit('/').next(),
            RefOr::Inline(_) => None,
        }
    }
}
