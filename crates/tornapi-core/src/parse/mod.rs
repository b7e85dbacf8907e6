pub mod document;
pub mod schema;

use crate::error::ParseError;
pub use document::OpenApiSpec;

/// Parse the Torn OpenAPI document from JSON, as served by the API.
pub fn from_json(input: &str) -> Result<OpenApiSpec, ParseError> {
    check_version(serde_json::from_str(input)?)
}

/// Parse a YAML rendition of the document (local copies, hand-edited fixtures).
pub fn from_yaml(input: &str) -> Result<OpenApiSpec, ParseError> {
    check_version(serde_yaml_ng::from_str(input)?)
}

/// Only 3.x documents share the schema dialect the resolver understands.
fn check_version(spec: OpenApiSpec) -> Result<OpenApiSpec, ParseError> {
    match spec.openapi.split('.').next() {
        Some("3") => Ok(spec),
        _ => Err(ParseError::UnsupportedVersion(spec.openapi)),
    }
}
