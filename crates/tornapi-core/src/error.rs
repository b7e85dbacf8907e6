use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported OpenAPI version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid field descriptor for `{field}`: {reason}")]
    InvalidDescriptor { field: String, reason: String },

    #[error("invalid structure definition: {0}")]
    InvalidStructure(String),
}

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid schema reference format: {0}")]
    InvalidRefFormat(String),

    #[error("schemas `{first}` and `{second}` would both be declared as `{identifier}`")]
    NameCollision {
        identifier: String,
        first: String,
        second: String,
    },
}
