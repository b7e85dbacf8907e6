use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Project configuration loaded from `.tornapi.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Where the OpenAPI (v2) document is published.
    pub openapi_url: String,
    /// Base URL of the legacy (v1) schema service.
    pub legacy_base_url: String,
    /// Output directory for the generated artifacts.
    pub output: String,
    /// Also generate the v1 section types and the error enum.
    pub legacy: bool,
    pub format: bool,
    pub compile: bool,
    pub tools: ToolsConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            openapi_url: "https://www.torn.com/swagger/openapi.json".to_string(),
            legacy_base_url: "https://api.torn.com/schema".to_string(),
            output: "dist".to_string(),
            legacy: true,
            format: true,
            compile: true,
            tools: ToolsConfig::default(),
        }
    }
}

/// External commands used for formatting and compiling the generated source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Formatter command; reads source on stdin and writes it to stdout.
    pub formatter: Vec<String>,
    /// Compiler command; invoked inside a scratch directory holding `index.ts`.
    pub compiler: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            formatter: [
                "npx",
                "prettier",
                "--parser",
                "typescript",
                "--tab-width",
                "4",
            ]
            .map(String::from)
            .to_vec(),
            compiler: [
                "npx",
                "tsc",
                "index.ts",
                "--declaration",
                "--target",
                "es2020",
                "--module",
                "es2020",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".tornapi.yaml";

/// Load `path` if it exists. A missing file is not an error; an unreadable
/// or malformed one is.
pub fn load_config(path: &Path) -> Result<Option<GeneratorConfig>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_yaml_ng::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# tornapi-gen configuration
openapi_url: https://www.torn.com/swagger/openapi.json
legacy_base_url: https://api.torn.com/schema
output: dist

legacy: true    # generate SectionsV1Map and the TornApiError enum
format: true    # run the formatter over the generated source
compile: true   # emit index.js and index.d.ts

tools:
  formatter: [npx, prettier, --parser, typescript, --tab-width, "4"]
  compiler: [npx, tsc, index.ts, --declaration, --target, es2020, --module, es2020]
"#
}
