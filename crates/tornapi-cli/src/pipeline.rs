//! The generation run: fetch, normalize, emit, splice, format, compile, persist.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tornapi_core::GeneratedFile;
use tornapi_core::normalize::normalize;
use tornapi_core::parse;
use tornapi_typescript::{LegacyInput, generate_types, render_client};

use crate::fetch::{SchemaSource, fetch_legacy};
use crate::tools::{CompiledOutput, SourceCompiler, SourceFormatter};

/// Collaborators and switches for one run.
pub struct Pipeline<'a> {
    pub source: &'a dyn SchemaSource,
    pub formatter: &'a dyn SourceFormatter,
    /// `None` skips compilation; only `openapi.json` and `index.ts` are produced.
    pub compiler: Option<&'a dyn SourceCompiler>,
    /// Also fetch the legacy schema and error codes.
    pub legacy: bool,
}

/// In-memory results of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    /// The OpenAPI document exactly as fetched.
    pub openapi: String,
    /// The formatted client source.
    pub source: String,
    pub compiled: Option<CompiledOutput>,
}

impl Artifacts {
    pub fn files(&self) -> Vec<GeneratedFile> {
        let mut files = vec![
            GeneratedFile {
                path: "openapi.json".to_string(),
                content: self.openapi.clone(),
            },
            GeneratedFile {
                path: "index.ts".to_string(),
                content: self.source.clone(),
            },
        ];
        if let Some(ref compiled) = self.compiled {
            files.push(GeneratedFile {
                path: "index.js".to_string(),
                content: compiled.code.clone(),
            });
            files.push(GeneratedFile {
                path: "index.d.ts".to_string(),
                content: compiled.declarations.clone(),
            });
        }
        files
    }
}

impl Pipeline<'_> {
    /// Run every step up to, but not including, persistence. Nothing touches
    /// the filesystem until all steps have succeeded.
    pub async fn run(&self) -> Result<Artifacts> {
        let legacy = async {
            if self.legacy {
                fetch_legacy(self.source).await.map(Some)
            } else {
                Ok(None)
            }
        };
        let (openapi, legacy) = tokio::try_join!(self.source.openapi(), legacy)?;
        log::info!("fetched OpenAPI document ({} bytes)", openapi.len());

        let mut spec = parse::from_json(&openapi).context("failed to parse the OpenAPI document")?;
        normalize(&mut spec);

        let legacy_input = legacy.as_ref().map(|bundle| LegacyInput {
            sections: &bundle.sections,
            errors: &bundle.errors,
        });
        let types = generate_types(&spec, legacy_input).context("failed to generate types")?;
        let client = render_client(&types).context("failed to splice the client template")?;
        log::info!("generated client source ({} bytes)", client.len());

        let source = self
            .formatter
            .format(&client)
            .await
            .context("failed to format the generated source")?;

        let compiled = match self.compiler {
            Some(compiler) => Some(
                compiler
                    .compile(&source)
                    .await
                    .context("failed to compile the generated source")?,
            ),
            None => None,
        };

        Ok(Artifacts {
            openapi,
            source,
            compiled,
        })
    }
}

/// Write the artifacts into `output`, creating it if needed.
pub fn persist(output: &Path, artifacts: &Artifacts) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory {}", output.display()))?;

    let mut written = Vec::new();
    for file in artifacts.files() {
        let path = output.join(&file.path);
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}
