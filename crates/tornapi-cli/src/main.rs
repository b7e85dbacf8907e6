use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use tornapi_cli::{
    ExternalCompiler, ExternalFormatter, HttpSchemaSource, Passthrough, Pipeline, SchemaSource,
    SourceCompiler, SourceFormatter, persist,
};
use tornapi_core::config::{self, CONFIG_FILE_NAME, GeneratorConfig};
use tornapi_core::normalize::normalize;
use tornapi_core::parse;
use tornapi_core::sections::extract_v2_sections;
use tornapi_core::transform::component_schemas;

#[derive(Parser)]
#[command(
    name = "tornapi-gen",
    about = "Generate the typed Torn API TypeScript client",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the schemas and generate the client
    Generate {
        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// URL of the OpenAPI document
        #[arg(long)]
        openapi_url: Option<String>,

        /// Base URL of the legacy schema service
        #[arg(long)]
        legacy_url: Option<String>,

        /// Include the legacy (v1) sections and the error enum
        #[arg(long, overrides_with = "no_legacy")]
        legacy: bool,

        /// Only use the OpenAPI document
        #[arg(long, overrides_with = "legacy")]
        no_legacy: bool,

        /// Skip the formatter
        #[arg(long)]
        no_format: bool,

        /// Skip compilation to index.js / index.d.ts
        #[arg(long)]
        no_compile: bool,
    },

    /// Summarize the v2 sections and component schemas of an OpenAPI document
    Inspect {
        /// Local OpenAPI file (.json, .yaml or .yml); fetched from the configured URL when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// Write a default .tornapi.yaml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            output,
            openapi_url,
            legacy_url,
            legacy,
            no_legacy,
            no_format,
            no_compile,
        } => {
            let mut cfg = try_load_config()?.unwrap_or_default();
            if let Some(output) = output {
                cfg.output = output.display().to_string();
            }
            if let Some(url) = openapi_url {
                cfg.openapi_url = url;
            }
            if let Some(url) = legacy_url {
                cfg.legacy_base_url = url;
            }
            if legacy {
                cfg.legacy = true;
            }
            if no_legacy {
                cfg.legacy = false;
            }
            cfg.format &= !no_format;
            cfg.compile &= !no_compile;
            cmd_generate(&cfg).await
        }

        Commands::Inspect { input, format } => cmd_inspect(input, format).await,

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "tornapi-gen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<GeneratorConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    Ok(config::load_config(&config_path)?)
}

async fn cmd_generate(cfg: &GeneratorConfig) -> Result<()> {
    let source = HttpSchemaSource::new(&cfg.openapi_url, &cfg.legacy_base_url);
    let formatter: Box<dyn SourceFormatter> = if cfg.format {
        Box::new(ExternalFormatter::new(cfg.tools.formatter.clone()))
    } else {
        Box::new(Passthrough)
    };
    let compiler = ExternalCompiler::new(cfg.tools.compiler.clone());

    eprintln!("Generating from {}", cfg.openapi_url);
    if cfg.legacy {
        eprintln!("  with legacy schema from {}", cfg.legacy_base_url);
    }

    let pipeline = Pipeline {
        source: &source,
        formatter: formatter.as_ref(),
        compiler: cfg.compile.then_some(&compiler as &dyn SourceCompiler),
        legacy: cfg.legacy,
    };
    let artifacts = pipeline.run().await?;

    let output_dir = PathBuf::from(&cfg.output);
    for path in persist(&output_dir, &artifacts)? {
        eprintln!("  wrote {}", path.display());
    }
    eprintln!("Generated client in {}", output_dir.display());
    Ok(())
}

async fn cmd_inspect(input: Option<PathBuf>, format: InspectFormat) -> Result<()> {
    let mut spec = match input {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let is_yaml = path
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml");
            if is_yaml {
                parse::from_yaml(&content)?
            } else {
                parse::from_json(&content)?
            }
        }
        None => {
            let cfg = try_load_config()?.unwrap_or_default();
            let content = HttpSchemaSource::new(&cfg.openapi_url, &cfg.legacy_base_url)
                .openapi()
                .await?;
            parse::from_json(&content)?
        }
    };
    normalize(&mut spec);
    let summary = build_inspect_summary(&spec)?;

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&summary)?;
            print!("{yaml}");
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)?;
            println!("{json}");
        }
    }

    Ok(())
}

fn build_inspect_summary(spec: &parse::OpenApiSpec) -> Result<serde_json::Value> {
    let schemas: Vec<serde_json::Value> = component_schemas(spec)?
        .iter()
        .map(|s| {
            serde_json::json!({
                "name": s.name().identifier,
                "kind": s.kind(),
            })
        })
        .collect();

    Ok(serde_json::json!({
        "info": {
            "title": spec.info.title,
            "version": spec.info.version,
        },
        "sections": extract_v2_sections(spec),
        "schemas": schemas,
    }))
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
