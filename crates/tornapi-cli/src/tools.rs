//! External formatter and compiler for the generated TypeScript.

use std::process::Stdio;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Pretty-prints TypeScript source.
#[async_trait]
pub trait SourceFormatter: Send + Sync {
    async fn format(&self, source: &str) -> Result<String>;
}

/// Compiles TypeScript source into JavaScript plus declarations.
#[async_trait]
pub trait SourceCompiler: Send + Sync {
    async fn compile(&self, source: &str) -> Result<CompiledOutput>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledOutput {
    /// `index.js`
    pub code: String,
    /// `index.d.ts`
    pub declarations: String,
}

/// Leaves the source untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

#[async_trait]
impl SourceFormatter for Passthrough {
    async fn format(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// A formatter that reads the source on stdin and writes the result to
/// stdout, e.g. `npx prettier --parser typescript`.
#[derive(Debug, Clone)]
pub struct ExternalFormatter {
    command: Vec<String>,
}

impl ExternalFormatter {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

#[async_trait]
impl SourceFormatter for ExternalFormatter {
    async fn format(&self, source: &str) -> Result<String> {
        let (program, args) = split_command(&self.command)?;
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("failed to start formatter `{program}`"))?;

        let mut stdin = child
            .stdin
            .take()
            .context("formatter stdin was not captured")?;
        // Feed stdin while draining stdout; stdin closes when the write ends.
        let write = async move { stdin.write_all(source.as_bytes()).await };
        let (written, output) = tokio::join!(write, child.wait_with_output());

        let output = output.context("formatter did not finish")?;
        if !output.status.success() {
            bail!(
                "formatter `{}` failed ({}): {}",
                self.command.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        written.context("failed to send source to the formatter")?;
        String::from_utf8(output.stdout).context("formatter produced invalid UTF-8")
    }
}

/// A compiler run inside a scratch directory holding `index.ts`; it must
/// leave `index.js` and `index.d.ts` next to it, e.g.
/// `npx tsc index.ts --declaration`.
#[derive(Debug, Clone)]
pub struct ExternalCompiler {
    command: Vec<String>,
}

impl ExternalCompiler {
    pub fn new(command: Vec<String>) -> Self {
        Self { command }
    }
}

#[async_trait]
impl SourceCompiler for ExternalCompiler {
    async fn compile(&self, source: &str) -> Result<CompiledOutput> {
        let (program, args) = split_command(&self.command)?;
        let scratch = tempfile::tempdir().context("failed to create a scratch directory")?;
        fs::write(scratch.path().join("index.ts"), source)
            .await
            .context("failed to write index.ts to the scratch directory")?;

        let output = Command::new(program)
            .args(args)
            .current_dir(scratch.path())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .with_context(|| format!("failed to start compiler `{program}`"))?;
        if !output.status.success() {
            bail!(
                "compiler `{}` failed ({}): {}{}",
                self.command.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stdout).trim(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let read = |name: &'static str| {
            let path = scratch.path().join(name);
            async move {
                fs::read_to_string(path)
                    .await
                    .with_context(|| format!("compiler did not produce {name}"))
            }
        };
        Ok(CompiledOutput {
            code: read("index.js").await?,
            declarations: read("index.d.ts").await?,
        })
    }
}

fn split_command(command: &[String]) -> Result<(&str, &[String])> {
    match command.split_first() {
        Some((program, args)) => Ok((program.as_str(), args)),
        None => bail!("tool command is empty"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_passthrough() {
        assert_eq!(Passthrough.format("type A = 1;").await.unwrap(), "type A = 1;");
    }

    #[tokio::test]
    async fn test_empty_command_is_rejected() {
        let err = ExternalFormatter::new(Vec::new()).format("x").await.unwrap_err();
        assert_eq!(err.to_string(), "tool command is empty");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_external_formatter_pipes_stdin() {
        let formatter = ExternalFormatter::new(command(&["tr", "a", "b"]));
        assert_eq!(formatter.format("aaa").await.unwrap(), "bbb");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_formatter_streams_large_sources() {
        let line = "export interface UserBasic { id: number; name: string }\n";
        let source = line.repeat(480 * 1024 / line.len());
        let formatter = ExternalFormatter::new(command(&["cat"]));
        let formatted = tokio::time::timeout(
            std::time::Duration::from_secs(30),
            formatter.format(&source),
        )
        .await
        .expect("formatter stalled on a large source")
        .unwrap();
        assert_eq!(formatted.len(), source.len());
        assert_eq!(formatted, source);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_formatter_is_fatal() {
        let formatter = ExternalFormatter::new(command(&["false"]));
        let err = formatter.format("x").await.unwrap_err();
        assert!(err.to_string().starts_with("formatter `false` failed"), "{err}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_external_compiler_collects_outputs() {
        let compiler = ExternalCompiler::new(command(&[
            "sh",
            "-c",
            "cp index.ts index.js && echo 'export {};' > index.d.ts",
        ]));
        let output = compiler.compile("const a = 1;").await.unwrap();
        assert_eq!(output.code, "const a = 1;");
        assert_eq!(output.declarations, "export {};\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_compiler_missing_output() {
        let compiler = ExternalCompiler::new(command(&["true"]));
        let err = compiler.compile("x").await.unwrap_err();
        assert_eq!(err.to_string(), "compiler did not produce index.js");
    }
}
