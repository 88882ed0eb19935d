//! Minimal CLI: JSON5 in → canonical JSON out
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tracing_subscriber::EnvFilter;

use json5b::decode::DEFAULT_MAX_DEPTH;
use json5b::{DecodeOptions, Dynamic};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// decode a JSON5 document and print it as canonical JSON (4-space indent)
#[derive(Parser, Debug)]
#[command(name = "json5b", version)]
pub struct CommandLineInterface {
    /// input .json5 file (stdin if omitted)
    #[arg(short = 'c', long = "input")]
    input: Option<PathBuf>,

    /// output .json file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// maximum nesting depth accepted in the input
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        init_tracing();
        let source = match self.input.as_deref() {
            Some(path) => {
                std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
            }
            None => {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf).context("failed to read stdin")?;
                buf
            }
        };

        let options = DecodeOptions { max_depth: self.max_depth, ..DecodeOptions::default() };
        let mut document = Dynamic::default();
        json5b::unmarshal_with(&source, &mut document, &options).with_context(|| match self.input.as_deref() {
            Some(path) => format!("failed to decode {}", path.display()),
            None => "failed to decode stdin".to_string(),
        })?;
        tracing::debug!(bytes = source.len(), "decoded document");

        let mut rendered = render_canonical(&document)?;
        rendered.push(b'\n');
        match self.out.as_deref() {
            Some(out) => write_file(out, &rendered)?,
            None => std::io::stdout().write_all(&rendered).context("failed to write stdout")?,
        }
        Ok(())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// JSON with four-space indentation; non-finite numbers are refused.
fn render_canonical(value: &Dynamic) -> anyhow::Result<Vec<u8>> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer).context("document cannot be written as JSON")?;
    Ok(out)
}

fn write_file(out: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(out, bytes).with_context(|| format!("failed to write {}", out.display()))
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_with_four_space_indent() {
        let document: Dynamic = json5b::from_str("{a: [1, 'x'], b: {}}").unwrap();
        let rendered = String::from_utf8(render_canonical(&document).unwrap()).unwrap();
        assert_eq!(rendered, "{\n    \"a\": [\n        1,\n        \"x\"\n    ],\n    \"b\": {}\n}");
    }

    #[test]
    fn refuses_non_finite_numbers() {
        let document: Dynamic = json5b::from_str("[NaN]").unwrap();
        assert!(render_canonical(&document).is_err());
    }

    #[test]
    fn flags_parse() {
        let cli = CommandLineInterface::try_parse_from(["json5b", "-c", "in.json5", "--out", "o.json", "--max-depth", "4"])
            .unwrap();
        assert_eq!(cli.input.as_deref(), Some(Path::new("in.json5")));
        assert_eq!(cli.out.as_deref(), Some(Path::new("o.json")));
        assert_eq!(cli.max_depth, 4);
        let cli = CommandLineInterface::try_parse_from(["json5b"]).unwrap();
        assert!(cli.input.is_none());
        assert_eq!(cli.max_depth, DEFAULT_MAX_DEPTH);
    }
}
