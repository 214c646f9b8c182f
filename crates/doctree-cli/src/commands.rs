//! CLI command implementations

use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use doctree_core::tree::Node;
use doctree_core::{
    CommentOrigin, ConfigLoader, DiagnosticRenderer, DocTreeConfig, ParseResult, ResultExt,
    SourceComment, TextSize, nodes_to_pretty_string, parse_doc_comment, to_json, to_tree_string,
};
use serde_json::json;
use tracing::debug;

use crate::OutputFormat;

/// Input text and the name used for it in diagnostics.
struct Input {
    text: String,
    name: String,
}

fn read_input(path: &Path) -> anyhow::Result<Input> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(Input {
            text,
            name: "<stdin>".to_string(),
        });
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Input {
        text,
        name: path.display().to_string(),
    })
}

/// Configuration from `--config`, or discovered next to the input.
///
/// A broken `--config` file is an error. A broken discovered one is logged
/// and the defaults are used.
fn load_config(input: &Path, config_path: Option<&Path>) -> anyhow::Result<DocTreeConfig> {
    if let Some(path) = config_path {
        return Ok(ConfigLoader::load(Some(path), None)?);
    }
    let start_dir = match input.parent() {
        Some(parent) if input != Path::new("-") && !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(ConfigLoader::load(None, Some(start_dir))
        .log_and_continue()
        .unwrap_or_default())
}

/// The comment held by `text`, with positions starting at `base`.
///
/// A `/** ... */` block comment has its delimiters and line prefixes removed;
/// anything else is taken as comment text as it stands.
fn source_comment(text: &str, base: u32) -> SourceComment {
    let trimmed = text.trim_start();
    let leading = (text.len() - trimmed.len()) as u32;
    if trimmed.starts_with("/**") {
        SourceComment::from_block_comment(trimmed.trim_end(), TextSize::from(base + leading))
    } else {
        SourceComment::contiguous(text, TextSize::from(base))
    }
}

fn parse_input(input: &Input, offset: u32, config: &DocTreeConfig) -> ParseResult {
    let result = parse_doc_comment(source_comment(&input.text, offset), config);
    debug!(
        "Parsed {} with {} diagnostic(s)",
        input.name,
        result.errors.len()
    );
    result
}

/// Parse command implementation
pub fn parse_command(
    path: &Path,
    offset: u32,
    markdown: bool,
    format: OutputFormat,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let input = read_input(path)?;
    let mut config = load_config(path, config_path)?;
    if markdown {
        config.parser.markdown = true;
    }
    let result = parse_input(&input, offset, &config);

    match format {
        OutputFormat::Text => {
            print!("{}", to_tree_string(result.tree()));
            if !result.is_valid() {
                // Diagnostics are placed in the input itself, so map them
                // through an origin that ignores `--offset`.
                let local = CommentOrigin::Source(Arc::new(source_comment(&input.text, 0)));
                let rendered = DiagnosticRenderer::new().render(
                    result.errors(),
                    &input.text,
                    &local,
                    Some(&input.name),
                );
                eprintln!("{rendered}");
            }
        }
        OutputFormat::Json => {
            let origin = result.tree().origin();
            let file_pos = |offset: Option<TextSize>| origin.source_pos(offset).map(u32::from);
            let diagnostics: Vec<_> = result
                .errors()
                .iter()
                .map(|diag| {
                    json!({
                        "code": diag.code,
                        "severity": diag.severity,
                        "message": diag.message,
                        "range": diag.range,
                        "fileStart": file_pos(diag.range.map(|r| r.start())),
                        "fileEnd": file_pos(diag.range.map(|r| r.end())),
                    })
                })
                .collect();
            let document = json!({
                "file": input.name,
                "fileStart": file_pos(result.tree().pos()),
                "valid": result.is_valid(),
                "firstSentence": nodes_to_pretty_string(result.tree().first_sentence()),
                "tree": to_json(result.tree()),
                "diagnostics": diagnostics,
            });
            println!("{}", serde_json::to_string_pretty(&document)?);
        }
    }
    Ok(())
}

/// First-sentence command implementation
pub fn first_sentence_command(path: &Path, config_path: Option<&Path>) -> anyhow::Result<()> {
    let input = read_input(path)?;
    let config = load_config(path, config_path)?;
    let result = parse_input(&input, 0, &config);
    println!("{}", nodes_to_pretty_string(result.tree().first_sentence()));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_comment_positions_start_at_the_delimiter() {
        let comment = source_comment("  /** Hi. */\n", 10);
        assert_eq!(comment.text(), " Hi. ");
        assert_eq!(comment.source_pos(TextSize::from(1)), Some(TextSize::from(16)));
    }

    #[test]
    fn broken_discovered_config_falls_back_to_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("doctree.toml"), "[parser]\nmarkdown = \"yes\"\n").unwrap();
        let input = dir.path().join("c.txt");

        let config = load_config(&input, None).unwrap();
        assert_eq!(config, DocTreeConfig::default());
    }

    #[test]
    fn broken_explicit_config_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("doctree.toml");
        std::fs::write(&path, "[parser]\nmarkdown = \"yes\"\n").unwrap();

        assert!(load_config(Path::new("-"), Some(&path)).is_err());
    }

    #[test]
    fn plain_text_is_taken_verbatim() {
        let comment = source_comment("Hi.\n", 4);
        assert_eq!(comment.text(), "Hi.\n");
        assert_eq!(comment.source_pos(TextSize::from(0)), Some(TextSize::from(4)));
    }
}
