//! Configuration structures

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::error::DocTreeError;

/// Top-level configuration
///
/// ```toml
/// [parser]
/// markdown = false
/// fileContent = false
///
/// [sentence]
/// useBreakIterator = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct DocTreeConfig {
    pub parser: ParserConfig,
    pub sentence: SentenceConfig,
}

/// How comment text is interpreted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ParserConfig {
    /// Treat body text as Markdown instead of HTML
    pub markdown: bool,

    /// Input is a whole HTML file (package or overview documentation) with
    /// content outside `<body>`
    pub file_content: bool,
}

/// How the first sentence is found
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SentenceConfig {
    /// Use an injected break iterator when one is available. When false, a
    /// period followed by whitespace always ends the sentence.
    pub use_break_iterator: bool,
}

impl Default for SentenceConfig {
    fn default() -> Self {
        Self {
            use_break_iterator: true,
        }
    }
}

impl DocTreeConfig {
    /// Load a configuration file, picking the format from the extension
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DocTreeError::io_error(path, e))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml(&content),
            Some("json") => Self::from_json(&content),
            other => Err(DocTreeError::config_error(format!(
                "Unsupported config format '{}' for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| DocTreeError::config_error(format!("Invalid TOML config: {e}")))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| DocTreeError::config_error(format!("Invalid JSON config: {e}")))
    }
}
