//! Configuration for parsing and sentence breaking
//!
//! Configuration lives in `doctree.toml` or `.doctreerc.json`. When no path
//! is given, the loader searches from the current directory up to the
//! filesystem root. Every field is optional.
//!
//! ```toml
//! [parser]
//! markdown = true
//!
//! [sentence]
//! useBreakIterator = false
//! ```

mod doctree_config;
mod loader;

pub use doctree_config::{DocTreeConfig, ParserConfig, SentenceConfig};
pub use loader::{CONFIG_FILE_NAMES, ConfigLoader};
