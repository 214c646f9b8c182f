//! Doctree Core
//!
//! Position-tracked trees for documentation comments. This crate provides
//! the node model, the factory that builds nodes at a current position, the
//! first-sentence splitter, end-position resolution, and a parser that turns
//! comment text into a tree.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod maker;
pub mod parser;
pub mod position;
pub mod reference;
pub mod result;
pub mod tree;

// Re-export commonly used types
pub use config::{ConfigLoader, DocTreeConfig, ParserConfig, SentenceConfig};
pub use diagnostics::{
    Diagnostic, DiagnosticPosition, DiagnosticRenderer, OutputFormat, Severity,
};
pub use error::{DocTreeError, ErrorKind};
pub use maker::{BreakIterator, DocTreeMaker, SimpleSentenceIterator};
pub use parser::{DocCommentParser, ParseResult, parse_doc_comment};
pub use position::{CommentOrigin, SourceComment};
pub use reference::{ReferenceError, ReferenceParser, ReferenceParts, SignatureParser};
pub use result::{Result, ResultExt};
pub use tree::{
    DocComment, DocKind, DocNode, NodeRef, end_position, nodes_to_pretty_string, to_json,
    to_pretty_string, to_tree_string,
};

pub use text_size::{TextRange, TextSize};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("doctree=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
