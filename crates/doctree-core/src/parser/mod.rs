//! Doc comment parser
//!
//! Reads the text of a [`SourceComment`] and builds a [`DocComment`] through
//! a [`DocTreeMaker`], moving the maker's current position to the start of
//! every construct before creating its node. Malformed input never stops the
//! parse: the offending text becomes an ERRONEOUS node and a [`Diagnostic`]
//! is collected in [`ParseResult::errors`].

mod html;
mod scanner;
mod tags;

use std::sync::Arc;

use tracing::debug;

use crate::config::{DocTreeConfig, ParserConfig};
use crate::diagnostics::Diagnostic;
use crate::maker::DocTreeMaker;
use crate::position::SourceComment;
use crate::tree::{DocComment, DocNode};

use scanner::{Context, Scanner, offset};

/// Result of parsing one comment.
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// The comment tree; always present, even for malformed input.
    pub tree: DocComment,
    /// Problems found, in source order.
    pub errors: Vec<Diagnostic>,
}

impl ParseResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn tree(&self) -> &DocComment {
        &self.tree
    }

    pub fn errors(&self) -> &[Diagnostic] {
        &self.errors
    }
}

/// Parses comments with one configuration and one tree maker.
#[derive(Debug)]
pub struct DocCommentParser {
    maker: DocTreeMaker,
    config: ParserConfig,
}

impl Default for DocCommentParser {
    fn default() -> Self {
        Self::new(&DocTreeConfig::default())
    }
}

impl DocCommentParser {
    pub fn new(config: &DocTreeConfig) -> Self {
        Self {
            maker: DocTreeMaker::with_config(&config.sentence),
            config: config.parser.clone(),
        }
    }

    /// Uses a preconfigured maker, e.g. one with a break iterator.
    pub fn with_maker(maker: DocTreeMaker, config: ParserConfig) -> Self {
        Self { maker, config }
    }

    pub fn maker_mut(&mut self) -> &mut DocTreeMaker {
        &mut self.maker
    }

    pub fn parse(&mut self, comment: impl Into<Arc<SourceComment>>) -> ParseResult {
        let comment = comment.into();
        let markdown = self.config.markdown;
        let file_content = self.config.file_content;

        let (parts, root_pos, errors) = {
            let mut scanner = Scanner::new(comment.text(), &mut self.maker, markdown);
            let (parts, root_pos) = if file_content {
                parse_file_content(&mut scanner)
            } else {
                let (body, tags, root_pos) = parse_body(&mut scanner);
                (Sections { body, tags, ..Sections::default() }, root_pos)
            };
            (parts, root_pos, scanner.errors)
        };

        debug!(
            body = parts.body.len(),
            tags = parts.tags.len(),
            errors = errors.len(),
            "parsed doc comment"
        );
        let tree = self.maker.at(offset(root_pos)).new_doc_comment_tree_for(
            comment,
            parts.body,
            parts.tags,
            parts.preamble,
            parts.postamble,
        );
        ParseResult { tree, errors }
    }
}

/// Parses `comment` with a fresh parser for `config`.
pub fn parse_doc_comment(comment: impl Into<Arc<SourceComment>>, config: &DocTreeConfig) -> ParseResult {
    DocCommentParser::new(config).parse(comment)
}

#[derive(Default)]
struct Sections {
    preamble: Vec<DocNode>,
    body: Vec<DocNode>,
    tags: Vec<DocNode>,
    postamble: Vec<DocNode>,
}

/// Main description and block tags of the region up to `scanner.limit`.
/// Also returns where the description starts, which is where the root is.
fn parse_body(scanner: &mut Scanner<'_, '_>) -> (Vec<DocNode>, Vec<DocNode>, usize) {
    scanner.skip_whitespace();
    let root_pos = scanner.pos;
    let body = scanner.content(Context::Body);

    let mut tags = Vec::new();
    loop {
        scanner.skip_whitespace();
        if !scanner.at_block_tag_start() {
            break;
        }
        tags.push(scanner.block_tag());
    }
    (body, tags, root_pos)
}

/// An HTML file: everything through `<body ...>` is preamble, everything
/// from `</body>` on is postamble. Without a `<body>` the whole text is the
/// body.
fn parse_file_content(scanner: &mut Scanner<'_, '_>) -> (Sections, usize) {
    let text = scanner.text;
    let Some(body_open) = find_tag(text, "<body", 0) else {
        let (body, tags, root_pos) = parse_body(scanner);
        return (Sections { body, tags, ..Sections::default() }, root_pos);
    };
    let body_start = text[body_open..]
        .find('>')
        .map_or(text.len(), |gt| body_open + gt + 1);
    let body_end = find_tag(text, "</body", body_start).unwrap_or(text.len());

    scanner.limit = body_start;
    let preamble = scanner.content(Context::Html);

    scanner.pos = body_start;
    scanner.limit = body_end;
    let (body, tags, root_pos) = parse_body(scanner);

    scanner.pos = body_end;
    scanner.limit = text.len();
    let postamble = scanner.content(Context::Html);

    let sections = Sections {
        preamble,
        body,
        tags,
        postamble,
    };
    (sections, root_pos)
}

/// Case-insensitive search for `<name` followed by `>`, `/` or a blank.
fn find_tag(text: &str, prefix: &str, from: usize) -> Option<usize> {
    let lower = text.to_ascii_lowercase();
    let mut search = from;
    while let Some(found) = lower[search..].find(prefix) {
        let at = search + found;
        let next = lower[at + prefix.len()..].chars().next();
        if next.is_none_or(|c| c == '>' || c == '/' || c.is_whitespace()) {
            return Some(at);
        }
        search = at + prefix.len();
    }
    None
}
