//! Character cursor shared by the content and tag parsers

use text_size::{TextRange, TextSize};
use tracing::debug;

use crate::diagnostics::Diagnostic;
use crate::maker::DocTreeMaker;
use crate::tree::DocNode;

/// Byte offset into the comment text as a tree position.
pub(super) fn offset(i: usize) -> TextSize {
    TextSize::from(i as u32)
}

/// Why a construct could not be parsed. Turned into an ERRONEOUS node by
/// whoever started the construct.
#[derive(Debug)]
pub(super) struct Failure {
    pub(super) at: usize,
    pub(super) code: &'static str,
    pub(super) message: String,
}

impl Failure {
    pub(super) fn new(at: usize, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            at,
            code,
            message: message.into(),
        }
    }
}

pub(super) type Parsed<T> = std::result::Result<T, Failure>;

/// Where a run of content stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Context {
    /// Main description: stops at a block tag.
    Body,
    /// Description of a block tag: stops at the next block tag.
    BlockTag,
    /// Inside `{@tag ...}`: stops at the unbalanced `}` or a block tag.
    InlineTag,
    /// HTML around `<body>` in file content: stops only at the region end.
    Html,
}

impl Context {
    pub(super) fn stops_at_block_tags(self) -> bool {
        self != Context::Html
    }
}

pub(super) struct Scanner<'a, 'm> {
    pub(super) text: &'a str,
    pub(super) pos: usize,
    /// End of the region being parsed; never past `text.len()`.
    pub(super) limit: usize,
    pub(super) maker: &'m mut DocTreeMaker,
    pub(super) errors: Vec<Diagnostic>,
    pub(super) markdown: bool,
}

impl<'a, 'm> Scanner<'a, 'm> {
    pub(super) fn new(text: &'a str, maker: &'m mut DocTreeMaker, markdown: bool) -> Self {
        Self {
            text,
            pos: 0,
            limit: text.len(),
            maker,
            errors: Vec::new(),
            markdown,
        }
    }

    pub(super) fn rest(&self) -> &'a str {
        self.text.get(self.pos..self.limit).unwrap_or("")
    }

    pub(super) fn at_end(&self) -> bool {
        self.pos >= self.limit
    }

    pub(super) fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub(super) fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    pub(super) fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    pub(super) fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    pub(super) fn bump_while(&mut self, mut keep: impl FnMut(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !keep(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.text[start..self.pos]
    }

    pub(super) fn skip_whitespace(&mut self) {
        self.bump_while(char::is_whitespace);
    }

    /// `@name` as the first non-blank text on its line.
    pub(super) fn at_block_tag_start(&self) -> bool {
        let mut chars = self.rest().chars();
        if chars.next() != Some('@') || !chars.next().is_some_and(|c| c.is_ascii_alphabetic()) {
            return false;
        }
        let line_start = self.text[..self.pos].rfind('\n').map_or(0, |i| i + 1);
        self.text[line_start..self.pos].chars().all(char::is_whitespace)
    }

    /// Offset of the `}` closing the construct the cursor is inside,
    /// counting nested braces. Block tags do not stop the search.
    pub(super) fn balanced_close(&self) -> Option<usize> {
        let mut depth = 0usize;
        for (i, c) in self.rest().char_indices() {
            match c {
                '{' => depth += 1,
                '}' if depth == 0 => return Some(self.pos + i),
                '}' => depth -= 1,
                _ => {}
            }
        }
        None
    }

    /// Moves past the `}` closing the current inline tag, or to the next
    /// block tag or region end when there is none.
    pub(super) fn skip_to_inline_end(&mut self) {
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            if self.at_block_tag_start() {
                return;
            }
            self.pos += c.len_utf8();
            match c {
                '{' => depth += 1,
                '}' if depth == 0 => return,
                '}' => depth -= 1,
                _ => {}
            }
        }
    }

    pub(super) fn skip_to_next_block_tag(&mut self) {
        while !self.at_end() && !self.at_block_tag_start() {
            self.bump();
        }
    }

    /// Name after `@` or `{@`.
    pub(super) fn tag_name(&mut self) -> &'a str {
        self.bump_while(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '_'))
    }

    pub(super) fn identifier(&mut self) -> &'a str {
        self.bump_while(|c| c.is_alphanumeric() || matches!(c, '_' | '$'))
    }

    /// Run of non-blank characters, stopping before `}`.
    pub(super) fn word(&mut self) -> &'a str {
        self.bump_while(|c| !c.is_whitespace() && c != '}')
    }

    /// Records `failure` and wraps everything from `start` to the cursor in
    /// an ERRONEOUS node.
    pub(super) fn erroneous(&mut self, start: usize, failure: Failure) -> DocNode {
        let end = self.pos.max(failure.at);
        let range = TextRange::new(offset(failure.at), offset(end));
        debug!(
            code = failure.code,
            at = failure.at,
            "recovered from malformed comment text"
        );
        let diagnostic = Diagnostic::error(failure.code, failure.message).with_range(range);
        self.errors.push(diagnostic.clone());
        let body = &self.text[start..end];
        self.maker
            .at(offset(start))
            .new_erroneous_tree(body, diagnostic)
            .into()
    }
}
