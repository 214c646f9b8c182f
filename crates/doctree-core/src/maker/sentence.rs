//! Splitting a comment body into its first sentence and the rest

use text_size::TextSize;
use tracing::trace;

use crate::tree::{DocKind, DocNode};

use super::DocTreeMaker;
use super::breaks::sentence_break;

/// HTML elements that end the first sentence when they appear after it.
const SENTENCE_BREAK_TAGS: &[&str] = &["H1", "H2", "H3", "H4", "H5", "H6", "PRE", "P"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitState {
    Scanning,
    Done,
}

/// A start or end element of a block-level tag, not at the very start of
/// the body and not at a synthetic position.
pub(crate) fn is_sentence_break(node: &DocNode, is_first: bool) -> bool {
    let name = match node {
        DocNode::StartElement(element) => element.name(),
        DocNode::EndElement(element) => element.name(),
        _ => return false,
    };
    !is_first
        && node.pos().is_some_and(|pos| pos > TextSize::from(1))
        && SENTENCE_BREAK_TAGS
            .iter()
            .any(|tag| tag.eq_ignore_ascii_case(name))
}

fn trim_end(text: &str) -> &str {
    text.trim_end_matches(|c: char| c.is_whitespace())
}

/// Offset of the first non-whitespace byte at or after `from`.
fn skip_whitespace(text: &str, from: usize) -> Option<usize> {
    text[from..]
        .find(|c: char| !c.is_whitespace())
        .map(|offset| from + offset)
}

impl DocTreeMaker {
    /// Splits `nodes` into the first sentence and the remaining body.
    ///
    /// A text node holding the end of the first sentence is cut in two: the
    /// head (trailing whitespace trimmed) keeps the original position, the
    /// tail starts at its first non-blank character. Everything after the
    /// break is copied unchanged. The current position is left as it was.
    pub fn split_body(&mut self, nodes: &[DocNode]) -> (Vec<DocNode>, Vec<DocNode>) {
        let mut first = Vec::new();
        let mut body = Vec::new();
        if nodes.is_empty() {
            return (first, body);
        }

        let saved_pos = self.current_position();
        let mut state = SplitState::Scanning;

        for (index, node) in nodes.iter().enumerate() {
            if state == SplitState::Done {
                body.push(node.clone());
                continue;
            }

            let is_first = index == 0;
            let next = nodes.get(index + 1);

            match node.kind() {
                DocKind::Return | DocKind::Summary => {
                    trace!(kind = %node.kind(), "first sentence ends with tag");
                    first.push(node.clone());
                    state = SplitState::Done;
                }
                kind @ (DocKind::Text | DocKind::Markdown) => {
                    let text = node.text_content().unwrap_or_default();
                    let is_markdown = kind == DocKind::Markdown;
                    let offset = sentence_break(self.break_iterator(), is_markdown, text, next);

                    match offset {
                        Some(offset) if offset > 0 => {
                            trace!(offset, "first sentence ends inside text");
                            let head = trim_end(&text[..offset]);
                            self.set_current_position(node.pos());
                            first.push(self.new_text_like(kind, head));
                            if let Some(rest) = skip_whitespace(text, offset) {
                                let rest_pos = node
                                    .pos()
                                    .map(|pos| pos + TextSize::from(rest as u32));
                                self.set_current_position(rest_pos);
                                body.push(self.new_text_like(kind, &text[rest..]));
                            }
                            state = SplitState::Done;
                        }
                        _ if next.is_some_and(|next| is_sentence_break(next, false)) => {
                            trace!("first sentence ends before block element");
                            self.set_current_position(node.pos());
                            first.push(self.new_text_like(kind, trim_end(text)));
                            state = SplitState::Done;
                        }
                        _ => first.push(node.clone()),
                    }
                }
                _ => {
                    if is_sentence_break(node, is_first) {
                        trace!("block element starts the body");
                        body.push(node.clone());
                        state = SplitState::Done;
                    } else {
                        first.push(node.clone());
                    }
                }
            }
        }

        self.set_current_position(saved_pos);
        (first, body)
    }

    /// The first-sentence half of [`DocTreeMaker::split_body`].
    pub fn first_sentence(&mut self, nodes: &[DocNode]) -> Vec<DocNode> {
        self.split_body(nodes).0
    }

    fn new_text_like(&mut self, kind: DocKind, text: &str) -> DocNode {
        if kind == DocKind::Markdown {
            self.new_markdown_tree(text).into()
        } else {
            self.new_text_tree(text).into()
        }
    }
}
