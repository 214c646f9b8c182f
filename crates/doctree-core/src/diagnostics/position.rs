//! File positions for nodes of a doc comment
//!
//! A node only knows comment-relative offsets. [`DiagnosticPosition`] pairs
//! the start, preferred and end offsets of a node with the comment they
//! belong to, and converts each one to a file offset only when asked.

use text_size::{TextRange, TextSize};

use crate::position::CommentOrigin;
use crate::tree::{DocComment, NodeRef};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticPosition {
    origin: CommentOrigin,
    start: Option<TextSize>,
    preferred: Option<TextSize>,
    end: Option<TextSize>,
}

impl DiagnosticPosition {
    pub fn new(
        origin: CommentOrigin,
        start: Option<TextSize>,
        preferred: Option<TextSize>,
        end: Option<TextSize>,
    ) -> Self {
        Self {
            origin,
            start,
            preferred,
            end,
        }
    }

    /// Positions of `node`, which must belong to `comment`.
    ///
    /// The preferred position is where a caret should point: the detection
    /// point for erroneous nodes, the start for everything else.
    pub fn for_node<'a>(comment: &DocComment, node: impl Into<NodeRef<'a>>) -> Self {
        let node = node.into();
        let preferred = match node {
            NodeRef::Erroneous(erroneous) => erroneous.pref_pos(),
            _ => node.pos(),
        };
        Self::new(comment.origin().clone(), node.pos(), preferred, node.end_pos())
    }

    pub fn comment_start(&self) -> Option<TextSize> {
        self.start
    }

    pub fn comment_preferred(&self) -> Option<TextSize> {
        self.preferred
    }

    pub fn comment_end(&self) -> Option<TextSize> {
        self.end
    }

    /// File offset of the start; `None` when unknown or synthetic.
    pub fn start_position(&self) -> Option<TextSize> {
        self.origin.source_pos(self.start)
    }

    pub fn preferred_position(&self) -> Option<TextSize> {
        self.origin.source_pos(self.preferred)
    }

    pub fn end_position(&self) -> Option<TextSize> {
        self.origin.source_pos(self.end)
    }

    /// File range from start to end, when both are known and ordered.
    pub fn file_range(&self) -> Option<TextRange> {
        let start = self.start_position()?;
        let end = self.end_position()?;
        (start <= end).then(|| TextRange::new(start, end))
    }
}

impl DocComment {
    /// `diagnosticPosition(node, comment)`: file positions of a node of this
    /// comment, computed lazily.
    pub fn diagnostic_position<'a>(&self, node: impl Into<NodeRef<'a>>) -> DiagnosticPosition {
        DiagnosticPosition::for_node(self, node)
    }
}
