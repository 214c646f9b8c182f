//! End positions
//!
//! Resolution order: an explicit end stamped by the parser, then a rule for
//! the node kind, then the end of the last child. When none applies the
//! result is `None`, which callers must read as "unknown" and never as zero.

use text_size::TextSize;

use super::nodes::{DocNode, NodeRef, ValueKind};

const ONE: TextSize = TextSize::new(1);

impl<'a> NodeRef<'a> {
    /// Comment-relative offset just past the end of this node.
    pub fn end_pos(self) -> Option<TextSize> {
        if let Some(end) = self.explicit_end_pos() {
            return Some(end);
        }

        let pos = self.pos();
        match self {
            NodeRef::Text(node) => pos.map(|p| p + TextSize::of(node.body())),
            NodeRef::Markdown(node) => pos.map(|p| p + TextSize::of(node.content())),
            NodeRef::Erroneous(node) => pos.map(|p| p + TextSize::of(node.body())),
            NodeRef::Identifier(node) => pos.map(|p| p + TextSize::of(node.name())),
            NodeRef::Comment(node) => pos.map(|p| p + TextSize::of(node.body())),
            // '&' and ';'
            NodeRef::Entity(node) => pos.map(|p| p + TextSize::of(node.name()) + TextSize::new(2)),

            NodeRef::Attribute(node) => match node.value_kind() {
                ValueKind::Empty => pos.map(|p| p + TextSize::of(node.name())),
                ValueKind::Unquoted => self.last_child_end(),
                // closing quote
                ValueKind::Single | ValueKind::Double => self.last_child_end().map(|e| e + ONE),
            },

            NodeRef::Param(node) if node.is_type_parameter() && node.description().is_empty() => {
                // closing '>' of `<T>`
                NodeRef::Identifier(node.name()).end_pos().map(|e| e + ONE)
            }

            NodeRef::Return(node) if node.is_inline() => self.last_child_end(),

            NodeRef::UnknownBlockTag(node) => self.block_tag_end(node.tag_name()),

            NodeRef::DocComment(_) => match self.last_child() {
                Some(child) => child.end_pos(),
                None => pos,
            },

            _ => match self.kind().tag_name() {
                Some(name) if self.kind().is_block_tag() => self.block_tag_end(name),
                _ => self.last_child_end(),
            },
        }
    }

    fn last_child_end(self) -> Option<TextSize> {
        self.last_child().and_then(NodeRef::end_pos)
    }

    /// Last child's end, or just past `@name` when there is nothing after it.
    fn block_tag_end(self, tag_name: &str) -> Option<TextSize> {
        match self.last_child() {
            Some(child) => child.end_pos(),
            None => self.pos().map(|p| p + TextSize::of(tag_name) + ONE),
        }
    }
}

impl DocNode {
    pub fn end_pos(&self) -> Option<TextSize> {
        self.as_node_ref().end_pos()
    }
}

/// Free-function form of [`NodeRef::end_pos`].
pub fn end_position<'a>(node: impl Into<NodeRef<'a>>) -> Option<TextSize> {
    node.into().end_pos()
}
