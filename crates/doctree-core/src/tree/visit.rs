//! Child order
//!
//! This is the single definition of which nodes are children of which, and
//! in what order. End positions, printing and tree walks all go through it.

use super::nodes::{DocNode, NodeRef};

fn push_all<'a>(out: &mut Vec<NodeRef<'a>>, nodes: &'a [DocNode]) {
    out.extend(nodes.iter().map(DocNode::as_node_ref));
}

impl<'a> NodeRef<'a> {
    /// Direct children in source order.
    pub fn children(self) -> Vec<NodeRef<'a>> {
        let mut out = Vec::new();
        match self {
            NodeRef::Text(_)
            | NodeRef::Markdown(_)
            | NodeRef::Entity(_)
            | NodeRef::Comment(_)
            | NodeRef::DocType(_)
            | NodeRef::Erroneous(_)
            | NodeRef::Identifier(_)
            | NodeRef::Reference(_)
            | NodeRef::EndElement(_)
            | NodeRef::DocRoot(_)
            | NodeRef::SystemProperty(_) => {}
            NodeRef::StartElement(node) => {
                out.extend(node.attributes().iter().map(NodeRef::Attribute));
            }
            NodeRef::Attribute(node) => push_all(&mut out, node.value()),
            NodeRef::Literal(node) => out.push(NodeRef::Text(node.body())),
            NodeRef::InheritDoc(node) => out.extend(node.supertype().map(NodeRef::Reference)),
            NodeRef::Index(node) => {
                out.push(node.term().as_node_ref());
                push_all(&mut out, node.description());
            }
            NodeRef::Link(node) => {
                out.push(NodeRef::Reference(node.reference()));
                push_all(&mut out, node.label());
            }
            NodeRef::Value(node) => {
                out.extend(node.format().map(NodeRef::Text));
                out.extend(node.reference().map(NodeRef::Reference));
            }
            NodeRef::Summary(node) => push_all(&mut out, node.summary()),
            NodeRef::Return(node) => push_all(&mut out, node.description()),
            NodeRef::Snippet(node) => {
                out.extend(node.attributes().iter().map(NodeRef::Attribute));
                out.extend(node.body().map(NodeRef::Text));
            }
            NodeRef::UnknownInlineTag(node) => push_all(&mut out, node.content()),
            NodeRef::Author(node) => push_all(&mut out, node.name()),
            NodeRef::Deprecated(node) => push_all(&mut out, node.body()),
            NodeRef::Hidden(node) => push_all(&mut out, node.body()),
            NodeRef::Param(node) => {
                out.push(NodeRef::Identifier(node.name()));
                push_all(&mut out, node.description());
            }
            NodeRef::Provides(node) => {
                out.push(NodeRef::Reference(node.service_type()));
                push_all(&mut out, node.description());
            }
            NodeRef::Uses(node) => {
                out.push(NodeRef::Reference(node.service_type()));
                push_all(&mut out, node.description());
            }
            NodeRef::See(node) => push_all(&mut out, node.reference()),
            NodeRef::Serial(node) => push_all(&mut out, node.description()),
            NodeRef::SerialData(node) => push_all(&mut out, node.description()),
            NodeRef::SerialField(node) => {
                out.push(NodeRef::Identifier(node.name()));
                out.push(NodeRef::Reference(node.field_type()));
                push_all(&mut out, node.description());
            }
            NodeRef::Since(node) => push_all(&mut out, node.body()),
            NodeRef::Spec(node) => {
                out.push(NodeRef::Text(node.url()));
                push_all(&mut out, node.title());
            }
            NodeRef::Throws(node) => {
                out.push(NodeRef::Reference(node.exception_name()));
                push_all(&mut out, node.description());
            }
            NodeRef::Version(node) => push_all(&mut out, node.body()),
            NodeRef::UnknownBlockTag(node) => push_all(&mut out, node.content()),
            NodeRef::DocComment(node) => {
                push_all(&mut out, node.preamble());
                push_all(&mut out, node.full_body());
                push_all(&mut out, node.block_tags());
                push_all(&mut out, node.postamble());
            }
        }
        out
    }

    /// The last direct child, in the order defined by [`NodeRef::children`].
    pub fn last_child(self) -> Option<NodeRef<'a>> {
        self.children().pop()
    }

    /// Pre-order walk over this node and everything below it.
    pub fn descendants(self) -> Descendants<'a> {
        Descendants { stack: vec![self] }
    }
}

/// Iterator returned by [`NodeRef::descendants`].
pub struct Descendants<'a> {
    stack: Vec<NodeRef<'a>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}
