//! Rendering trees back to text
//!
//! [`to_pretty_string`] approximates the original markup. It is not a
//! round-trip: whitespace between tag parts is normalised to one space.
//! [`to_tree_string`] is an indented dump with kinds and ranges, and
//! [`to_json`] is the machine-readable equivalent.

use std::fmt::Write;

use serde_json::{Map, Value as Json, json};

use super::nodes::{DocNode, NodeRef, ValueKind};

/// Renders a node as doc comment markup.
pub fn to_pretty_string<'a>(node: impl Into<NodeRef<'a>>) -> String {
    let mut printer = MarkupPrinter::default();
    printer.node(node.into());
    printer.out
}

/// Renders a sequence of sibling nodes as doc comment markup.
pub fn nodes_to_pretty_string(nodes: &[DocNode]) -> String {
    let mut printer = MarkupPrinter::default();
    printer.nodes(nodes);
    printer.out
}

#[derive(Default)]
struct MarkupPrinter {
    out: String,
}

impl MarkupPrinter {
    fn nodes(&mut self, nodes: &[DocNode]) {
        for node in nodes {
            self.node(node.as_node_ref());
        }
    }

    /// A space, then the nodes, unless there are none.
    fn spaced(&mut self, nodes: &[DocNode]) {
        if !nodes.is_empty() {
            self.out.push(' ');
            self.nodes(nodes);
        }
    }

    fn inline(&mut self, name: &str, body: impl FnOnce(&mut Self)) {
        self.out.push_str("{@");
        self.out.push_str(name);
        body(self);
        self.out.push('}');
    }

    fn block(&mut self, name: &str) {
        self.out.push('@');
        self.out.push_str(name);
    }

    fn attribute(&mut self, attr: &super::nodes::Attribute) {
        self.out.push(' ');
        self.out.push_str(attr.name());
        match attr.value_kind() {
            ValueKind::Empty => {}
            ValueKind::Unquoted => {
                self.out.push('=');
                self.nodes(attr.value());
            }
            kind @ (ValueKind::Single | ValueKind::Double) => {
                let quote = if kind == ValueKind::Single { '\'' } else { '"' };
                self.out.push('=');
                self.out.push(quote);
                self.nodes(attr.value());
                self.out.push(quote);
            }
        }
    }

    fn node(&mut self, node: NodeRef<'_>) {
        let name = node.kind().tag_name().unwrap_or_default();
        match node {
            NodeRef::Text(n) => self.out.push_str(n.body()),
            NodeRef::Markdown(n) => self.out.push_str(n.content()),
            NodeRef::Entity(n) => {
                let _ = write!(self.out, "&{};", n.name());
            }
            NodeRef::Comment(n) => self.out.push_str(n.body()),
            NodeRef::DocType(n) => {
                let _ = write!(self.out, "<!{}>", n.text());
            }
            NodeRef::Erroneous(n) => self.out.push_str(n.body()),
            NodeRef::Identifier(n) => self.out.push_str(n.name()),
            NodeRef::Reference(n) => self.out.push_str(n.signature()),
            NodeRef::StartElement(n) => {
                self.out.push('<');
                self.out.push_str(n.name());
                for attr in n.attributes() {
                    self.attribute(attr);
                }
                self.out.push_str(if n.is_self_closing() { "/>" } else { ">" });
            }
            NodeRef::EndElement(n) => {
                let _ = write!(self.out, "</{}>", n.name());
            }
            NodeRef::Attribute(n) => self.attribute(n),
            NodeRef::Literal(n) => self.inline(name, |p| {
                p.out.push(' ');
                p.out.push_str(n.body().body());
            }),
            NodeRef::DocRoot(_) => self.inline(name, |_| {}),
            NodeRef::InheritDoc(n) => self.inline(name, |p| {
                if let Some(supertype) = n.supertype() {
                    p.out.push(' ');
                    p.out.push_str(supertype.signature());
                }
            }),
            NodeRef::Index(n) => self.inline(name, |p| {
                p.out.push(' ');
                p.node(n.term().as_node_ref());
                p.spaced(n.description());
            }),
            NodeRef::Link(n) => self.inline(name, |p| {
                p.out.push(' ');
                p.out.push_str(n.reference().signature());
                p.spaced(n.label());
            }),
            NodeRef::Value(n) => self.inline(name, |p| {
                if let Some(format) = n.format() {
                    p.out.push(' ');
                    p.out.push_str(format.body());
                }
                if let Some(reference) = n.reference() {
                    p.out.push(' ');
                    p.out.push_str(reference.signature());
                }
            }),
            NodeRef::Summary(n) => self.inline(name, |p| p.spaced(n.summary())),
            NodeRef::SystemProperty(n) => self.inline(name, |p| {
                p.out.push(' ');
                p.out.push_str(n.property_name());
            }),
            NodeRef::Return(n) if n.is_inline() => self.inline(name, |p| p.spaced(n.description())),
            NodeRef::Return(n) => {
                self.block(name);
                self.spaced(n.description());
            }
            NodeRef::Snippet(n) => self.inline(name, |p| {
                for attr in n.attributes() {
                    p.attribute(attr);
                }
                if let Some(body) = n.body() {
                    p.out.push_str(" :\n");
                    p.out.push_str(body.body());
                }
            }),
            NodeRef::UnknownInlineTag(n) => self.inline(n.tag_name(), |p| p.spaced(n.content())),
            NodeRef::Author(n) => {
                self.block(name);
                self.spaced(n.name());
            }
            NodeRef::Deprecated(n) => {
                self.block(name);
                self.spaced(n.body());
            }
            NodeRef::Hidden(n) => {
                self.block(name);
                self.spaced(n.body());
            }
            NodeRef::Param(n) => {
                self.block(name);
                if n.is_type_parameter() {
                    let _ = write!(self.out, " <{}>", n.name().name());
                } else {
                    let _ = write!(self.out, " {}", n.name().name());
                }
                self.spaced(n.description());
            }
            NodeRef::Provides(n) => {
                self.block(name);
                let _ = write!(self.out, " {}", n.service_type().signature());
                self.spaced(n.description());
            }
            NodeRef::Uses(n) => {
                self.block(name);
                let _ = write!(self.out, " {}", n.service_type().signature());
                self.spaced(n.description());
            }
            NodeRef::See(n) => {
                self.block(name);
                self.spaced(n.reference());
            }
            NodeRef::Serial(n) => {
                self.block(name);
                self.spaced(n.description());
            }
            NodeRef::SerialData(n) => {
                self.block(name);
                self.spaced(n.description());
            }
            NodeRef::SerialField(n) => {
                self.block(name);
                let _ = write!(
                    self.out,
                    " {} {}",
                    n.name().name(),
                    n.field_type().signature()
                );
                self.spaced(n.description());
            }
            NodeRef::Since(n) => {
                self.block(name);
                self.spaced(n.body());
            }
            NodeRef::Spec(n) => {
                self.block(name);
                let _ = write!(self.out, " {}", n.url().body());
                self.spaced(n.title());
            }
            NodeRef::Throws(n) => {
                self.block(name);
                let _ = write!(self.out, " {}", n.exception_name().signature());
                self.spaced(n.description());
            }
            NodeRef::Version(n) => {
                self.block(name);
                self.spaced(n.body());
            }
            NodeRef::UnknownBlockTag(n) => {
                self.block(n.tag_name());
                self.spaced(n.content());
            }
            NodeRef::DocComment(n) => {
                self.nodes(n.preamble());
                self.nodes(n.full_body());
                for tag in n.block_tags() {
                    if !self.out.is_empty() && !self.out.ends_with('\n') {
                        self.out.push('\n');
                    }
                    self.node(tag.as_node_ref());
                }
                self.nodes(n.postamble());
            }
        }
    }
}

/// The text a node carries itself, not through children.
fn own_text(node: NodeRef<'_>) -> Option<&str> {
    match node {
        NodeRef::Text(n) => Some(n.body()),
        NodeRef::Markdown(n) => Some(n.content()),
        NodeRef::Entity(n) => Some(n.name()),
        NodeRef::Comment(n) => Some(n.body()),
        NodeRef::DocType(n) => Some(n.text()),
        NodeRef::Erroneous(n) => Some(n.body()),
        NodeRef::Identifier(n) => Some(n.name()),
        NodeRef::Reference(n) => Some(n.signature()),
        NodeRef::StartElement(n) => Some(n.name()),
        NodeRef::EndElement(n) => Some(n.name()),
        NodeRef::Attribute(n) => Some(n.name()),
        NodeRef::SystemProperty(n) => Some(n.property_name()),
        NodeRef::UnknownInlineTag(n) => Some(n.tag_name()),
        NodeRef::UnknownBlockTag(n) => Some(n.tag_name()),
        _ => None,
    }
}

fn range(node: NodeRef<'_>) -> String {
    let show = |offset: Option<text_size::TextSize>| {
        offset.map_or_else(|| "?".to_string(), |o| u32::from(o).to_string())
    };
    format!("{}..{}", show(node.pos()), show(node.end_pos()))
}

/// Indented dump: one line per node with kind, range and own text.
pub fn to_tree_string<'a>(node: impl Into<NodeRef<'a>>) -> String {
    let mut out = String::new();
    dump(&mut out, node.into(), 0);
    out
}

fn dump(out: &mut String, node: NodeRef<'_>, depth: usize) {
    let _ = write!(out, "{:indent$}{} {}", "", node.kind(), range(node), indent = depth * 2);
    if let Some(text) = own_text(node) {
        let _ = write!(out, " {text:?}");
    }
    out.push('\n');

    if let NodeRef::DocComment(comment) = node {
        let sections: [(&str, &[DocNode]); 5] = [
            ("preamble", comment.preamble()),
            ("firstSentence", comment.first_sentence()),
            ("body", comment.body()),
            ("tags", comment.block_tags()),
            ("postamble", comment.postamble()),
        ];
        for (label, nodes) in sections {
            if nodes.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{:indent$}{label}:", "", indent = depth * 2 + 2);
            for child in nodes {
                dump(out, child.as_node_ref(), depth + 2);
            }
        }
        return;
    }

    for child in node.children() {
        dump(out, child, depth + 1);
    }
}

/// JSON form of a node: kind, pos, end, own text and children.
///
/// A doc comment lists its sections separately instead of `children`.
pub fn to_json<'a>(node: impl Into<NodeRef<'a>>) -> Json {
    let node = node.into();
    let mut object = Map::new();
    object.insert("kind".into(), json!(node.kind()));
    object.insert("pos".into(), json!(node.pos().map(u32::from)));
    object.insert("end".into(), json!(node.end_pos().map(u32::from)));
    if let Some(text) = own_text(node) {
        object.insert("text".into(), json!(text));
    }

    match node {
        NodeRef::DocComment(comment) => {
            let list = |nodes: &[DocNode]| Json::Array(nodes.iter().map(to_json).collect());
            object.insert("preamble".into(), list(comment.preamble()));
            object.insert("firstSentence".into(), list(comment.first_sentence()));
            object.insert("body".into(), list(comment.body()));
            object.insert("tags".into(), list(comment.block_tags()));
            object.insert("postamble".into(), list(comment.postamble()));
        }
        NodeRef::Erroneous(erroneous) => {
            object.insert("code".into(), json!(erroneous.diagnostic().code));
            object.insert("message".into(), json!(erroneous.diagnostic().message));
        }
        _ => {
            if let NodeRef::Attribute(attr) = node {
                object.insert("valueKind".into(), json!(format!("{:?}", attr.value_kind())));
            }
            let children: Vec<Json> = node.children().into_iter().map(to_json).collect();
            if !children.is_empty() {
                object.insert("children".into(), Json::Array(children));
            }
        }
    }
    Json::Object(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maker::DocTreeMaker;
    use crate::tree::nodes::ValueKind;
    use text_size::TextSize;

    #[test]
    fn prints_inline_and_block_tags() {
        let mut m = DocTreeMaker::new();
        let reference = m.at(TextSize::from(7)).new_reference_tree("List#add").unwrap();
        let label = m.at(TextSize::from(16)).new_text_tree("add it");
        let link = m.at(TextSize::from(0)).new_link_tree(reference, vec![label.into()]);
        assert_eq!(to_pretty_string(&link), "{@link List#add add it}");

        let name = m.at(TextSize::from(8)).new_identifier_tree("T");
        let param = m.at(TextSize::from(0)).new_param_tree(true, name, vec![]);
        assert_eq!(to_pretty_string(&param), "@param <T>");
    }

    #[test]
    fn prints_elements_with_attributes() {
        let mut m = DocTreeMaker::new();
        let value = m.at(TextSize::from(9)).new_text_tree("x.html");
        let href = m
            .at(TextSize::from(3))
            .new_attribute_tree("href", ValueKind::Double, vec![value.into()]);
        let open = m.at(TextSize::from(0)).new_start_element_tree("a", vec![href], false);
        assert_eq!(to_pretty_string(&open), r#"<a href="x.html">"#);
    }

    #[test]
    fn tree_dump_shows_sections() {
        let mut m = DocTreeMaker::new();
        let text = m.at(TextSize::from(0)).new_text_tree("First. Second.");
        let comment = m.at(TextSize::from(0)).new_doc_comment_tree(vec![text.into()], vec![]);
        insta::assert_snapshot!(to_tree_string(&comment), @r#"
        DOC_COMMENT 0..14
          firstSentence:
            TEXT 0..6 "First."
          body:
            TEXT 7..14 "Second."
        "#);
    }

    #[test]
    fn json_lists_comment_sections() {
        let mut m = DocTreeMaker::new();
        let text = m.at(TextSize::from(0)).new_text_tree("Only.");
        let comment = m.at(TextSize::from(0)).new_doc_comment_tree(vec![text.into()], vec![]);
        let value = to_json(&comment);
        assert_eq!(value["kind"], "DOC_COMMENT");
        assert_eq!(value["firstSentence"][0]["text"], "Only.");
        assert_eq!(value["firstSentence"][0]["end"], 5);
        assert_eq!(value["body"], json!([]));
    }
}
