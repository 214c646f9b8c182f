//! Node variants of a doc comment tree
//!
//! Every node records the comment-relative offset of the first character that
//! belongs to it and nothing to its children. Nodes are built through
//! [`DocTreeMaker`](crate::maker::DocTreeMaker) and are immutable afterwards,
//! except that tags which know where they end may have that end stamped once
//! by the parser.
//!
//! Description-like fields are plain `Vec`s; "no description" is an empty
//! sequence, never a missing one.

use text_size::TextSize;

use crate::diagnostics::Diagnostic;
use crate::position::CommentOrigin;
use crate::reference::ReferenceParts;

use super::kind::DocKind;

/// Shared surface of every node struct.
pub trait Node {
    fn kind(&self) -> DocKind;

    /// Comment-relative start, `None` when unknown.
    fn pos(&self) -> Option<TextSize>;

    /// End offset stamped by the parser, if this node supports one and it
    /// was set.
    fn explicit_end_pos(&self) -> Option<TextSize> {
        None
    }
}

// The closure arm must come first: `|node| node.kind` also parses as an expr.
macro_rules! impl_node {
    ($ty:ident, |$node:ident| $kind:expr) => {
        impl Node for $ty {
            fn kind(&self) -> DocKind {
                let $node = self;
                $kind
            }

            fn pos(&self) -> Option<TextSize> {
                self.pos
            }
        }
    };
    ($ty:ident, $kind:expr) => {
        impl Node for $ty {
            fn kind(&self) -> DocKind {
                $kind
            }

            fn pos(&self) -> Option<TextSize> {
                self.pos
            }
        }
    };
}

/// Same as `impl_node!`, for variants that may carry an explicit end.
macro_rules! impl_end_pos_node {
    ($ty:ident, $($kind:tt)+) => {
        impl Node for $ty {
            fn kind(&self) -> DocKind {
                impl_end_pos_node!(@kind self, $($kind)+)
            }

            fn pos(&self) -> Option<TextSize> {
                self.pos
            }

            fn explicit_end_pos(&self) -> Option<TextSize> {
                self.end_pos
            }
        }

        impl $ty {
            /// Records where the node ends, e.g. just past a closing `}`.
            pub fn set_end_pos(&mut self, end: TextSize) {
                self.end_pos = Some(end);
            }

            pub fn with_end_pos(mut self, end: TextSize) -> Self {
                self.end_pos = Some(end);
                self
            }
        }
    };
    (@kind $self:ident, |$node:ident| $kind:expr) => {{
        let $node = $self;
        $kind
    }};
    (@kind $self:ident, $kind:expr) => {
        $kind
    };
}

// ============================================================================
// Leaves
// ============================================================================

/// Plain text between markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pos: Option<TextSize>,
    body: String,
}

impl Text {
    pub(crate) fn new(pos: Option<TextSize>, body: impl Into<String>) -> Self {
        Self {
            pos,
            body: body.into(),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl_node!(Text, DocKind::Text);

/// Raw Markdown source, kept uninterpreted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markdown {
    pos: Option<TextSize>,
    content: String,
}

impl Markdown {
    pub(crate) fn new(pos: Option<TextSize>, content: impl Into<String>) -> Self {
        Self {
            pos,
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl_node!(Markdown, DocKind::Markdown);

/// `&name;`, `&#NN;` or `&#xHH;`; `name` excludes the delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pos: Option<TextSize>,
    name: String,
}

impl Entity {
    pub(crate) fn new(pos: Option<TextSize>, name: impl Into<String>) -> Self {
        Self {
            pos,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl_node!(Entity, DocKind::Entity);

/// An HTML comment, including `<!--` and `-->`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pos: Option<TextSize>,
    body: String,
}

impl Comment {
    pub(crate) fn new(pos: Option<TextSize>, body: impl Into<String>) -> Self {
        Self {
            pos,
            body: body.into(),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl_node!(Comment, DocKind::Comment);

/// `<!DOCTYPE ...>`; `text` is what sits between `<!` and `>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocType {
    pos: Option<TextSize>,
    text: String,
}

impl DocType {
    pub(crate) fn new(pos: Option<TextSize>, text: impl Into<String>) -> Self {
        Self {
            pos,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl_node!(DocType, DocKind::DocType);

/// Text that could not be parsed, with the reason why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Erroneous {
    pos: Option<TextSize>,
    body: String,
    diagnostic: Diagnostic,
    pref_pos: Option<TextSize>,
}

impl Erroneous {
    pub(crate) fn new(
        pos: Option<TextSize>,
        body: impl Into<String>,
        diagnostic: Diagnostic,
        pref_pos: Option<TextSize>,
    ) -> Self {
        Self {
            pos,
            body: body.into(),
            diagnostic,
            pref_pos,
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// Where a caret should point; falls back to the start.
    pub fn pref_pos(&self) -> Option<TextSize> {
        self.pref_pos.or(self.pos)
    }
}

impl_node!(Erroneous, DocKind::Erroneous);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pos: Option<TextSize>,
    name: String,
}

impl Identifier {
    pub(crate) fn new(pos: Option<TextSize>, name: impl Into<String>) -> Self {
        Self {
            pos,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl_node!(Identifier, DocKind::Identifier);

/// A program element reference such as `List#add(int, E)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    signature: String,
    parts: ReferenceParts,
}

impl Reference {
    pub(crate) fn new(
        pos: Option<TextSize>,
        signature: impl Into<String>,
        parts: ReferenceParts,
    ) -> Self {
        Self {
            pos,
            end_pos: None,
            signature: signature.into(),
            parts,
        }
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Parsed components, for name resolution.
    #[doc(hidden)]
    pub fn parts(&self) -> &ReferenceParts {
        &self.parts
    }
}

impl_end_pos_node!(Reference, DocKind::Reference);

// ============================================================================
// HTML
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartElement {
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    name: String,
    attrs: Vec<Attribute>,
    self_closing: bool,
}

impl StartElement {
    pub(crate) fn new(
        pos: Option<TextSize>,
        name: impl Into<String>,
        attrs: Vec<Attribute>,
        self_closing: bool,
    ) -> Self {
        Self {
            pos,
            end_pos: None,
            name: name.into(),
            attrs,
            self_closing,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attrs
    }

    pub fn is_self_closing(&self) -> bool {
        self.self_closing
    }
}

impl_end_pos_node!(StartElement, DocKind::StartElement);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndElement {
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    name: String,
}

impl EndElement {
    pub(crate) fn new(pos: Option<TextSize>, name: impl Into<String>) -> Self {
        Self {
            pos,
            end_pos: None,
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl_end_pos_node!(EndElement, DocKind::EndElement);

/// How an attribute value was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `name`
    Empty,
    /// `name=value`
    Unquoted,
    /// `name='value'`
    Single,
    /// `name="value"`
    Double,
}

impl ValueKind {
    pub fn is_quoted(self) -> bool {
        matches!(self, ValueKind::Single | ValueKind::Double)
    }

    pub fn quote(self) -> Option<char> {
        match self {
            ValueKind::Single => Some('\''),
            ValueKind::Double => Some('"'),
            ValueKind::Empty | ValueKind::Unquoted => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pos: Option<TextSize>,
    name: String,
    value_kind: ValueKind,
    value: Vec<DocNode>,
}

impl Attribute {
    pub(crate) fn new(
        pos: Option<TextSize>,
        name: impl Into<String>,
        value_kind: ValueKind,
        value: Vec<DocNode>,
    ) -> Self {
        Self {
            pos,
            name: name.into(),
            value_kind,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_kind(&self) -> ValueKind {
        self.value_kind
    }

    /// Empty for [`ValueKind::Empty`].
    pub fn value(&self) -> &[DocNode] {
        &self.value
    }
}

impl_node!(Attribute, DocKind::Attribute);

// ============================================================================
// Inline tags
// ============================================================================

/// `{@code ...}` or `{@literal ...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    kind: DocKind,
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    body: Text,
}

impl Literal {
    /// # Panics
    ///
    /// If `kind` is neither [`DocKind::Code`] nor [`DocKind::Literal`].
    pub(crate) fn new(kind: DocKind, pos: Option<TextSize>, body: Text) -> Self {
        assert!(
            matches!(kind, DocKind::Code | DocKind::Literal),
            "expected CODE or LITERAL, got {kind}"
        );
        Self {
            kind,
            pos,
            end_pos: None,
            body,
        }
    }

    pub fn body(&self) -> &Text {
        &self.body
    }
}

impl_end_pos_node!(Literal, |node| node.kind);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocRoot {
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
}

impl DocRoot {
    pub(crate) fn new(pos: Option<TextSize>) -> Self {
        Self { pos, end_pos: None }
    }
}

impl_end_pos_node!(DocRoot, DocKind::DocRoot);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InheritDoc {
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    supertype: Option<Reference>,
}

impl InheritDoc {
    pub(crate) fn new(pos: Option<TextSize>, supertype: Option<Reference>) -> Self {
        Self {
            pos,
            end_pos: None,
            supertype,
        }
    }

    pub fn supertype(&self) -> Option<&Reference> {
        self.supertype.as_ref()
    }
}

impl_end_pos_node!(InheritDoc, DocKind::InheritDoc);

/// `{@index term description}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    term: Box<DocNode>,
    description: Vec<DocNode>,
}

impl Index {
    pub(crate) fn new(pos: Option<TextSize>, term: DocNode, description: Vec<DocNode>) -> Self {
        Self {
            pos,
            end_pos: None,
            term: Box::new(term),
            description,
        }
    }

    pub fn term(&self) -> &DocNode {
        &self.term
    }

    pub fn description(&self) -> &[DocNode] {
        &self.description
    }
}

impl_end_pos_node!(Index, DocKind::Index);

/// `{@link ...}` or `{@linkplain ...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    kind: DocKind,
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    reference: Reference,
    label: Vec<DocNode>,
}

impl Link {
    /// # Panics
    ///
    /// If `kind` is neither [`DocKind::Link`] nor [`DocKind::LinkPlain`].
    pub(crate) fn new(
        kind: DocKind,
        pos: Option<TextSize>,
        reference: Reference,
        label: Vec<DocNode>,
    ) -> Self {
        assert!(
            matches!(kind, DocKind::Link | DocKind::LinkPlain),
            "expected LINK or LINK_PLAIN, got {kind}"
        );
        Self {
            kind,
            pos,
            end_pos: None,
            reference,
            label,
        }
    }

    pub fn reference(&self) -> &Reference {
        &self.reference
    }

    pub fn label(&self) -> &[DocNode] {
        &self.label
    }
}

impl_end_pos_node!(Link, |node| node.kind);

/// `{@value}`, `{@value Ref}` or `{@value %fmt Ref}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Value {
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    format: Option<Text>,
    reference: Option<Reference>,
}

impl Value {
    pub(crate) fn new(
        pos: Option<TextSize>,
        format: Option<Text>,
        reference: Option<Reference>,
    ) -> Self {
        Self {
            pos,
            end_pos: None,
            format,
            reference,
        }
    }

    pub fn format(&self) -> Option<&Text> {
        self.format.as_ref()
    }

    pub fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }
}

impl_end_pos_node!(Value, DocKind::Value);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    summary: Vec<DocNode>,
}

impl Summary {
    pub(crate) fn new(pos: Option<TextSize>, summary: Vec<DocNode>) -> Self {
        Self {
            pos,
            end_pos: None,
            summary,
        }
    }

    pub fn summary(&self) -> &[DocNode] {
        &self.summary
    }
}

impl_end_pos_node!(Summary, DocKind::Summary);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemProperty {
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    property_name: String,
}

impl SystemProperty {
    pub(crate) fn new(pos: Option<TextSize>, property_name: impl Into<String>) -> Self {
        Self {
            pos,
            end_pos: None,
            property_name: property_name.into(),
        }
    }

    pub fn property_name(&self) -> &str {
        &self.property_name
    }
}

impl_end_pos_node!(SystemProperty, DocKind::SystemProperty);

/// `@return ...` or `{@return ...}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Return {
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    inline: bool,
    description: Vec<DocNode>,
}

impl Return {
    pub(crate) fn new(pos: Option<TextSize>, inline: bool, description: Vec<DocNode>) -> Self {
        Self {
            pos,
            end_pos: None,
            inline,
            description,
        }
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    pub fn description(&self) -> &[DocNode] {
        &self.description
    }
}

impl_end_pos_node!(Return, DocKind::Return);

/// `{@snippet attrs : body}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    attributes: Vec<Attribute>,
    body: Option<Text>,
}

impl Snippet {
    pub(crate) fn new(pos: Option<TextSize>, attributes: Vec<Attribute>, body: Option<Text>) -> Self {
        Self {
            pos,
            end_pos: None,
            attributes,
            body,
        }
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn body(&self) -> Option<&Text> {
        self.body.as_ref()
    }
}

impl_end_pos_node!(Snippet, DocKind::Snippet);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownInlineTag {
    pos: Option<TextSize>,
    end_pos: Option<TextSize>,
    tag_name: String,
    content: Vec<DocNode>,
}

impl UnknownInlineTag {
    pub(crate) fn new(
        pos: Option<TextSize>,
        tag_name: impl Into<String>,
        content: Vec<DocNode>,
    ) -> Self {
        Self {
            pos,
            end_pos: None,
            tag_name: tag_name.into(),
            content,
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn content(&self) -> &[DocNode] {
        &self.content
    }
}

impl_end_pos_node!(UnknownInlineTag, DocKind::UnknownInlineTag);

// ============================================================================
// Block tags
// ============================================================================

/// Block tags that are just a name followed by a description.
macro_rules! description_tag {
    ($(#[$meta:meta])* $ty:ident, $kind:expr, $field:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $ty {
            pos: Option<TextSize>,
            $field: Vec<DocNode>,
        }

        impl $ty {
            pub(crate) fn new(pos: Option<TextSize>, $field: Vec<DocNode>) -> Self {
                Self { pos, $field }
            }

            pub fn $field(&self) -> &[DocNode] {
                &self.$field
            }
        }

        impl_node!($ty, $kind);
    };
}

description_tag!(
    /// `@author name`
    Author, DocKind::Author, name
);
description_tag!(Deprecated, DocKind::Deprecated, body);
description_tag!(Hidden, DocKind::Hidden, body);
description_tag!(Serial, DocKind::Serial, description);
description_tag!(SerialData, DocKind::SerialData, description);
description_tag!(Since, DocKind::Since, body);
description_tag!(Version, DocKind::Version, body);
description_tag!(
    /// `@see "string"`, `@see <a ...>` or `@see Ref label`
    See, DocKind::See, reference
);

/// `@param name description` or `@param <T> description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pos: Option<TextSize>,
    is_type_parameter: bool,
    name: Identifier,
    description: Vec<DocNode>,
}

impl Param {
    pub(crate) fn new(
        pos: Option<TextSize>,
        is_type_parameter: bool,
        name: Identifier,
        description: Vec<DocNode>,
    ) -> Self {
        Self {
            pos,
            is_type_parameter,
            name,
            description,
        }
    }

    pub fn is_type_parameter(&self) -> bool {
        self.is_type_parameter
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn description(&self) -> &[DocNode] {
        &self.description
    }
}

impl_node!(Param, DocKind::Param);

/// Shape shared by `@provides` and `@uses`.
macro_rules! service_tag {
    ($ty:ident, $kind:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $ty {
            pos: Option<TextSize>,
            service_type: Reference,
            description: Vec<DocNode>,
        }

        impl $ty {
            pub(crate) fn new(
                pos: Option<TextSize>,
                service_type: Reference,
                description: Vec<DocNode>,
            ) -> Self {
                Self {
                    pos,
                    service_type,
                    description,
                }
            }

            pub fn service_type(&self) -> &Reference {
                &self.service_type
            }

            pub fn description(&self) -> &[DocNode] {
                &self.description
            }
        }

        impl_node!($ty, $kind);
    };
}

service_tag!(Provides, DocKind::Provides);
service_tag!(Uses, DocKind::Uses);

/// `@serialField name type description`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialField {
    pos: Option<TextSize>,
    name: Identifier,
    field_type: Reference,
    description: Vec<DocNode>,
}

impl SerialField {
    pub(crate) fn new(
        pos: Option<TextSize>,
        name: Identifier,
        field_type: Reference,
        description: Vec<DocNode>,
    ) -> Self {
        Self {
            pos,
            name,
            field_type,
            description,
        }
    }

    pub fn name(&self) -> &Identifier {
        &self.name
    }

    pub fn field_type(&self) -> &Reference {
        &self.field_type
    }

    pub fn description(&self) -> &[DocNode] {
        &self.description
    }
}

impl_node!(SerialField, DocKind::SerialField);

/// `@spec url title`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spec {
    pos: Option<TextSize>,
    url: Text,
    title: Vec<DocNode>,
}

impl Spec {
    pub(crate) fn new(pos: Option<TextSize>, url: Text, title: Vec<DocNode>) -> Self {
        Self { pos, url, title }
    }

    pub fn url(&self) -> &Text {
        &self.url
    }

    pub fn title(&self) -> &[DocNode] {
        &self.title
    }
}

impl_node!(Spec, DocKind::Spec);

/// `@throws` or `@exception`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Throws {
    kind: DocKind,
    pos: Option<TextSize>,
    name: Reference,
    description: Vec<DocNode>,
}

impl Throws {
    /// # Panics
    ///
    /// If `kind` is neither [`DocKind::Throws`] nor [`DocKind::Exception`].
    pub(crate) fn new(
        kind: DocKind,
        pos: Option<TextSize>,
        name: Reference,
        description: Vec<DocNode>,
    ) -> Self {
        assert!(
            matches!(kind, DocKind::Throws | DocKind::Exception),
            "expected THROWS or EXCEPTION, got {kind}"
        );
        Self {
            kind,
            pos,
            name,
            description,
        }
    }

    pub fn exception_name(&self) -> &Reference {
        &self.name
    }

    pub fn description(&self) -> &[DocNode] {
        &self.description
    }
}

impl_node!(Throws, |node| node.kind);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBlockTag {
    pos: Option<TextSize>,
    tag_name: String,
    content: Vec<DocNode>,
}

impl UnknownBlockTag {
    pub(crate) fn new(
        pos: Option<TextSize>,
        tag_name: impl Into<String>,
        content: Vec<DocNode>,
    ) -> Self {
        Self {
            pos,
            tag_name: tag_name.into(),
            content,
        }
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn content(&self) -> &[DocNode] {
        &self.content
    }
}

impl_node!(UnknownBlockTag, DocKind::UnknownBlockTag);

// ============================================================================
// Root
// ============================================================================

/// One parsed (or synthesized) doc comment.
///
/// `first_sentence` followed by `body` reproduces `full_body`, except for
/// whitespace trimmed where a text node was split in two. `tags`, `preamble`
/// and `postamble` are supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    origin: CommentOrigin,
    pos: Option<TextSize>,
    full_body: Vec<DocNode>,
    first_sentence: Vec<DocNode>,
    body: Vec<DocNode>,
    tags: Vec<DocNode>,
    preamble: Vec<DocNode>,
    postamble: Vec<DocNode>,
}

/// The pieces a [`DocComment`] is assembled from.
#[derive(Debug, Default)]
pub(crate) struct DocCommentParts {
    pub full_body: Vec<DocNode>,
    pub first_sentence: Vec<DocNode>,
    pub body: Vec<DocNode>,
    pub tags: Vec<DocNode>,
    pub preamble: Vec<DocNode>,
    pub postamble: Vec<DocNode>,
}

impl DocComment {
    pub(crate) fn new(origin: CommentOrigin, pos: Option<TextSize>, parts: DocCommentParts) -> Self {
        Self {
            origin,
            pos,
            full_body: parts.full_body,
            first_sentence: parts.first_sentence,
            body: parts.body,
            tags: parts.tags,
            preamble: parts.preamble,
            postamble: parts.postamble,
        }
    }

    pub fn origin(&self) -> &CommentOrigin {
        &self.origin
    }

    /// Maps a comment-relative offset to a file offset. Always `None` for
    /// synthetic comments.
    pub fn source_pos(&self, offset: Option<TextSize>) -> Option<TextSize> {
        self.origin.source_pos(offset)
    }

    pub fn full_body(&self) -> &[DocNode] {
        &self.full_body
    }

    pub fn first_sentence(&self) -> &[DocNode] {
        &self.first_sentence
    }

    pub fn body(&self) -> &[DocNode] {
        &self.body
    }

    pub fn block_tags(&self) -> &[DocNode] {
        &self.tags
    }

    pub fn preamble(&self) -> &[DocNode] {
        &self.preamble
    }

    pub fn postamble(&self) -> &[DocNode] {
        &self.postamble
    }
}

impl_node!(DocComment, DocKind::DocComment);

// ============================================================================
// Sum types
// ============================================================================

macro_rules! node_enums {
    ($($variant:ident),* $(,)?) => {
        /// Any node that can appear below the root.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum DocNode {
            $($variant($variant),)*
        }

        /// Borrowed view of any node, the root included.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum NodeRef<'a> {
            $($variant(&'a $variant),)*
            DocComment(&'a DocComment),
        }

        impl DocNode {
            pub fn as_node_ref(&self) -> NodeRef<'_> {
                match self {
                    $(DocNode::$variant(node) => NodeRef::$variant(node),)*
                }
            }

            fn as_dyn(&self) -> &dyn Node {
                match self {
                    $(DocNode::$variant(node) => node,)*
                }
            }
        }

        impl<'a> NodeRef<'a> {
            fn as_dyn(self) -> &'a dyn Node {
                match self {
                    $(NodeRef::$variant(node) => node,)*
                    NodeRef::DocComment(node) => node,
                }
            }
        }

        $(
            impl From<$variant> for DocNode {
                fn from(node: $variant) -> Self {
                    DocNode::$variant(node)
                }
            }

            impl<'a> From<&'a $variant> for NodeRef<'a> {
                fn from(node: &'a $variant) -> Self {
                    NodeRef::$variant(node)
                }
            }
        )*
    };
}

node_enums!(
    Text,
    Markdown,
    Entity,
    Comment,
    DocType,
    Erroneous,
    Identifier,
    Reference,
    StartElement,
    EndElement,
    Attribute,
    Literal,
    DocRoot,
    InheritDoc,
    Index,
    Link,
    Value,
    Summary,
    SystemProperty,
    Return,
    Snippet,
    UnknownInlineTag,
    Author,
    Deprecated,
    Hidden,
    Param,
    Provides,
    See,
    Serial,
    SerialData,
    SerialField,
    Since,
    Spec,
    Throws,
    Uses,
    Version,
    UnknownBlockTag,
);

impl<'a> From<&'a DocComment> for NodeRef<'a> {
    fn from(node: &'a DocComment) -> Self {
        NodeRef::DocComment(node)
    }
}

impl<'a> From<&'a DocNode> for NodeRef<'a> {
    fn from(node: &'a DocNode) -> Self {
        node.as_node_ref()
    }
}

impl DocNode {
    pub fn kind(&self) -> DocKind {
        self.as_dyn().kind()
    }

    pub fn pos(&self) -> Option<TextSize> {
        self.as_dyn().pos()
    }

    pub fn explicit_end_pos(&self) -> Option<TextSize> {
        self.as_dyn().explicit_end_pos()
    }

    /// The text of a TEXT or MARKDOWN node.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            DocNode::Text(text) => Some(text.body()),
            DocNode::Markdown(markdown) => Some(markdown.content()),
            _ => None,
        }
    }
}

impl<'a> NodeRef<'a> {
    pub fn kind(self) -> DocKind {
        self.as_dyn().kind()
    }

    pub fn pos(self) -> Option<TextSize> {
        self.as_dyn().pos()
    }

    pub fn explicit_end_pos(self) -> Option<TextSize> {
        self.as_dyn().explicit_end_pos()
    }
}
