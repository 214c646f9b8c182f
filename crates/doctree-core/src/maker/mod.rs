//! Tree factory
//!
//! [`DocTreeMaker`] builds every node kind. It holds a current position
//! that is stamped onto each node it creates; callers move it with
//! [`DocTreeMaker::at`] before each construction. One maker belongs to one
//! parse: makers are cheap, so concurrent parses each use their own.

mod breaks;
mod markdown;
mod sentence;

pub use breaks::{BreakIterator, SimpleSentenceIterator};

use std::fmt;
use std::sync::Arc;

use text_size::TextSize;
use tracing::debug;

use crate::config::SentenceConfig;
use crate::diagnostics::Diagnostic;
use crate::position::{CommentOrigin, SourceComment};
use crate::reference::{ReferenceError, ReferenceParser, ReferenceParts, SignatureParser};
use crate::tree::nodes::DocCommentParts;
use crate::tree::{
    Attribute, Author, Comment, DocComment, DocKind, DocNode, DocRoot, DocType, Deprecated,
    EndElement, Entity, Erroneous, Hidden, Identifier, Index, InheritDoc, Link, Literal, Markdown,
    Param, Provides, Reference, Return, See, Serial, SerialData, SerialField, Since, Snippet, Spec,
    StartElement, Summary, SystemProperty, Text, Throws, UnknownBlockTag, UnknownInlineTag, Uses,
    Value, ValueKind, Version,
};

/// Builds doc comment nodes at a movable current position.
pub struct DocTreeMaker {
    pos: Option<TextSize>,
    break_iterator: Option<Box<dyn BreakIterator + Send>>,
    use_break_iterator: bool,
    reference_parser: Box<dyn ReferenceParser + Send + Sync>,
}

impl fmt::Debug for DocTreeMaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocTreeMaker")
            .field("pos", &self.pos)
            .field("has_break_iterator", &self.break_iterator.is_some())
            .field("use_break_iterator", &self.use_break_iterator)
            .finish()
    }
}

impl Default for DocTreeMaker {
    fn default() -> Self {
        Self::new()
    }
}

impl DocTreeMaker {
    /// A maker with no break iterator, so sentences end at a period followed
    /// by whitespace. The current position starts unset.
    pub fn new() -> Self {
        Self {
            pos: None,
            break_iterator: None,
            use_break_iterator: true,
            reference_parser: Box::new(SignatureParser::new()),
        }
    }

    pub fn with_config(config: &SentenceConfig) -> Self {
        Self {
            use_break_iterator: config.use_break_iterator,
            ..Self::new()
        }
    }

    /// Uses `iterator` to find sentence boundaries, unless the sentence
    /// configuration turned break iterators off.
    pub fn with_break_iterator(mut self, iterator: impl BreakIterator + Send + 'static) -> Self {
        self.break_iterator = Some(Box::new(iterator));
        self
    }

    pub fn with_reference_parser(
        mut self,
        parser: impl ReferenceParser + Send + Sync + 'static,
    ) -> Self {
        self.reference_parser = Box::new(parser);
        self
    }

    /// Moves the current position; chain a `new_*_tree` call after it.
    pub fn at(&mut self, pos: TextSize) -> &mut Self {
        self.pos = Some(pos);
        self
    }

    pub fn current_position(&self) -> Option<TextSize> {
        self.pos
    }

    pub fn set_current_position(&mut self, pos: Option<TextSize>) {
        self.pos = pos;
    }

    fn break_iterator(&mut self) -> Option<&mut (dyn BreakIterator + Send + 'static)> {
        if !self.use_break_iterator {
            return None;
        }
        self.break_iterator.as_deref_mut()
    }

    // ------------------------------------------------------------------
    // Root
    // ------------------------------------------------------------------

    /// A comment built by a tool rather than parsed; it has no file
    /// positions.
    pub fn new_doc_comment_tree(&mut self, full_body: Vec<DocNode>, tags: Vec<DocNode>) -> DocComment {
        self.new_doc_comment_tree_with(CommentOrigin::Synthetic, full_body, tags, vec![], vec![])
    }

    /// A comment parsed from `comment`.
    pub fn new_doc_comment_tree_for(
        &mut self,
        comment: Arc<SourceComment>,
        full_body: Vec<DocNode>,
        tags: Vec<DocNode>,
        preamble: Vec<DocNode>,
        postamble: Vec<DocNode>,
    ) -> DocComment {
        self.new_doc_comment_tree_with(
            CommentOrigin::Source(comment),
            full_body,
            tags,
            preamble,
            postamble,
        )
    }

    /// Splits `full_body` into first sentence and body as part of building
    /// the root.
    pub fn new_doc_comment_tree_with(
        &mut self,
        origin: CommentOrigin,
        full_body: Vec<DocNode>,
        tags: Vec<DocNode>,
        preamble: Vec<DocNode>,
        postamble: Vec<DocNode>,
    ) -> DocComment {
        let (first_sentence, body) = self.split_body(&full_body);
        debug!(
            nodes = full_body.len(),
            first_sentence = first_sentence.len(),
            tags = tags.len(),
            synthetic = origin.is_synthetic(),
            "built doc comment"
        );
        let parts = DocCommentParts {
            full_body,
            first_sentence,
            body,
            tags,
            preamble,
            postamble,
        };
        DocComment::new(origin, self.pos, parts)
    }

    // ------------------------------------------------------------------
    // Leaves
    // ------------------------------------------------------------------

    pub fn new_text_tree(&mut self, body: impl Into<String>) -> Text {
        Text::new(self.pos, body)
    }

    pub fn new_markdown_tree(&mut self, content: impl Into<String>) -> Markdown {
        Markdown::new(self.pos, content)
    }

    pub fn new_entity_tree(&mut self, name: impl Into<String>) -> Entity {
        Entity::new(self.pos, name)
    }

    pub fn new_comment_tree(&mut self, body: impl Into<String>) -> Comment {
        Comment::new(self.pos, body)
    }

    pub fn new_doc_type_tree(&mut self, text: impl Into<String>) -> DocType {
        DocType::new(self.pos, text)
    }

    /// The caret position comes from the start of the diagnostic's range.
    pub fn new_erroneous_tree(&mut self, body: impl Into<String>, diagnostic: Diagnostic) -> Erroneous {
        let pref_pos = diagnostic.start();
        Erroneous::new(self.pos, body, diagnostic, pref_pos)
    }

    pub fn new_identifier_tree(&mut self, name: impl Into<String>) -> Identifier {
        Identifier::new(self.pos, name)
    }

    /// Parses `signature` with the configured reference parser.
    pub fn new_reference_tree(&mut self, signature: &str) -> Result<Reference, ReferenceError> {
        let parts = self.reference_parser.parse(signature)?;
        Ok(Reference::new(self.pos, signature, parts))
    }

    /// For callers that already split the signature.
    pub fn new_reference_tree_from_parts(
        &mut self,
        signature: impl Into<String>,
        parts: ReferenceParts,
    ) -> Reference {
        Reference::new(self.pos, signature, parts)
    }

    // ------------------------------------------------------------------
    // HTML
    // ------------------------------------------------------------------

    pub fn new_start_element_tree(
        &mut self,
        name: impl Into<String>,
        attrs: Vec<Attribute>,
        self_closing: bool,
    ) -> StartElement {
        StartElement::new(self.pos, name, attrs, self_closing)
    }

    pub fn new_end_element_tree(&mut self, name: impl Into<String>) -> EndElement {
        EndElement::new(self.pos, name)
    }

    pub fn new_attribute_tree(
        &mut self,
        name: impl Into<String>,
        value_kind: ValueKind,
        value: Vec<DocNode>,
    ) -> Attribute {
        Attribute::new(self.pos, name, value_kind, value)
    }

    // ------------------------------------------------------------------
    // Inline tags
    // ------------------------------------------------------------------

    pub fn new_code_tree(&mut self, text: Text) -> Literal {
        self.new_literal_tree_of_kind(DocKind::Code, text)
    }

    pub fn new_literal_tree(&mut self, text: Text) -> Literal {
        self.new_literal_tree_of_kind(DocKind::Literal, text)
    }

    /// # Panics
    ///
    /// If `kind` is neither CODE nor LITERAL.
    pub fn new_literal_tree_of_kind(&mut self, kind: DocKind, text: Text) -> Literal {
        Literal::new(kind, self.pos, text)
    }

    pub fn new_doc_root_tree(&mut self) -> DocRoot {
        DocRoot::new(self.pos)
    }

    pub fn new_inherit_doc_tree(&mut self, supertype: Option<Reference>) -> InheritDoc {
        InheritDoc::new(self.pos, supertype)
    }

    pub fn new_index_tree(&mut self, term: impl Into<DocNode>, description: Vec<DocNode>) -> Index {
        Index::new(self.pos, term.into(), description)
    }

    pub fn new_link_tree(&mut self, reference: Reference, label: Vec<DocNode>) -> Link {
        self.new_link_tree_of_kind(DocKind::Link, reference, label)
    }

    pub fn new_link_plain_tree(&mut self, reference: Reference, label: Vec<DocNode>) -> Link {
        self.new_link_tree_of_kind(DocKind::LinkPlain, reference, label)
    }

    /// # Panics
    ///
    /// If `kind` is neither LINK nor LINK_PLAIN.
    pub fn new_link_tree_of_kind(
        &mut self,
        kind: DocKind,
        reference: Reference,
        label: Vec<DocNode>,
    ) -> Link {
        Link::new(kind, self.pos, reference, label)
    }

    pub fn new_value_tree(&mut self, format: Option<Text>, reference: Option<Reference>) -> Value {
        Value::new(self.pos, format, reference)
    }

    pub fn new_summary_tree(&mut self, summary: Vec<DocNode>) -> Summary {
        Summary::new(self.pos, summary)
    }

    pub fn new_system_property_tree(&mut self, property_name: impl Into<String>) -> SystemProperty {
        SystemProperty::new(self.pos, property_name)
    }

    pub fn new_return_tree(&mut self, inline: bool, description: Vec<DocNode>) -> Return {
        Return::new(self.pos, inline, description)
    }

    pub fn new_snippet_tree(&mut self, attributes: Vec<Attribute>, body: Option<Text>) -> Snippet {
        Snippet::new(self.pos, attributes, body)
    }

    pub fn new_unknown_inline_tag_tree(
        &mut self,
        tag_name: impl Into<String>,
        content: Vec<DocNode>,
    ) -> UnknownInlineTag {
        UnknownInlineTag::new(self.pos, tag_name, content)
    }

    // ------------------------------------------------------------------
    // Block tags
    // ------------------------------------------------------------------

    pub fn new_author_tree(&mut self, name: Vec<DocNode>) -> Author {
        Author::new(self.pos, name)
    }

    pub fn new_deprecated_tree(&mut self, body: Vec<DocNode>) -> Deprecated {
        Deprecated::new(self.pos, body)
    }

    pub fn new_hidden_tree(&mut self, body: Vec<DocNode>) -> Hidden {
        Hidden::new(self.pos, body)
    }

    pub fn new_param_tree(
        &mut self,
        is_type_parameter: bool,
        name: Identifier,
        description: Vec<DocNode>,
    ) -> Param {
        Param::new(self.pos, is_type_parameter, name, description)
    }

    pub fn new_provides_tree(&mut self, service_type: Reference, description: Vec<DocNode>) -> Provides {
        Provides::new(self.pos, service_type, description)
    }

    pub fn new_uses_tree(&mut self, service_type: Reference, description: Vec<DocNode>) -> Uses {
        Uses::new(self.pos, service_type, description)
    }

    pub fn new_see_tree(&mut self, reference: Vec<DocNode>) -> See {
        See::new(self.pos, reference)
    }

    pub fn new_serial_tree(&mut self, description: Vec<DocNode>) -> Serial {
        Serial::new(self.pos, description)
    }

    pub fn new_serial_data_tree(&mut self, description: Vec<DocNode>) -> SerialData {
        SerialData::new(self.pos, description)
    }

    pub fn new_serial_field_tree(
        &mut self,
        name: Identifier,
        field_type: Reference,
        description: Vec<DocNode>,
    ) -> SerialField {
        SerialField::new(self.pos, name, field_type, description)
    }

    pub fn new_since_tree(&mut self, body: Vec<DocNode>) -> Since {
        Since::new(self.pos, body)
    }

    pub fn new_spec_tree(&mut self, url: Text, title: Vec<DocNode>) -> Spec {
        Spec::new(self.pos, url, title)
    }

    pub fn new_throws_tree(&mut self, name: Reference, description: Vec<DocNode>) -> Throws {
        self.new_throws_tree_of_kind(DocKind::Throws, name, description)
    }

    pub fn new_exception_tree(&mut self, name: Reference, description: Vec<DocNode>) -> Throws {
        self.new_throws_tree_of_kind(DocKind::Exception, name, description)
    }

    /// # Panics
    ///
    /// If `kind` is neither THROWS nor EXCEPTION.
    pub fn new_throws_tree_of_kind(
        &mut self,
        kind: DocKind,
        name: Reference,
        description: Vec<DocNode>,
    ) -> Throws {
        Throws::new(kind, self.pos, name, description)
    }

    pub fn new_version_tree(&mut self, body: Vec<DocNode>) -> Version {
        Version::new(self.pos, body)
    }

    pub fn new_unknown_block_tag_tree(
        &mut self,
        tag_name: impl Into<String>,
        content: Vec<DocNode>,
    ) -> UnknownBlockTag {
        UnknownBlockTag::new(self.pos, tag_name, content)
    }
}
