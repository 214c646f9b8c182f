//! Inline tags (`{@name ...}`) and block tags (`@name ...`)

use text_size::TextSize;

use super::html::is_attribute_name_char;
use super::scanner::{Context, Failure, Parsed, Scanner, offset};
use crate::tree::{DocKind, DocNode, Reference, Text};

impl<'a> Scanner<'a, '_> {
    /// An inline tag starting at `{@`. The node ends just past its `}`.
    pub(super) fn inline_tag(&mut self) -> DocNode {
        let start = self.pos;
        self.pos += 2;
        let name = self.tag_name();
        match self.inline_tag_body(start, name) {
            Ok(node) => node,
            Err(failure) => {
                self.skip_to_inline_end();
                self.erroneous(start, failure)
            }
        }
    }

    fn inline_tag_body(&mut self, start: usize, name: &str) -> Parsed<DocNode> {
        if name.is_empty() {
            return Err(Failure::new(self.pos, "missing-tag-name", "no tag name after '{@'"));
        }
        let at = offset(start);

        let node: DocNode = match name {
            "code" | "literal" => {
                let kind = if name == "code" {
                    DocKind::Code
                } else {
                    DocKind::Literal
                };
                if self.peek().is_some_and(char::is_whitespace) {
                    self.bump();
                }
                let body = self.raw_body(start, name)?;
                let end = self.close_raw(start, name)?;
                self.maker
                    .at(at)
                    .new_literal_tree_of_kind(kind, body)
                    .with_end_pos(end)
                    .into()
            }
            "docRoot" => {
                let end = self.close(start, name)?;
                self.maker.at(at).new_doc_root_tree().with_end_pos(end).into()
            }
            "inheritDoc" => {
                self.skip_whitespace();
                let supertype = self.optional_reference()?;
                let end = self.close(start, name)?;
                self.maker
                    .at(at)
                    .new_inherit_doc_tree(supertype)
                    .with_end_pos(end)
                    .into()
            }
            "link" | "linkplain" => {
                let kind = if name == "link" {
                    DocKind::Link
                } else {
                    DocKind::LinkPlain
                };
                self.skip_whitespace();
                let reference = self.reference()?;
                self.skip_whitespace();
                let label = self.content(Context::InlineTag);
                let end = self.close(start, name)?;
                self.maker
                    .at(at)
                    .new_link_tree_of_kind(kind, reference, label)
                    .with_end_pos(end)
                    .into()
            }
            "value" => {
                self.skip_whitespace();
                let format = if self.peek() == Some('%') {
                    let format_start = self.pos;
                    let format = self.word();
                    self.skip_whitespace();
                    Some(self.maker.at(offset(format_start)).new_text_tree(format))
                } else {
                    None
                };
                let reference = self.optional_reference()?;
                let end = self.close(start, name)?;
                self.maker
                    .at(at)
                    .new_value_tree(format, reference)
                    .with_end_pos(end)
                    .into()
            }
            "index" => {
                self.skip_whitespace();
                let term = self.index_term()?;
                self.skip_whitespace();
                let description = self.content(Context::InlineTag);
                let end = self.close(start, name)?;
                self.maker
                    .at(at)
                    .new_index_tree(term, description)
                    .with_end_pos(end)
                    .into()
            }
            "summary" => {
                self.skip_whitespace();
                let summary = self.content(Context::InlineTag);
                let end = self.close(start, name)?;
                self.maker
                    .at(at)
                    .new_summary_tree(summary)
                    .with_end_pos(end)
                    .into()
            }
            "systemProperty" => {
                self.skip_whitespace();
                let property = self.word();
                if property.is_empty() {
                    return Err(Failure::new(
                        self.pos,
                        "missing-property-name",
                        "{@systemProperty} needs a property name",
                    ));
                }
                let end = self.close(start, name)?;
                self.maker
                    .at(at)
                    .new_system_property_tree(property)
                    .with_end_pos(end)
                    .into()
            }
            "return" => {
                self.skip_whitespace();
                let description = self.content(Context::InlineTag);
                let end = self.close(start, name)?;
                self.maker
                    .at(at)
                    .new_return_tree(true, description)
                    .with_end_pos(end)
                    .into()
            }
            "snippet" => self.snippet(start)?,
            _ => {
                self.skip_whitespace();
                let content = self.content(Context::InlineTag);
                let end = self.close(start, name)?;
                self.maker
                    .at(at)
                    .new_unknown_inline_tag_tree(name, content)
                    .with_end_pos(end)
                    .into()
            }
        };
        Ok(node)
    }

    /// `{@snippet attr=value ... : body}`; the body starts on the line after
    /// the colon.
    fn snippet(&mut self, start: usize) -> Parsed<DocNode> {
        let mut attributes = Vec::new();
        let body = loop {
            self.skip_whitespace();
            match self.peek() {
                Some(':') => {
                    self.pos += 1;
                    self.bump_while(|c| c == ' ' || c == '\t');
                    self.eat('\n');
                    break Some(self.raw_body(start, "snippet")?);
                }
                Some('}') | None => break None,
                Some(c) if is_attribute_name_char(c) => attributes.push(self.attribute()?),
                Some(_) => {
                    return Err(Failure::new(
                        self.pos,
                        "unexpected-content",
                        "unexpected content in {@snippet}",
                    ));
                }
            }
        };
        let end = match body {
            Some(_) => self.close_raw(start, "snippet")?,
            None => self.close(start, "snippet")?,
        };
        Ok(self
            .maker
            .at(offset(start))
            .new_snippet_tree(attributes, body)
            .with_end_pos(end)
            .into())
    }

    /// Text up to the balanced `}`, with `@` and markup left uninterpreted.
    fn raw_body(&mut self, start: usize, name: &str) -> Parsed<Text> {
        let Some(close) = self.balanced_close() else {
            self.pos = self.limit;
            return Err(unterminated(start, name));
        };
        let body_start = self.pos;
        let body = &self.text[body_start..close];
        self.pos = close;
        Ok(self.maker.at(offset(body_start)).new_text_tree(body))
    }

    fn close_raw(&mut self, start: usize, name: &str) -> Parsed<TextSize> {
        if self.eat('}') {
            Ok(offset(self.pos))
        } else {
            Err(unterminated(start, name))
        }
    }

    /// Expects the closing `}` after optional blanks.
    fn close(&mut self, start: usize, name: &str) -> Parsed<TextSize> {
        self.skip_whitespace();
        if self.eat('}') {
            return Ok(offset(self.pos));
        }
        if self.at_end() || self.at_block_tag_start() {
            return Err(unterminated(start, name));
        }
        Err(Failure::new(
            self.pos,
            "unexpected-content",
            format!("unexpected content in {{@{name}}}"),
        ))
    }

    fn index_term(&mut self) -> Parsed<DocNode> {
        if self.eat('"') {
            let term_start = self.pos;
            let Some(close) = self.rest().find('"') else {
                return Err(Failure::new(
                    term_start - 1,
                    "unterminated-string",
                    "unterminated quoted index term",
                ));
            };
            let term = &self.text[term_start..term_start + close];
            self.pos = term_start + close + 1;
            return Ok(self.maker.at(offset(term_start)).new_text_tree(term).into());
        }
        let term_start = self.pos;
        let term = self.word();
        if term.is_empty() {
            return Err(Failure::new(self.pos, "missing-index-term", "{@index} needs a term"));
        }
        Ok(self.maker.at(offset(term_start)).new_text_tree(term).into())
    }

    // ------------------------------------------------------------------
    // References
    // ------------------------------------------------------------------

    /// A signature such as `java.util.List#add(int, E)`. Blanks inside the
    /// parameter list belong to the signature.
    fn reference_text(&mut self) -> &'a str {
        let start = self.pos;
        let mut parens = 0usize;
        let mut angles = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '}' => break,
                '(' => parens += 1,
                ')' => parens = parens.saturating_sub(1),
                '<' => angles += 1,
                '>' => angles = angles.saturating_sub(1),
                c if c.is_whitespace() && parens == 0 && angles == 0 => break,
                _ => {}
            }
            self.bump();
        }
        &self.text[start..self.pos]
    }

    pub(super) fn reference(&mut self) -> Parsed<Reference> {
        let start = self.pos;
        let signature = self.reference_text();
        if signature.is_empty() {
            return Err(Failure::new(start, "missing-reference", "reference not found"));
        }
        let end = offset(self.pos);
        self.maker
            .at(offset(start))
            .new_reference_tree(signature)
            .map(|reference| reference.with_end_pos(end))
            .map_err(|e| Failure::new(start, "invalid-reference", e.to_string()))
    }

    fn optional_reference(&mut self) -> Parsed<Option<Reference>> {
        match self.peek() {
            None | Some('}') => Ok(None),
            Some(_) => self.reference().map(Some),
        }
    }

    // ------------------------------------------------------------------
    // Block tags
    // ------------------------------------------------------------------

    /// A block tag starting at `@`. Its description runs to the next block
    /// tag or the end of the comment.
    pub(super) fn block_tag(&mut self) -> DocNode {
        let start = self.pos;
        self.pos += 1;
        let name = self.tag_name();
        match self.block_tag_body(start, name) {
            Ok(node) => node,
            Err(mut failure) => {
                self.skip_to_next_block_tag();
                let end = start + self.text[start..self.pos].trim_end().len();
                failure.at = failure.at.min(end);
                let resume = self.pos;
                self.pos = end;
                let node = self.erroneous(start, failure);
                self.pos = resume;
                node
            }
        }
    }

    fn block_tag_body(&mut self, start: usize, name: &str) -> Parsed<DocNode> {
        let at = offset(start);
        self.skip_whitespace();

        let node: DocNode = match name {
            "author" => {
                let author = self.content(Context::BlockTag);
                self.maker.at(at).new_author_tree(author).into()
            }
            "deprecated" => {
                let body = self.content(Context::BlockTag);
                self.maker.at(at).new_deprecated_tree(body).into()
            }
            "hidden" => {
                let body = self.content(Context::BlockTag);
                self.maker.at(at).new_hidden_tree(body).into()
            }
            "since" => {
                let body = self.content(Context::BlockTag);
                self.maker.at(at).new_since_tree(body).into()
            }
            "version" => {
                let body = self.content(Context::BlockTag);
                self.maker.at(at).new_version_tree(body).into()
            }
            "serial" => {
                let description = self.content(Context::BlockTag);
                self.maker.at(at).new_serial_tree(description).into()
            }
            "serialData" => {
                let description = self.content(Context::BlockTag);
                self.maker.at(at).new_serial_data_tree(description).into()
            }
            "return" => {
                let description = self.content(Context::BlockTag);
                self.maker.at(at).new_return_tree(false, description).into()
            }
            "see" => {
                let reference = self.see_reference()?;
                self.maker.at(at).new_see_tree(reference).into()
            }
            "param" => self.param(start)?,
            "throws" | "exception" => {
                let kind = if name == "throws" {
                    DocKind::Throws
                } else {
                    DocKind::Exception
                };
                let exception = self.reference()?;
                self.skip_whitespace();
                let description = self.content(Context::BlockTag);
                self.maker
                    .at(at)
                    .new_throws_tree_of_kind(kind, exception, description)
                    .into()
            }
            "provides" | "uses" => {
                let service_type = self.reference()?;
                self.skip_whitespace();
                let description = self.content(Context::BlockTag);
                if name == "provides" {
                    self.maker
                        .at(at)
                        .new_provides_tree(service_type, description)
                        .into()
                } else {
                    self.maker.at(at).new_uses_tree(service_type, description).into()
                }
            }
            "serialField" => {
                let name_start = self.pos;
                let field = self.identifier();
                if field.is_empty() {
                    return Err(Failure::new(
                        self.pos,
                        "missing-field-name",
                        "@serialField needs a field name",
                    ));
                }
                let field = self.maker.at(offset(name_start)).new_identifier_tree(field);
                self.skip_whitespace();
                let field_type = self.reference()?;
                self.skip_whitespace();
                let description = self.content(Context::BlockTag);
                self.maker
                    .at(at)
                    .new_serial_field_tree(field, field_type, description)
                    .into()
            }
            "spec" => {
                let url_start = self.pos;
                let url = self.word();
                if url.is_empty() {
                    return Err(Failure::new(self.pos, "missing-url", "@spec needs a URL"));
                }
                let url = self.maker.at(offset(url_start)).new_text_tree(url);
                self.skip_whitespace();
                let title = self.content(Context::BlockTag);
                self.maker.at(at).new_spec_tree(url, title).into()
            }
            _ => {
                let content = self.content(Context::BlockTag);
                self.maker
                    .at(at)
                    .new_unknown_block_tag_tree(name, content)
                    .into()
            }
        };
        Ok(node)
    }

    /// `@param name ...` or `@param <T> ...`.
    fn param(&mut self, start: usize) -> Parsed<DocNode> {
        let type_parameter = self.eat('<');
        let name_start = self.pos;
        let name = self.identifier();
        if name.is_empty() {
            return Err(Failure::new(
                self.pos,
                "missing-param-name",
                "@param needs a parameter name",
            ));
        }
        if type_parameter && !self.eat('>') {
            return Err(Failure::new(
                self.pos,
                "malformed-type-parameter",
                format!("expected '>' after <{name}"),
            ));
        }
        let name = self.maker.at(offset(name_start)).new_identifier_tree(name);
        self.skip_whitespace();
        let description = self.content(Context::BlockTag);
        Ok(self
            .maker
            .at(offset(start))
            .new_param_tree(type_parameter, name, description)
            .into())
    }

    /// A quoted string, HTML (usually a link), or a reference plus label.
    fn see_reference(&mut self) -> Parsed<Vec<DocNode>> {
        match self.peek() {
            Some('"') | Some('<') | None => Ok(self.content(Context::BlockTag)),
            Some(_) => {
                let reference = self.reference()?;
                self.skip_whitespace();
                let mut nodes = vec![DocNode::from(reference)];
                nodes.extend(self.content(Context::BlockTag));
                Ok(nodes)
            }
        }
    }
}

fn unterminated(start: usize, name: &str) -> Failure {
    Failure::new(
        start,
        "unterminated-inline-tag",
        format!("unterminated inline tag {{@{name}}}"),
    )
}
