//! Description content: text, entities and HTML

use super::scanner::{Context, Failure, Parsed, Scanner, offset};
use crate::tree::{Attribute, DocNode, ValueKind};

pub(super) fn is_attribute_name_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '<' | '"' | '\'')
}

impl Scanner<'_, '_> {
    /// Parses content until `context` says to stop. Trailing blanks of the
    /// last text run are dropped except in [`Context::Html`].
    pub(super) fn content(&mut self, context: Context) -> Vec<DocNode> {
        let mut nodes = Vec::new();
        let mut text_start = self.pos;
        let mut depth = 0usize;

        while let Some(c) = self.peek() {
            if context.stops_at_block_tags() && self.at_block_tag_start() {
                break;
            }
            match c {
                '{' if self.peek_second() == Some('@') => {
                    self.flush_text(&mut nodes, text_start, false);
                    let tag = self.inline_tag();
                    nodes.push(tag);
                    text_start = self.pos;
                }
                '{' => {
                    depth += 1;
                    self.pos += 1;
                }
                '}' if context == Context::InlineTag && depth == 0 => break,
                '}' => {
                    depth = depth.saturating_sub(1);
                    self.pos += 1;
                }
                '&' if !self.markdown => {
                    self.flush_text(&mut nodes, text_start, false);
                    let entity = self.entity();
                    nodes.push(entity);
                    text_start = self.pos;
                }
                '<' if !self.markdown => {
                    self.flush_text(&mut nodes, text_start, false);
                    let html = self.html();
                    nodes.push(html);
                    text_start = self.pos;
                }
                '`' if self.markdown => self.skip_code_span(),
                _ => {
                    self.bump();
                }
            }
        }

        self.flush_text(&mut nodes, text_start, context != Context::Html);
        nodes
    }

    /// Emits `text[start..pos]` as a TEXT node, or a MARKDOWN node in
    /// Markdown mode. Empty runs produce nothing.
    fn flush_text(&mut self, nodes: &mut Vec<DocNode>, start: usize, trim_end: bool) {
        let mut run = &self.text[start..self.pos];
        if trim_end {
            run = run.trim_end();
        }
        if run.is_empty() {
            return;
        }
        let maker = self.maker.at(offset(start));
        let node = if self.markdown {
            maker.new_markdown_tree(run).into()
        } else {
            maker.new_text_tree(run).into()
        };
        nodes.push(node);
    }

    /// A backtick run and everything up to the matching run. Braces and `@`
    /// inside a code span are not markup.
    fn skip_code_span(&mut self) {
        let ticks = self.bump_while(|c| c == '`');
        let rest = self.rest();
        let mut search = 0;
        while let Some(found) = rest[search..].find(ticks) {
            let at = search + found;
            let run = rest[at..].bytes().take_while(|&b| b == b'`').count();
            if run == ticks.len() {
                self.pos += at + run;
                return;
            }
            search = at + run;
        }
    }

    /// `&name;`, `&#NN;` or `&#xHH;`.
    pub(super) fn entity(&mut self) -> DocNode {
        let start = self.pos;
        self.pos += 1;
        let name_start = self.pos;
        if self.eat('#') {
            if self.eat('x') || self.eat('X') {
                self.bump_while(|c| c.is_ascii_hexdigit());
            } else {
                self.bump_while(|c| c.is_ascii_digit());
            }
        } else {
            self.bump_while(|c| c.is_ascii_alphanumeric());
        }
        let name = &self.text[name_start..self.pos];
        let well_formed = match name.strip_prefix('#') {
            Some(number) => !number.trim_start_matches(['x', 'X']).is_empty(),
            None => !name.is_empty(),
        };

        if well_formed && self.eat(';') {
            return self.maker.at(offset(start)).new_entity_tree(name).into();
        }
        self.erroneous(start, Failure::new(start, "bad-entity", "bad HTML entity"))
    }

    /// An element, end element, comment or doctype starting at `<`.
    pub(super) fn html(&mut self) -> DocNode {
        let start = self.pos;
        let rest = self.rest();
        let parsed = if rest.starts_with("<!--") {
            self.html_comment()
        } else if rest.starts_with("<!") {
            self.doc_type()
        } else if rest.starts_with("</") {
            self.end_element()
        } else if self.peek_second().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.start_element()
        } else {
            self.pos += 1;
            Err(Failure::new(start, "malformed-html", "malformed HTML"))
        };
        parsed.unwrap_or_else(|failure| self.erroneous(start, failure))
    }

    fn html_comment(&mut self) -> Parsed<DocNode> {
        let start = self.pos;
        match self.rest()[4..].find("-->") {
            Some(found) => {
                self.pos += 4 + found + 3;
                let body = &self.text[start..self.pos];
                Ok(self.maker.at(offset(start)).new_comment_tree(body).into())
            }
            None => {
                self.pos = self.limit;
                Err(Failure::new(start, "unterminated-comment", "unterminated HTML comment"))
            }
        }
    }

    fn doc_type(&mut self) -> Parsed<DocNode> {
        let start = self.pos;
        match self.rest().find('>') {
            Some(gt) => {
                let text = &self.text[start + 2..start + gt];
                self.pos = start + gt + 1;
                Ok(self.maker.at(offset(start)).new_doc_type_tree(text).into())
            }
            None => {
                self.pos += 2;
                Err(Failure::new(start, "malformed-html", "malformed <!DOCTYPE>"))
            }
        }
    }

    fn end_element(&mut self) -> Parsed<DocNode> {
        let start = self.pos;
        self.pos += 2;
        let name = self.bump_while(|c| c.is_ascii_alphanumeric());
        if name.is_empty() {
            return Err(Failure::new(self.pos, "malformed-html", "missing element name"));
        }
        self.skip_whitespace();
        if !self.eat('>') {
            return Err(Failure::new(
                self.pos,
                "malformed-html",
                format!("malformed end element </{name}>"),
            ));
        }
        let end = offset(self.pos);
        Ok(self
            .maker
            .at(offset(start))
            .new_end_element_tree(name)
            .with_end_pos(end)
            .into())
    }

    fn start_element(&mut self) -> Parsed<DocNode> {
        let start = self.pos;
        self.pos += 1;
        let name = self.bump_while(|c| c.is_ascii_alphanumeric());
        let mut attrs = Vec::new();

        let self_closing = loop {
            self.skip_whitespace();
            match self.peek() {
                Some('>') => {
                    self.pos += 1;
                    break false;
                }
                Some('/') if self.peek_second() == Some('>') => {
                    self.pos += 2;
                    break true;
                }
                Some(c) if is_attribute_name_char(c) => attrs.push(self.attribute()?),
                _ => {
                    return Err(Failure::new(
                        self.pos,
                        "malformed-html",
                        format!("malformed start element <{name}>"),
                    ));
                }
            }
        };

        let end = offset(self.pos);
        Ok(self
            .maker
            .at(offset(start))
            .new_start_element_tree(name, attrs, self_closing)
            .with_end_pos(end)
            .into())
    }

    /// `name`, `name=value`, `name='value'` or `name="value"`. Shared with
    /// `{@snippet}` attributes.
    pub(super) fn attribute(&mut self) -> Parsed<Attribute> {
        let start = self.pos;
        let name = self.bump_while(is_attribute_name_char);
        let after_name = self.pos;
        self.skip_whitespace();
        if !self.eat('=') {
            self.pos = after_name;
            return Ok(self
                .maker
                .at(offset(start))
                .new_attribute_tree(name, ValueKind::Empty, vec![]));
        }
        self.skip_whitespace();

        let (value_kind, value) = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let value_start = self.pos + 1;
                let Some(close) = self.rest()[1..].find(quote) else {
                    self.pos = self.limit;
                    return Err(Failure::new(
                        value_start - 1,
                        "unterminated-attribute",
                        format!("unterminated value for attribute {name}"),
                    ));
                };
                self.pos = value_start;
                let value = self.attribute_value(value_start + close);
                self.pos += 1;
                let kind = if quote == '"' {
                    ValueKind::Double
                } else {
                    ValueKind::Single
                };
                (kind, value)
            }
            _ => {
                let value_start = self.pos;
                self.bump_while(|c| !c.is_whitespace() && c != '>' && c != '}');
                if self.pos == value_start {
                    return Err(Failure::new(
                        self.pos,
                        "malformed-html",
                        format!("missing value for attribute {name}"),
                    ));
                }
                let value = self.attribute_value_between(value_start, self.pos);
                (ValueKind::Unquoted, value)
            }
        };

        Ok(self
            .maker
            .at(offset(start))
            .new_attribute_tree(name, value_kind, value))
    }

    /// Text and entities from the cursor up to `end`, leaving the cursor
    /// there.
    fn attribute_value(&mut self, end: usize) -> Vec<DocNode> {
        let saved_limit = self.limit;
        self.limit = end;
        let mut nodes = Vec::new();
        let mut text_start = self.pos;
        while let Some(c) = self.peek() {
            if c == '&' && !self.markdown {
                self.flush_text(&mut nodes, text_start, false);
                let entity = self.entity();
                nodes.push(entity);
                text_start = self.pos;
            } else {
                self.bump();
            }
        }
        self.flush_text(&mut nodes, text_start, false);
        self.limit = saved_limit;
        nodes
    }

    fn attribute_value_between(&mut self, start: usize, end: usize) -> Vec<DocNode> {
        self.pos = start;
        self.attribute_value(end)
    }
}
