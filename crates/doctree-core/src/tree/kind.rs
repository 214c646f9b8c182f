//! Node kinds

use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminant of every node in a doc comment tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocKind {
    Attribute,
    Author,
    Code,
    Comment,
    Deprecated,
    DocComment,
    DocRoot,
    DocType,
    EndElement,
    Entity,
    Erroneous,
    Exception,
    Hidden,
    Identifier,
    Index,
    InheritDoc,
    Link,
    LinkPlain,
    Literal,
    Markdown,
    Param,
    Provides,
    Reference,
    Return,
    See,
    Serial,
    SerialData,
    SerialField,
    Since,
    Snippet,
    Spec,
    StartElement,
    Summary,
    SystemProperty,
    Text,
    Throws,
    UnknownBlockTag,
    UnknownInlineTag,
    Uses,
    Value,
    Version,
}

const BLOCK_TAGS: &[DocKind] = &[
    DocKind::Author,
    DocKind::Deprecated,
    DocKind::Exception,
    DocKind::Hidden,
    DocKind::Param,
    DocKind::Provides,
    DocKind::Return,
    DocKind::See,
    DocKind::Serial,
    DocKind::SerialData,
    DocKind::SerialField,
    DocKind::Since,
    DocKind::Spec,
    DocKind::Throws,
    DocKind::Uses,
    DocKind::Version,
];

const INLINE_TAGS: &[DocKind] = &[
    DocKind::Code,
    DocKind::DocRoot,
    DocKind::Index,
    DocKind::InheritDoc,
    DocKind::Link,
    DocKind::LinkPlain,
    DocKind::Literal,
    DocKind::Return,
    DocKind::Snippet,
    DocKind::Summary,
    DocKind::SystemProperty,
    DocKind::Value,
];

impl DocKind {
    /// The name written after `@` in markup, for kinds that are tags with a
    /// fixed name. Unknown tags carry their own name instead.
    pub fn tag_name(self) -> Option<&'static str> {
        let name = match self {
            DocKind::Author => "author",
            DocKind::Code => "code",
            DocKind::Deprecated => "deprecated",
            DocKind::DocRoot => "docRoot",
            DocKind::Exception => "exception",
            DocKind::Hidden => "hidden",
            DocKind::Index => "index",
            DocKind::InheritDoc => "inheritDoc",
            DocKind::Link => "link",
            DocKind::LinkPlain => "linkplain",
            DocKind::Literal => "literal",
            DocKind::Param => "param",
            DocKind::Provides => "provides",
            DocKind::Return => "return",
            DocKind::See => "see",
            DocKind::Serial => "serial",
            DocKind::SerialData => "serialData",
            DocKind::SerialField => "serialField",
            DocKind::Since => "since",
            DocKind::Snippet => "snippet",
            DocKind::Spec => "spec",
            DocKind::Summary => "summary",
            DocKind::SystemProperty => "systemProperty",
            DocKind::Throws => "throws",
            DocKind::Uses => "uses",
            DocKind::Value => "value",
            DocKind::Version => "version",
            _ => return None,
        };
        Some(name)
    }

    /// Kinds that may start a line as `@name`. `Return` is both.
    pub fn is_block_tag(self) -> bool {
        self == DocKind::UnknownBlockTag || BLOCK_TAGS.contains(&self)
    }

    /// Kinds written as `{@name ...}`. `Return` is both.
    pub fn is_inline_tag(self) -> bool {
        self == DocKind::UnknownInlineTag || INLINE_TAGS.contains(&self)
    }

    /// Looks up a known block tag by its markup name.
    pub fn block_tag(name: &str) -> Option<DocKind> {
        BLOCK_TAGS
            .iter()
            .copied()
            .find(|kind| kind.tag_name() == Some(name))
    }

    /// Looks up a known inline tag by its markup name.
    pub fn inline_tag(name: &str) -> Option<DocKind> {
        INLINE_TAGS
            .iter()
            .copied()
            .find(|kind| kind.tag_name() == Some(name))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DocKind::Attribute => "ATTRIBUTE",
            DocKind::Author => "AUTHOR",
            DocKind::Code => "CODE",
            DocKind::Comment => "COMMENT",
            DocKind::Deprecated => "DEPRECATED",
            DocKind::DocComment => "DOC_COMMENT",
            DocKind::DocRoot => "DOC_ROOT",
            DocKind::DocType => "DOC_TYPE",
            DocKind::EndElement => "END_ELEMENT",
            DocKind::Entity => "ENTITY",
            DocKind::Erroneous => "ERRONEOUS",
            DocKind::Exception => "EXCEPTION",
            DocKind::Hidden => "HIDDEN",
            DocKind::Identifier => "IDENTIFIER",
            DocKind::Index => "INDEX",
            DocKind::InheritDoc => "INHERIT_DOC",
            DocKind::Link => "LINK",
            DocKind::LinkPlain => "LINK_PLAIN",
            DocKind::Literal => "LITERAL",
            DocKind::Markdown => "MARKDOWN",
            DocKind::Param => "PARAM",
            DocKind::Provides => "PROVIDES",
            DocKind::Reference => "REFERENCE",
            DocKind::Return => "RETURN",
            DocKind::See => "SEE",
            DocKind::Serial => "SERIAL",
            DocKind::SerialData => "SERIAL_DATA",
            DocKind::SerialField => "SERIAL_FIELD",
            DocKind::Since => "SINCE",
            DocKind::Snippet => "SNIPPET",
            DocKind::Spec => "SPEC",
            DocKind::StartElement => "START_ELEMENT",
            DocKind::Summary => "SUMMARY",
            DocKind::SystemProperty => "SYSTEM_PROPERTY",
            DocKind::Text => "TEXT",
            DocKind::Throws => "THROWS",
            DocKind::UnknownBlockTag => "UNKNOWN_BLOCK_TAG",
            DocKind::UnknownInlineTag => "UNKNOWN_INLINE_TAG",
            DocKind::Uses => "USES",
            DocKind::Value => "VALUE",
            DocKind::Version => "VERSION",
        }
    }
}

impl fmt::Display for DocKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn return_is_both_block_and_inline() {
        assert!(DocKind::Return.is_block_tag());
        assert!(DocKind::Return.is_inline_tag());
        assert!(DocKind::Param.is_block_tag());
        assert!(!DocKind::Param.is_inline_tag());
        assert!(!DocKind::Text.is_block_tag());
    }

    #[test]
    fn tag_lookup_is_case_sensitive() {
        assert_eq!(DocKind::block_tag("serialData"), Some(DocKind::SerialData));
        assert_eq!(DocKind::block_tag("serialdata"), None);
        assert_eq!(DocKind::inline_tag("linkplain"), Some(DocKind::LinkPlain));
        assert_eq!(DocKind::inline_tag("param"), None);
    }

    #[test]
    fn serialized_names_match_display() {
        let json = serde_json::to_string(&DocKind::UnknownBlockTag).unwrap();
        assert_eq!(json, "\"UNKNOWN_BLOCK_TAG\"");
        assert_eq!(DocKind::UnknownBlockTag.to_string(), "UNKNOWN_BLOCK_TAG");
        assert_eq!(DocKind::LinkPlain.to_string(), "LINK_PLAIN");
    }
}
