//! Doc comment trees
//!
//! Nodes form a closed sum type ([`DocNode`]) with a borrowed view
//! ([`NodeRef`]) that also covers the [`DocComment`] root. Queries such as
//! child order and end positions are written once against `NodeRef`.

mod end_pos;
pub mod kind;
pub mod nodes;
pub mod printer;
mod visit;

pub use end_pos::end_position;
pub use kind::DocKind;
pub use nodes::{
    Attribute, Author, Comment, DocComment, DocNode, DocRoot, DocType, Deprecated, EndElement,
    Entity, Erroneous, Hidden, Identifier, Index, InheritDoc, Link, Literal, Markdown, Node,
    NodeRef, Param, Provides, Reference, Return, See, Serial, SerialData, SerialField, Since,
    Snippet, Spec, StartElement, Summary, SystemProperty, Text, Throws, UnknownBlockTag,
    UnknownInlineTag, Uses, Value, ValueKind, Version,
};
pub use printer::{nodes_to_pretty_string, to_json, to_pretty_string, to_tree_string};
pub use visit::Descendants;
