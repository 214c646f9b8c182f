//! Parsing comment text into trees

use doctree_core::tree::{DocKind, DocNode, Node, NodeRef, ValueKind};
use doctree_core::{
    DocTreeConfig, ParseResult, ParserConfig, SourceComment, TextSize, nodes_to_pretty_string,
    parse_doc_comment, to_pretty_string,
};

fn at(n: u32) -> TextSize {
    TextSize::from(n)
}

fn parse(text: &str) -> ParseResult {
    parse_doc_comment(SourceComment::contiguous(text, at(0)), &DocTreeConfig::default())
}

fn parse_with(text: &str, parser: ParserConfig) -> ParseResult {
    let config = DocTreeConfig {
        parser,
        ..DocTreeConfig::default()
    };
    parse_doc_comment(SourceComment::contiguous(text, at(0)), &config)
}

fn kinds(nodes: &[DocNode]) -> Vec<DocKind> {
    nodes.iter().map(DocNode::kind).collect()
}

fn error_codes(result: &ParseResult) -> Vec<&str> {
    result.errors().iter().map(|e| e.code.as_str()).collect()
}

#[test]
fn first_sentence_and_body_are_split() {
    let result = parse("Returns the value. See below.\n@return the value");
    let tree = result.tree();
    assert_eq!(nodes_to_pretty_string(tree.first_sentence()), "Returns the value.");
    assert_eq!(nodes_to_pretty_string(tree.body()), "See below.");
    assert_eq!(to_pretty_string(&tree.block_tags()[0]), "@return the value");
}

#[test]
fn entities_are_recognised() {
    let result = parse("a &lt; b &#169; &#x1F600; c");
    assert!(result.is_valid());
    let body = result.tree().full_body();
    let names: Vec<&str> = body
        .iter()
        .filter_map(|node| match node {
            DocNode::Entity(entity) => Some(entity.name()),
            _ => None,
        })
        .collect();
    assert_eq!(names, vec!["lt", "#169", "#x1F600"]);
    assert_eq!(body[1].pos(), Some(at(2)));
    assert_eq!(body[1].end_pos(), Some(at(6)));
}

#[test]
fn bad_entity_becomes_erroneous() {
    let result = parse("Fish & chips.");
    assert_eq!(error_codes(&result), vec!["bad-entity"]);
    let bad = &result.tree().full_body()[1];
    assert_eq!(bad.kind(), DocKind::Erroneous);
    assert_eq!(bad.pos(), Some(at(5)));
    assert_eq!(to_pretty_string(&result.tree().full_body()[2]), " chips.");
}

#[test]
fn elements_with_every_attribute_kind() {
    let result = parse(r#"<img src="a.png" alt='A' width=10 hidden/> done."#);
    assert!(result.is_valid(), "{:?}", result.errors());
    let DocNode::StartElement(img) = &result.tree().full_body()[0] else {
        panic!("expected START_ELEMENT");
    };
    assert_eq!(img.name(), "img");
    assert!(img.is_self_closing());
    let value_kinds: Vec<ValueKind> = img.attributes().iter().map(|a| a.value_kind()).collect();
    assert_eq!(
        value_kinds,
        vec![ValueKind::Double, ValueKind::Single, ValueKind::Unquoted, ValueKind::Empty]
    );

    // src="a.png": name at 5, value at 10..15, closing quote at 15
    let src = &img.attributes()[0];
    assert_eq!(src.pos(), Some(at(5)));
    assert_eq!(NodeRef::from(src).end_pos(), Some(at(16)));
    let width = &img.attributes()[2];
    assert_eq!(NodeRef::from(width).end_pos(), Some(at(33)));
    let hidden = &img.attributes()[3];
    assert_eq!(NodeRef::from(hidden).end_pos(), Some(at(40)));

    assert_eq!(img.explicit_end_pos(), Some(at(42)));
    assert_eq!(
        to_pretty_string(img),
        r#"<img src="a.png" alt='A' width=10 hidden/>"#
    );
}

#[test]
fn end_elements_comments_and_doctype() {
    let result = parse("<!DOCTYPE html><b>x</b ><!-- note -->");
    assert!(result.is_valid());
    let body = result.tree().full_body();
    assert_eq!(
        kinds(body),
        vec![
            DocKind::DocType,
            DocKind::StartElement,
            DocKind::Text,
            DocKind::EndElement,
            DocKind::Comment
        ]
    );
    assert_eq!(body[3].end_pos(), Some(at(24)));
    assert_eq!(body[4].end_pos(), Some(at(37)));
    match &body[0] {
        DocNode::DocType(doc_type) => assert_eq!(doc_type.text(), "DOCTYPE html"),
        other => panic!("expected DOC_TYPE, got {}", other.kind()),
    }
}

#[test]
fn stray_less_than_is_malformed_html() {
    let result = parse("if a < b then.");
    assert_eq!(error_codes(&result), vec!["malformed-html"]);
    assert_eq!(result.tree().full_body()[1].kind(), DocKind::Erroneous);
}

#[test]
fn unterminated_comment_is_reported() {
    let result = parse("text <!-- never closed");
    assert_eq!(error_codes(&result), vec!["unterminated-comment"]);
}

#[test]
fn inline_tags_of_every_kind() {
    let text = "{@docRoot} {@inheritDoc Base} {@linkplain Map#get(Object) get} \
                {@value %d Limits#MAX} {@index \"hash table\" lookup} {@summary Short.} \
                {@systemProperty user.home} {@return the result} {@custom stuff}";
    let result = parse(text);
    assert!(result.is_valid(), "{:?}", result.errors());
    let tags: Vec<DocKind> = result
        .tree()
        .full_body()
        .iter()
        .map(DocNode::kind)
        .filter(|kind| *kind != DocKind::Text)
        .collect();
    assert_eq!(
        tags,
        vec![
            DocKind::DocRoot,
            DocKind::InheritDoc,
            DocKind::LinkPlain,
            DocKind::Value,
            DocKind::Index,
            DocKind::Summary,
            DocKind::SystemProperty,
            DocKind::Return,
            DocKind::UnknownInlineTag
        ]
    );
    for node in result.tree().full_body() {
        if node.kind() != DocKind::Text {
            let end = node.end_pos().expect("inline tags record their end");
            assert_eq!(&text[usize::from(end) - 1..usize::from(end)], "}");
        }
    }
}

#[test]
fn summary_tag_becomes_the_first_sentence() {
    let result = parse("{@summary Short. Really.} The rest.");
    let first = result.tree().first_sentence();
    assert_eq!(kinds(first), vec![DocKind::Summary]);
    assert_eq!(nodes_to_pretty_string(result.tree().body()), " The rest.");
}

#[test]
fn code_keeps_braces_and_markup() {
    let result = parse("Use {@code Map<K, V> m = {}} here.");
    assert!(result.is_valid());
    let DocNode::Literal(code) = &result.tree().full_body()[1] else {
        panic!("expected CODE");
    };
    assert_eq!(code.kind(), DocKind::Code);
    assert_eq!(code.body().body(), "Map<K, V> m = {}");
    assert_eq!(code.body().pos(), Some(at(11)));
}

#[test]
fn link_reference_is_parsed() {
    let result = parse("See {@link java.util.List#add(int, Object) add}.");
    let DocNode::Link(link) = &result.tree().full_body()[1] else {
        panic!("expected LINK");
    };
    let parts = link.reference().parts();
    assert_eq!(parts.qualifier.as_deref(), Some("java.util.List"));
    assert_eq!(parts.member.as_deref(), Some("add"));
    assert_eq!(
        parts.params.as_deref(),
        Some(&["int".to_string(), "Object".to_string()][..])
    );
    assert_eq!(nodes_to_pretty_string(link.label()), "add");
}

#[test]
fn invalid_reference_is_erroneous() {
    let result = parse("See {@link Foo#bar(int label}. Then.");
    assert_eq!(error_codes(&result), vec!["invalid-reference"]);
    let bad = &result.tree().full_body()[1];
    assert_eq!(bad.kind(), DocKind::Erroneous);
    assert_eq!(to_pretty_string(bad), "{@link Foo#bar(int label}");
}

#[test]
fn snippet_with_attributes_and_body() {
    let result = parse("{@snippet lang=java :\n  int x = 1;\n}");
    assert!(result.is_valid(), "{:?}", result.errors());
    let DocNode::Snippet(snippet) = &result.tree().full_body()[0] else {
        panic!("expected SNIPPET");
    };
    assert_eq!(snippet.attributes()[0].name(), "lang");
    assert_eq!(snippet.body().map(|b| b.body()), Some("  int x = 1;\n"));
}

#[test]
fn block_tags_of_every_kind() {
    let text = "Body.\n\
                @author Jane\n\
                @deprecated use other\n\
                @exception IOException on failure\n\
                @hidden\n\
                @param <T> type\n\
                @provides spi.Service with impl\n\
                @serial include\n\
                @serialData data\n\
                @serialField count int the count\n\
                @spec https://example.com/spec Example Spec\n\
                @throws IllegalStateException if closed\n\
                @uses spi.Service\n\
                @version 2\n\
                @todo later";
    let result = parse(text);
    assert!(result.is_valid(), "{:?}", result.errors());
    assert_eq!(
        kinds(result.tree().block_tags()),
        vec![
            DocKind::Author,
            DocKind::Deprecated,
            DocKind::Exception,
            DocKind::Hidden,
            DocKind::Param,
            DocKind::Provides,
            DocKind::Serial,
            DocKind::SerialData,
            DocKind::SerialField,
            DocKind::Spec,
            DocKind::Throws,
            DocKind::Uses,
            DocKind::Version,
            DocKind::UnknownBlockTag
        ]
    );

    let tags = result.tree().block_tags();
    let DocNode::Param(param) = &tags[4] else {
        panic!("expected PARAM");
    };
    assert!(param.is_type_parameter());
    assert_eq!(param.name().name(), "T");

    let DocNode::SerialField(field) = &tags[8] else {
        panic!("expected SERIAL_FIELD");
    };
    assert_eq!(field.name().name(), "count");
    assert_eq!(field.field_type().signature(), "int");
    assert_eq!(nodes_to_pretty_string(field.description()), "the count");

    let DocNode::Spec(spec) = &tags[9] else {
        panic!("expected SPEC");
    };
    assert_eq!(spec.url().body(), "https://example.com/spec");

    // @hidden with no description ends after its name
    let hidden_pos = text.find("@hidden").unwrap() as u32;
    assert_eq!(tags[3].end_pos(), Some(at(hidden_pos + 7)));
}

#[test]
fn see_accepts_references_strings_and_links() {
    let result = parse("@see Foo#bar the bar\n@see \"The Book\"\n@see <a href=\"x\">X</a>");
    let tags = result.tree().block_tags();
    let DocNode::See(first) = &tags[0] else {
        panic!("expected SEE");
    };
    assert_eq!(kinds(first.reference()), vec![DocKind::Reference, DocKind::Text]);
    let DocNode::See(second) = &tags[1] else {
        panic!("expected SEE");
    };
    assert_eq!(nodes_to_pretty_string(second.reference()), "\"The Book\"");
    let DocNode::See(third) = &tags[2] else {
        panic!("expected SEE");
    };
    assert_eq!(third.reference()[0].kind(), DocKind::StartElement);
}

#[test]
fn missing_param_name_is_erroneous() {
    let result = parse("Body.\n@param\n@since 1");
    assert_eq!(error_codes(&result), vec!["missing-param-name"]);
    let tags = result.tree().block_tags();
    assert_eq!(kinds(tags), vec![DocKind::Erroneous, DocKind::Since]);
    assert_eq!(to_pretty_string(&tags[0]), "@param");
}

#[test]
fn at_sign_inside_a_line_is_text() {
    let result = parse("Mail me @ home or user@example.com.");
    assert!(result.is_valid());
    assert!(result.tree().block_tags().is_empty());
    assert_eq!(kinds(result.tree().full_body()), vec![DocKind::Text]);
}

#[test]
fn markdown_mode_keeps_raw_text() {
    let parser = ParserConfig {
        markdown: true,
        ..ParserConfig::default()
    };
    let result = parse_with("Uses `a.b()` & <b>bold</b>. More.\n@since 2", parser);
    assert!(result.is_valid());
    let tree = result.tree();
    assert_eq!(kinds(tree.first_sentence()), vec![DocKind::Markdown]);
    assert_eq!(
        nodes_to_pretty_string(tree.first_sentence()),
        "Uses `a.b()` & <b>bold</b>."
    );
    assert_eq!(kinds(tree.block_tags()), vec![DocKind::Since]);
}

#[test]
fn markdown_code_span_hides_inline_tag_syntax() {
    let parser = ParserConfig {
        markdown: true,
        ..ParserConfig::default()
    };
    let result = parse_with("Write `{@code x}` literally.", parser);
    assert!(result.is_valid());
    assert_eq!(kinds(result.tree().full_body()), vec![DocKind::Markdown]);
}

#[test]
fn block_comment_positions_map_to_the_file() {
    let raw = "/**\n * Adds {@code a}.\n * @param a first\n */";
    let comment = SourceComment::from_block_comment(raw, at(100));
    let result = parse_doc_comment(comment, &DocTreeConfig::default());
    assert!(result.is_valid());
    let tree = result.tree();

    let code = &tree.full_body()[1];
    let position = tree.diagnostic_position(code);
    let file_start = usize::from(position.start_position().unwrap()) - 100;
    let file_end = usize::from(position.end_position().unwrap()) - 100;
    assert_eq!(&raw[file_start..file_end], "{@code a}");

    let param = &tree.block_tags()[0];
    let start = usize::from(tree.source_pos(param.pos()).unwrap()) - 100;
    assert_eq!(&raw[start..start + 6], "@param");
}

#[test]
fn erroneous_diagnostics_point_into_the_comment() {
    let result = parse("Body {@docRoot extra} end.");
    assert_eq!(error_codes(&result), vec!["unexpected-content"]);
    let range = result.errors()[0].range.unwrap();
    assert_eq!(usize::from(range.start()), 15);
    let bad = &result.tree().full_body()[1];
    let DocNode::Erroneous(erroneous) = bad else {
        panic!("expected ERRONEOUS");
    };
    assert_eq!(erroneous.body(), "{@docRoot extra}");
    assert_eq!(erroneous.pref_pos(), Some(at(15)));
}

#[test]
fn file_content_keeps_html_outside_body() {
    let parser = ParserConfig {
        file_content: true,
        ..ParserConfig::default()
    };
    let text = "<html>\n<head><title>Pkg</title></head>\n<BODY>\nPackage summary. Details.\n@since 9\n</BODY>\n</html>\n";
    let result = parse_with(text, parser);
    assert!(result.is_valid(), "{:?}", result.errors());
    let tree = result.tree();
    assert_eq!(nodes_to_pretty_string(tree.first_sentence()), "Package summary.");
    assert_eq!(kinds(tree.block_tags()), vec![DocKind::Since]);
    assert_eq!(
        nodes_to_pretty_string(tree.preamble()),
        "<html>\n<head><title>Pkg</title></head>\n<BODY>"
    );
    assert_eq!(nodes_to_pretty_string(tree.postamble()), "</BODY>\n</html>\n");
}

#[test]
fn pretty_tree_dump() {
    let result = parse("Hi <b>there</b>.\n@since 1");
    insta::assert_snapshot!(doctree_core::to_tree_string(result.tree()), @r#"
    DOC_COMMENT 0..25
      firstSentence:
        TEXT 0..3 "Hi "
        START_ELEMENT 3..6 "b"
        TEXT 6..11 "there"
        END_ELEMENT 11..15 "b"
        TEXT 15..16 "."
      tags:
        SINCE 17..25
          TEXT 24..25 "1"
    "#);
}
