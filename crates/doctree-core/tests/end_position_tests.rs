//! End positions of constructed and parsed trees

use doctree_core::tree::{DocNode, NodeRef, ValueKind};
use doctree_core::{DocTreeConfig, DocTreeMaker, SourceComment, TextSize, end_position, parse_doc_comment};

fn at(n: u32) -> TextSize {
    TextSize::from(n)
}

#[test]
fn empty_attribute_ends_after_its_name() {
    let mut m = DocTreeMaker::new();
    let attr = m.at(at(10)).new_attribute_tree("href", ValueKind::Empty, vec![]);
    assert_eq!(end_position(&attr), Some(at(14)));
}

#[test]
fn quoted_attribute_includes_closing_quote() {
    let mut m = DocTreeMaker::new();
    // href="a.html" with the value text at 16..20
    let value = m.at(at(16)).new_text_tree("a.ht");
    let double = m.at(at(10)).new_attribute_tree("href", ValueKind::Double, vec![value.clone().into()]);
    let single = m.at(at(10)).new_attribute_tree("href", ValueKind::Single, vec![value.clone().into()]);
    let unquoted = m.at(at(10)).new_attribute_tree("href", ValueKind::Unquoted, vec![value.into()]);

    assert_eq!(end_position(&double), Some(at(21)));
    assert_eq!(end_position(&single), Some(at(21)));
    assert_eq!(end_position(&unquoted), Some(at(20)));
}

#[test]
fn type_parameter_without_description_covers_closing_angle() {
    let mut m = DocTreeMaker::new();
    // "@param <T>" with the identifier at 8
    let name = m.at(at(8)).new_identifier_tree("T");
    let param = m.at(at(0)).new_param_tree(true, name, vec![]);
    assert_eq!(end_position(&param), Some(at(10)));

    let name = m.at(at(7)).new_identifier_tree("t");
    let plain = m.at(at(0)).new_param_tree(false, name, vec![]);
    assert_eq!(end_position(&plain), Some(at(8)));
}

#[test]
fn block_tag_without_children_covers_its_name() {
    let mut m = DocTreeMaker::new();
    let deprecated = m.at(at(5)).new_deprecated_tree(vec![]);
    assert_eq!(end_position(&deprecated), Some(at(16)));

    let unknown = m.at(at(5)).new_unknown_block_tag_tree("custom", vec![]);
    assert_eq!(end_position(&unknown), Some(at(12)));
}

#[test]
fn explicit_end_wins_over_children() {
    let mut m = DocTreeMaker::new();
    let body = m.at(at(7)).new_text_tree("x");
    let code = m.at(at(0)).new_code_tree(body).with_end_pos(at(9));
    assert_eq!(end_position(&code), Some(at(9)));
}

#[test]
fn empty_comment_ends_at_its_start() {
    let mut m = DocTreeMaker::new();
    let comment = m.at(at(3)).new_doc_comment_tree(vec![], vec![]);
    assert_eq!(end_position(&comment), Some(at(3)));
}

#[test]
fn unknown_positions_stay_unknown() {
    let mut m = DocTreeMaker::new();
    let root = m.new_doc_root_tree();
    assert_eq!(end_position(&root), None);
}

/// Every node with children ends at or after its last child.
#[test]
fn parsed_nodes_end_after_their_last_child() {
    let text = "Sets the <a href=\"x.html\">target</a> of {@link Foo#bar(int) the bar}.\n\
                <p>More &amp; more {@code a{b}c}.\n\
                @param <T> element type\n\
                @param value the {@literal <value>}\n\
                @throws IllegalStateException if closed\n\
                @see Foo#baz\n\
                @since 1.2";
    let comment = SourceComment::contiguous(text, at(0));
    let result = parse_doc_comment(comment, &DocTreeConfig::default());
    assert!(result.is_valid(), "{:?}", result.errors());

    let root = NodeRef::from(result.tree());
    let mut checked = 0;
    for node in root.descendants() {
        let Some(last) = node.last_child() else { continue };
        let (Some(end), Some(last_end)) = (node.end_pos(), last.end_pos()) else {
            panic!("{} has no end position", node.kind());
        };
        assert!(end >= last_end, "{} ends before its last child", node.kind());
        checked += 1;
    }
    assert!(checked > 5);
}

#[test]
fn parsed_tree_ends_with_last_tag() {
    let text = "Body.\n@since 1.2";
    let result = parse_doc_comment(SourceComment::contiguous(text, at(0)), &DocTreeConfig::default());
    let root = NodeRef::from(result.tree());
    assert_eq!(root.end_pos(), Some(TextSize::of(text)));
    match &result.tree().block_tags()[0] {
        DocNode::Since(since) => assert_eq!(end_position(since), Some(at(16))),
        other => panic!("expected SINCE, got {}", other.kind()),
    }
}
