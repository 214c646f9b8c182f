//! Property-based tests for first-sentence splitting
//!
//! Node sequences are built from text runs, paragraph and bold elements and
//! `{@code}` tags, laid out at consecutive offsets. Every property runs both
//! with the period-then-whitespace fallback and with a break iterator.

use doctree_core::tree::DocNode;
use doctree_core::{DocTreeMaker, SimpleSentenceIterator, TextSize, nodes_to_pretty_string};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Piece {
    Text(String),
    Paragraph,
    Bold(String),
    Code(String),
}

/// Words with optional periods and a trailing blank now and then
fn text_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "([a-z]{1,6}[.]? ){0,4}[a-z]{1,6}[.]?",
        "[A-Z][a-z]{0,6}( [a-z]{1,6}){0,3}[.] ",
        "[a-z]{1,6}\n",
    ]
}

fn piece_strategy() -> impl Strategy<Value = Piece> {
    prop_oneof![
        5 => text_strategy().prop_map(Piece::Text),
        1 => Just(Piece::Paragraph),
        1 => "[a-z]{1,5}".prop_map(Piece::Bold),
        1 => "[a-z]{1,5}".prop_map(Piece::Code),
    ]
}

/// Start of `text` when it is laid out at `offset`; moves `offset` past it.
fn advance(text: &str, offset: &mut u32) -> TextSize {
    let at = TextSize::from(*offset);
    *offset += text.len() as u32;
    at
}

/// Builds the nodes at the offsets they would have in the rendered markup.
fn build(pieces: &[Piece]) -> Vec<DocNode> {
    let mut m = DocTreeMaker::new();
    let mut nodes = Vec::new();
    let mut offset = 0u32;

    for piece in pieces {
        match piece {
            Piece::Text(text) => {
                let at = advance(text, &mut offset);
                nodes.push(m.at(at).new_text_tree(text.as_str()).into());
            }
            Piece::Paragraph => {
                let at = advance("<p>", &mut offset);
                nodes.push(m.at(at).new_start_element_tree("p", vec![], false).into());
            }
            Piece::Bold(text) => {
                let at = advance("<b>", &mut offset);
                nodes.push(m.at(at).new_start_element_tree("b", vec![], false).into());
                let at = advance(text, &mut offset);
                nodes.push(m.at(at).new_text_tree(text.as_str()).into());
                let at = advance("</b>", &mut offset);
                nodes.push(m.at(at).new_end_element_tree("b").into());
            }
            Piece::Code(text) => {
                let tag_at = advance("{@code ", &mut offset);
                let body_at = advance(text, &mut offset);
                advance("}", &mut offset);
                let body = m.at(body_at).new_text_tree(text.as_str());
                nodes.push(m.at(tag_at).new_code_tree(body).into());
            }
        }
    }
    nodes
}

fn iterating_maker() -> DocTreeMaker {
    DocTreeMaker::new().with_break_iterator(SimpleSentenceIterator::new())
}

fn assert_split_is_idempotent(mut m: DocTreeMaker, nodes: &[DocNode]) -> Result<(), TestCaseError> {
    let (first, _) = m.split_body(nodes);
    let (again, rest) = m.split_body(&first);
    prop_assert_eq!(&again, &first);
    prop_assert!(rest.is_empty());
    Ok(())
}

fn assert_split_covers_input(mut m: DocTreeMaker, nodes: &[DocNode]) -> Result<(), TestCaseError> {
    let (first, body) = m.split_body(nodes);
    let joined = format!(
        "{}{}",
        nodes_to_pretty_string(&first),
        nodes_to_pretty_string(&body)
    );
    prop_assert_eq!(
        without_whitespace(&joined),
        without_whitespace(&nodes_to_pretty_string(nodes))
    );
    prop_assert!(first.len() + body.len() >= nodes.len());
    prop_assert!(first.len() + body.len() <= nodes.len() + 1);
    Ok(())
}

fn without_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

proptest! {
    #[test]
    fn splitting_the_first_sentence_again_changes_nothing(
        pieces in prop::collection::vec(piece_strategy(), 0..8)
    ) {
        assert_split_is_idempotent(DocTreeMaker::new(), &build(&pieces))?;
    }

    #[test]
    fn iterator_split_of_the_first_sentence_is_stable(
        pieces in prop::collection::vec(piece_strategy(), 0..8)
    ) {
        assert_split_is_idempotent(iterating_maker(), &build(&pieces))?;
    }

    #[test]
    fn first_sentence_and_body_cover_the_input(
        pieces in prop::collection::vec(piece_strategy(), 0..8)
    ) {
        assert_split_covers_input(DocTreeMaker::new(), &build(&pieces))?;
    }

    #[test]
    fn iterator_split_covers_the_input(
        pieces in prop::collection::vec(piece_strategy(), 0..8)
    ) {
        assert_split_covers_input(iterating_maker(), &build(&pieces))?;
    }

    #[test]
    fn split_pieces_keep_their_positions(
        pieces in prop::collection::vec(piece_strategy(), 1..8)
    ) {
        let nodes = build(&pieces);
        let mut m = DocTreeMaker::new();
        let (first, body) = m.split_body(&nodes);
        if let (Some(head), Some(original)) = (first.first(), nodes.first()) {
            prop_assert_eq!(head.pos(), original.pos());
        }
        let positions: Vec<_> = first.iter().chain(&body).map(DocNode::pos).collect();
        prop_assert!(positions.windows(2).all(|pair| pair[0] <= pair[1]));
    }
}
