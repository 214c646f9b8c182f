//! Where does the first sentence of a text node end?
//!
//! With a [`BreakIterator`] the answer comes from the iterator, with extra
//! probing when its first boundary is the end of the text. Without one, a
//! period followed by whitespace ends the sentence.

use tracing::debug;

use crate::tree::DocNode;

use super::markdown;
use super::sentence::is_sentence_break;

/// Finds sentence boundaries in a piece of text.
///
/// Mirrors a cursor-style iterator: `set_text` resets the cursor to the
/// start, each `next` returns the following boundary as a byte offset, and
/// `None` means the end has been passed. The end of a non-empty text is
/// always a boundary.
pub trait BreakIterator {
    fn set_text(&mut self, text: &str);
    fn next(&mut self) -> Option<usize>;
}

/// Appended to the text when probing whether it already ends a sentence.
const LITMUS_SENTENCE: &str = "Dummy Sentence.";

/// A small rule-based sentence iterator.
///
/// A boundary follows a run of `.`, `!` or `?` (plus closing quotes or
/// brackets) and the whitespace after it. A period followed by a lowercase
/// word is treated as an abbreviation.
#[derive(Debug, Clone, Default)]
pub struct SimpleSentenceIterator {
    text: String,
    cursor: usize,
}

impl SimpleSentenceIterator {
    pub fn new() -> Self {
        Self::default()
    }

    fn boundary_after(&self, from: usize) -> usize {
        let bytes = self.text.as_bytes();
        let len = bytes.len();
        let mut i = from;
        while i < len {
            if !matches!(bytes[i], b'.' | b'!' | b'?') {
                i += 1;
                continue;
            }
            let mut j = i;
            let mut periods_only = true;
            while j < len && matches!(bytes[j], b'.' | b'!' | b'?') {
                periods_only &= bytes[j] == b'.';
                j += 1;
            }
            while j < len && matches!(bytes[j], b'"' | b'\'' | b')' | b']') {
                j += 1;
            }
            if j == len {
                return len;
            }
            if !bytes[j].is_ascii_whitespace() {
                i = j;
                continue;
            }
            while j < len && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if periods_only && j < len && self.text[j..].starts_with(char::is_lowercase) {
                i = j;
                continue;
            }
            return j;
        }
        len
    }
}

impl BreakIterator for SimpleSentenceIterator {
    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.cursor = 0;
    }

    fn next(&mut self) -> Option<usize> {
        if self.cursor >= self.text.len() {
            return None;
        }
        self.cursor = self.boundary_after(self.cursor);
        Some(self.cursor)
    }
}

/// Break offset within `text`, the content of a TEXT or MARKDOWN node.
///
/// `None` means the sentence does not end inside this node and scanning
/// should continue with the next one.
pub(crate) fn sentence_break(
    iterator: Option<&mut (dyn BreakIterator + Send + 'static)>,
    is_markdown: bool,
    text: &str,
    next: Option<&DocNode>,
) -> Option<usize> {
    let normalized = if is_markdown {
        markdown::mask_periods(text)
    } else {
        text.to_string()
    };
    let para_end = if is_markdown {
        markdown::end_of_paragraph(&normalized)
    } else {
        None
    };

    match iterator {
        Some(iterator) => iterated_break(iterator, &normalized, para_end, next).filter(|&offset| {
            // Masking keeps byte offsets, so `text` and `normalized` share
            // char boundaries.
            let usable = text.is_char_boundary(offset);
            if !usable {
                debug!(offset, len = text.len(), "ignoring break outside the text");
            }
            usable
        }),
        None => default_break(&normalized, para_end),
    }
}

fn iterated_break(
    iterator: &mut (dyn BreakIterator + Send + 'static),
    normalized: &str,
    para_end: Option<usize>,
    next: Option<&DocNode>,
) -> Option<usize> {
    let text = match para_end {
        Some(end) => &normalized[..end],
        None => normalized,
    };
    if text.is_empty() {
        return para_end;
    }

    iterator.set_text(text);
    let boundary = iterator.next().unwrap_or(text.len());
    if boundary < text.len() {
        return Some(boundary);
    }
    if let Some(end) = para_end {
        return Some(end);
    }
    let Some(next) = next else {
        return Some(boundary);
    };

    // The boundary is the end of the text: does the sentence really end here?
    if let Some(next_text) = next.text_content() {
        let next_text = if next.kind() == crate::tree::DocKind::Markdown {
            markdown::mask_periods(next_text)
        } else {
            next_text.to_string()
        };
        iterator.set_text(&format!("{text}{next_text}"));
        if iterator.next().is_some_and(|b| b <= boundary) {
            return Some(boundary);
        }
    }
    if is_sentence_break(next, false) {
        return Some(boundary);
    }

    iterator.set_text(&format!("{text}{LITMUS_SENTENCE}"));
    match iterator.next() {
        Some(probe) if probe <= boundary => Some(probe),
        _ => None,
    }
}

/// First whitespace after a period, clamped to the end of a Markdown
/// paragraph.
fn default_break(text: &str, para_end: Option<usize>) -> Option<usize> {
    let mut period = false;
    for (i, byte) in text.bytes().enumerate() {
        match byte {
            b'.' => period = true,
            b' ' | b'\t' | b'\n' | b'\r' | b'\x0c' => {
                if period {
                    return Some(para_end.map_or(i, |end| end.min(i)));
                }
            }
            _ => period = false,
        }
    }
    para_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maker::DocTreeMaker;
    use text_size::TextSize;

    fn boundaries(text: &str) -> Vec<usize> {
        let mut it = SimpleSentenceIterator::new();
        it.set_text(text);
        std::iter::from_fn(|| it.next()).collect()
    }

    #[test]
    fn simple_iterator_breaks_after_whitespace() {
        assert_eq!(boundaries("One. Two! Three"), vec![5, 10, 15]);
        assert_eq!(boundaries("No terminator"), vec![13]);
        assert_eq!(boundaries(""), Vec::<usize>::new());
    }

    #[test]
    fn simple_iterator_skips_abbreviations() {
        assert_eq!(boundaries("Use e.g. this one. Next"), vec![19, 23]);
        assert_eq!(boundaries("Version 1.5 is out. Yes"), vec![20, 23]);
    }

    #[test]
    fn simple_iterator_keeps_closing_quotes() {
        assert_eq!(boundaries("He said \"stop.\" Then"), vec![16, 20]);
    }

    #[test]
    fn default_break_is_whitespace_after_period() {
        assert_eq!(default_break("Returns the value. See below.", None), Some(18));
        assert_eq!(default_break("No break here", None), None);
        assert_eq!(default_break("Ends with period.", None), None);
        assert_eq!(default_break("a.b c", None), None);
    }

    #[test]
    fn default_break_clamps_to_paragraph() {
        assert_eq!(default_break("One\n\nTwo. Three", Some(3)), Some(3));
        assert_eq!(default_break("One. Two\n\nThree", Some(8)), Some(4));
        assert_eq!(default_break("No period", Some(9)), Some(9));
    }

    #[test]
    fn markdown_code_spans_do_not_end_sentences() {
        let text = "Call `x. y` first. Then";
        assert_eq!(sentence_break(None, true, text, None), Some(18));
        assert_eq!(sentence_break(None, false, text, None), Some(8));
    }

    #[test]
    fn iterator_boundary_inside_text_is_taken() {
        let mut it = SimpleSentenceIterator::new();
        let text = "First one. Second one.";
        assert_eq!(sentence_break(Some(&mut it), false, text, None), Some(11));
    }

    fn node_at(pos: u32, build: impl FnOnce(&mut DocTreeMaker) -> DocNode) -> DocNode {
        let mut m = DocTreeMaker::new();
        m.at(TextSize::from(pos));
        build(&mut m)
    }

    #[test]
    fn end_boundary_confirmed_by_following_text() {
        let mut it = SimpleSentenceIterator::new();
        let next = node_at(5, |m| m.new_text_tree("Two").into());
        assert_eq!(sentence_break(Some(&mut it), false, "One. ", Some(&next)), Some(5));
    }

    #[test]
    fn end_boundary_confirmed_by_following_markdown() {
        let mut it = SimpleSentenceIterator::new();
        let next = node_at(16, |m| m.new_markdown_tree("Then").into());
        let text = "See `a.b` here. ";
        assert_eq!(sentence_break(Some(&mut it), true, text, Some(&next)), Some(16));
    }

    #[test]
    fn end_boundary_trusted_before_block_element() {
        let mut it = SimpleSentenceIterator::new();
        let para = node_at(7, |m| m.new_start_element_tree("p", vec![], false).into());
        assert_eq!(sentence_break(Some(&mut it), false, "Summary", Some(&para)), Some(7));
    }

    #[test]
    fn end_boundary_decided_by_litmus_sentence() {
        let mut it = SimpleSentenceIterator::new();
        let code = node_at(4, |m| {
            let body = m.at(TextSize::from(11)).new_text_tree("x");
            m.at(TextSize::from(4)).new_code_tree(body).into()
        });
        assert_eq!(sentence_break(Some(&mut it), false, "Hi. ", Some(&code)), Some(4));

        // The joined text reads "Hi. there", an abbreviation, but the text on
        // its own still ends a sentence.
        let lower = node_at(4, |m| m.new_text_tree("there").into());
        assert_eq!(sentence_break(Some(&mut it), false, "Hi. ", Some(&lower)), Some(4));
    }

    #[test]
    fn unfinished_sentence_continues_into_next_node() {
        let mut it = SimpleSentenceIterator::new();
        let bold = node_at(5, |m| m.new_start_element_tree("b", vec![], false).into());
        assert_eq!(sentence_break(Some(&mut it), false, "Hello", Some(&bold)), None);

        let text = node_at(5, |m| m.new_text_tree(" world and more").into());
        assert_eq!(sentence_break(Some(&mut it), false, "Hello", Some(&text)), None);
    }

    /// Reports one fixed offset whatever the text.
    struct FixedOffset(usize);

    impl BreakIterator for FixedOffset {
        fn set_text(&mut self, _text: &str) {}

        fn next(&mut self) -> Option<usize> {
            Some(self.0)
        }
    }

    #[test]
    fn offsets_off_the_text_are_ignored() {
        let mut past_end = FixedOffset(100);
        assert_eq!(sentence_break(Some(&mut past_end), false, "Short.", None), None);

        let mut mid_char = FixedOffset(2);
        assert_eq!(sentence_break(Some(&mut mid_char), false, "héllo. x", None), None);

        let mut inside = FixedOffset(3);
        assert_eq!(sentence_break(Some(&mut inside), false, "héllo. x", None), Some(3));
    }

    #[test]
    fn boundary_at_end_without_next_node_is_taken() {
        let mut it = SimpleSentenceIterator::new();
        assert_eq!(sentence_break(Some(&mut it), false, "Only one", None), Some(8));
    }
}
