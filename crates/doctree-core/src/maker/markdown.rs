//! Markdown helpers for sentence breaking

use std::sync::LazyLock;

use regex::Regex;

/// Stands in for a `.` that cannot end a sentence. Single byte, so offsets
/// into the masked text are offsets into the original.
const PLACEHOLDER: char = '_';

/// A newline that starts a new block: a blank line, a list item, a heading,
/// a block quote, a fence or a thematic break.
static END_OF_PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)\n(?:[ \t]*\n| {0,3}(?:[-+*][ \t]|\d{1,9}[.)][ \t]|#{1,6}(?:[ \t]|$)|>|```|~~~|(?:[-*_][ \t]*){3,}$))",
    )
    .unwrap()
});

/// `[text](target)`, `[text][label]` and bare `[text]`.
static LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[[^\]\n]*\](?:\([^)\n]*\)|\[[^\]\n]*\])?").unwrap()
});

/// Offset of the newline that ends the first paragraph, if there is one.
pub(crate) fn end_of_paragraph(text: &str) -> Option<usize> {
    END_OF_PARAGRAPH.find(text).map(|m| m.start())
}

/// Replaces periods inside code spans and link constructs.
pub(crate) fn mask_periods(text: &str) -> String {
    let mut masked: Vec<u8> = text.as_bytes().to_vec();
    let mut mask = |from: usize, to: usize| {
        for byte in &mut masked[from..to] {
            if *byte == b'.' {
                *byte = PLACEHOLDER as u8;
            }
        }
    };

    for (start, end) in code_spans(text) {
        mask(start, end);
    }
    for m in LINK.find_iter(text) {
        mask(m.start(), m.end());
    }

    // Only ASCII '.' bytes were replaced by ASCII bytes.
    String::from_utf8(masked).unwrap_or_else(|_| text.to_string())
}

/// Byte ranges of backtick code spans. A span opened by N backticks is
/// closed by the next run of exactly N backticks; unclosed runs are literal.
fn code_spans(text: &str) -> Vec<(usize, usize)> {
    let bytes = text.as_bytes();
    let run_at = |i: usize| bytes[i..].iter().take_while(|&&b| b == b'`').count();

    let mut spans = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }
        let open = run_at(i);
        let mut j = i + open;
        let mut close = None;
        while j < bytes.len() {
            if bytes[j] == b'`' {
                let run = run_at(j);
                if run == open {
                    close = Some(j + run);
                    break;
                }
                j += run;
            } else {
                j += 1;
            }
        }
        match close {
            Some(end) => {
                spans.push((i, end));
                i = end;
            }
            None => i += open,
        }
    }
    spans
}
