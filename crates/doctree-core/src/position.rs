//! Comment-relative and file-relative positions
//!
//! Every node stores its start as a byte offset into the text of the comment
//! it was parsed from. The comment owns a table that maps each of those
//! offsets back to an offset in the enclosing source file; stripping `/**`,
//! `*/` and the `*` continuation markers makes the two drift apart.
//!
//! "No position" is always `None`, never zero.

use std::sync::Arc;

use text_size::{TextLen, TextSize};

use crate::Result;
use crate::error::DocTreeError;

/// Text of one structured comment plus the file offset of each of its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceComment {
    text: Box<str>,
    /// One entry per byte of `text`, plus a final entry for the end of text.
    offsets: Box<[TextSize]>,
}

impl SourceComment {
    /// Creates a comment from its text and an explicit offset table.
    ///
    /// The table needs one entry per byte, optionally followed by one entry
    /// for the end-of-text position. When that entry is missing it is derived
    /// from the last byte.
    pub fn new(text: impl Into<Box<str>>, offsets: Vec<TextSize>) -> Result<Self> {
        let text = text.into();
        let len = text.len();
        let mut offsets = offsets;
        if offsets.len() == len && len > 0 {
            let last = offsets[len - 1];
            offsets.push(last + TextSize::from(1));
        }
        if offsets.len() != len + 1 {
            return Err(DocTreeError::InvalidOffsetTable {
                expected: len + 1,
                actual: offsets.len(),
            });
        }
        Ok(Self {
            text,
            offsets: offsets.into_boxed_slice(),
        })
    }

    /// Creates a comment whose text sits unchanged in the file at `start`.
    pub fn contiguous(text: impl Into<Box<str>>, start: TextSize) -> Self {
        let text = text.into();
        let offsets = (0..=text.len())
            .map(|i| start + TextSize::from(i as u32))
            .collect();
        Self { text, offsets }
    }

    /// Strips the delimiters of a `/** ... */` block comment found at file
    /// offset `start`, keeping track of where every surviving byte came from.
    ///
    /// On continuation lines the leading blanks, the run of `*` and a single
    /// following space are removed.
    pub fn from_block_comment(raw: &str, start: TextSize) -> Self {
        let bytes = raw.as_bytes();
        let mut begin = 0usize;
        let mut end = raw.len();
        if raw.starts_with("/**") {
            begin = 3;
            while begin < end && bytes[begin] == b'*' {
                begin += 1;
            }
        }
        if end >= begin + 2 && raw[begin..end].ends_with("*/") {
            end -= 2;
        }

        let mut text = String::with_capacity(end - begin);
        let mut offsets = Vec::with_capacity(end - begin + 1);
        let keep = |from: usize, to: usize, text: &mut String, offsets: &mut Vec<TextSize>| {
            text.push_str(&raw[from..to]);
            offsets.extend((from..to).map(|i| start + TextSize::from(i as u32)));
        };

        let mut i = begin;
        let mut at_line_start = false;
        while i < end {
            if at_line_start {
                let mut j = i;
                while j < end && matches!(bytes[j], b' ' | b'\t') {
                    j += 1;
                }
                if j < end && bytes[j] == b'*' {
                    while j < end && bytes[j] == b'*' {
                        j += 1;
                    }
                    if j < end && bytes[j] == b' ' {
                        j += 1;
                    }
                    i = j;
                } else if j == end {
                    // blank line in front of the closing delimiter
                    i = j;
                }
                at_line_start = false;
                continue;
            }
            let line_end = raw[i..end].find('\n').map_or(end, |n| i + n + 1);
            keep(i, line_end, &mut text, &mut offsets);
            at_line_start = raw[i..line_end].ends_with('\n');
            i = line_end;
        }

        let tail = offsets
            .last()
            .map_or(start + TextSize::from(begin as u32), |last| {
                *last + TextSize::from(1)
            });
        offsets.push(tail);

        Self {
            text: text.into_boxed_str(),
            offsets: offsets.into_boxed_slice(),
        }
    }

    /// The comment text that node positions are relative to.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> TextSize {
        self.text.text_len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Maps a comment-relative offset to a file offset.
    pub fn source_pos(&self, offset: TextSize) -> Option<TextSize> {
        self.offsets.get(usize::from(offset)).copied()
    }
}

/// Where a doc comment tree came from.
///
/// Trees built by tools rather than parsed from a file are `Synthetic`; they
/// have no file positions to report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CommentOrigin {
    Source(Arc<SourceComment>),
    #[default]
    Synthetic,
}

impl CommentOrigin {
    /// Maps a comment-relative offset to a file offset.
    ///
    /// Returns `None` for an unset offset, for an offset past the comment,
    /// and always for synthetic trees.
    pub fn source_pos(&self, offset: Option<TextSize>) -> Option<TextSize> {
        match self {
            CommentOrigin::Source(comment) => offset.and_then(|it| comment.source_pos(it)),
            CommentOrigin::Synthetic => None,
        }
    }

    pub fn comment(&self) -> Option<&Arc<SourceComment>> {
        match self {
            CommentOrigin::Source(comment) => Some(comment),
            CommentOrigin::Synthetic => None,
        }
    }

    pub fn is_synthetic(&self) -> bool {
        matches!(self, CommentOrigin::Synthetic)
    }
}

impl From<Arc<SourceComment>> for CommentOrigin {
    fn from(comment: Arc<SourceComment>) -> Self {
        CommentOrigin::Source(comment)
    }
}

impl From<SourceComment> for CommentOrigin {
    fn from(comment: SourceComment) -> Self {
        CommentOrigin::Source(Arc::new(comment))
    }
}
