//!
//! The edit pipeline: splice the proposed change into the text, run the
//! formatter, relocate the cursor.
//!
//! This is a pure function of its inputs. The widget owns text and
//! cursor and commits the result; nothing here touches UI state.
//!

use crate::anchor::{extract_anchor, locate_anchor};
use crate::classify::CharClass;
use crate::format::PartialFormat;
use crate::upos_type;
use log::debug;
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// One proposed text change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest<'a> {
    /// Text before the edit.
    pub text: &'a str,
    /// Cursor before the edit. Grapheme offset, `0..=len`.
    pub cursor: upos_type,
    /// Replaced range, half-open, in grapheme offsets.
    /// Empty range = plain insert.
    pub range: Range<upos_type>,
    /// Replacement. Empty = deletion, one char = typed key,
    /// longer = paste.
    pub replacement: &'a str,
}

/// Result of one edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// The new text. The caller commits this as the full field
    /// content; the edit has already been applied, never apply the
    /// request's replacement again on top.
    pub text: String,
    /// The new cursor. None if the cursor couldn't be re-anchored;
    /// the caller falls back to its default placement, usually
    /// end-of-text.
    pub cursor: Option<upos_type>,
}

/// Apply one edit: anchor the cursor, splice, reformat, re-locate.
///
/// Deleting a single separator skips the reformat and commits the
/// splice as-is. The deleted character is usually punctuation the
/// formatter inserted itself; reformatting would put it right back
/// and backspace would appear to do nothing.
pub fn apply_edit(
    req: &EditRequest<'_>,
    class: &CharClass,
    format: &dyn PartialFormat,
) -> EditResult {
    let anchor = extract_anchor(req.text, req.cursor, class);

    let splice = splice(req.text, req.range.clone(), req.replacement);

    let separator_deleted = req.replacement.is_empty()
        && req.range.end == req.range.start + 1
        && grapheme_at(req.text, req.range.start)
            .map(|g| class.number_like_grapheme(g).is_none())
            .unwrap_or(false);

    let text = if separator_deleted {
        splice
    } else {
        format.format_partial(&splice)
    };

    let cursor = anchor.and_then(|a| locate_anchor(&text, &a));

    debug!(
        "edit {:?}+{:?} -> {:?} cursor {:?}",
        req.range, req.replacement, text, cursor
    );

    EditResult { text, cursor }
}

/// Replace a grapheme range with the replacement, no reformatting.
pub(crate) fn splice(text: &str, range: Range<upos_type>, replacement: &str) -> String {
    let start = byte_of(text, range.start);
    let end = byte_of(text, range.end);

    let mut buf = String::with_capacity(text.len() + replacement.len());
    buf.push_str(&text[..start]);
    buf.push_str(replacement);
    buf.push_str(&text[end..]);
    buf
}

/// Byte offset of a grapheme offset. Clamps to the end of the text.
pub(crate) fn byte_of(text: &str, pos: upos_type) -> usize {
    text.grapheme_indices(true)
        .nth(pos as usize)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

/// The grapheme at an offset.
pub(crate) fn grapheme_at(text: &str, pos: upos_type) -> Option<&str> {
    text.graphemes(true).nth(pos as usize)
}
