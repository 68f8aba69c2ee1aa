//!
//! Cursor re-anchoring across a text rewrite.
//!
//! When the formatter rewrites the field, offsets shift arbitrarily as
//! punctuation appears and disappears. To keep the cursor on the
//! character the user was editing, take the first number-like character
//! at/after the cursor and count how many times it occurs up to the end
//! of the string. Separators move around during a reformat, the digit
//! suffix mostly doesn't, so that (character, count-from-end) pair can
//! be re-found in the rewritten text.
//!
//! This is a best-effort heuristic, not a proven invariant. It holds up
//! for left-to-right digit entry; a paste in the middle of a run of
//! repeated digits can land the cursor on the wrong occurrence.
//!

use crate::classify::CharClass;
use crate::upos_type;
use unicode_segmentation::UnicodeSegmentation;

/// Cursor position expressed as an anchor that survives reformatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorAnchor {
    /// The number-like character right at/after the cursor.
    pub c: char,
    /// 1-based count of occurrences of `c` from the anchor position
    /// through the end of the text, the anchor itself included.
    pub rank_from_end: u32,
}

/// Find the anchor for a cursor position.
///
/// Scans forward from `cursor` (inclusive), skipping separators, until
/// the first number-like character. Returns None if there is none, i.e.
/// the cursor sits past the last digit/prefix symbol.
///
/// `cursor` is a grapheme offset, `0 <= cursor <= len`.
pub fn extract_anchor(text: &str, cursor: upos_type, class: &CharClass) -> Option<CursorAnchor> {
    let mut tail = text.graphemes(true).skip(cursor as usize);

    let mut anchor = None;
    for g in tail.by_ref() {
        if let Some(c) = class.number_like_grapheme(g) {
            anchor = Some(c);
            break;
        }
    }
    let c = anchor?;

    let mut buf = [0u8; 4];
    let cs = c.encode_utf8(&mut buf);
    // the anchor itself counts too.
    let rank_from_end = 1 + tail.filter(|g| *g == cs).count() as u32;

    Some(CursorAnchor { c, rank_from_end })
}

/// Find the cursor position for an anchor in the rewritten text.
///
/// Scans backward from the end, counting occurrences of the anchor
/// character. The position whose count-from-end matches the anchor's
/// rank is the new cursor: the anchor character sits right after it,
/// same as before the rewrite.
///
/// Returns None if the text contains fewer occurrences than the rank
/// asks for. The caller decides on a fallback then, end-of-text being
/// the sensible default.
pub fn locate_anchor(text: &str, anchor: &CursorAnchor) -> Option<upos_type> {
    let mut buf = [0u8; 4];
    let cs = anchor.c.encode_utf8(&mut buf);

    let len = text.graphemes(true).count();

    let mut count_from_end = 0;
    for (i, g) in text.graphemes(true).rev().enumerate() {
        if g == cs {
            count_from_end += 1;
            if count_from_end == anchor.rank_from_end {
                return Some((len - 1 - i) as upos_type);
            }
        }
    }

    None
}
