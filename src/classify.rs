//!
//! Character classification for phone number text.
//!
//! Splits the alphabet in two: digits and prefix symbols are
//! *number-like*, everything else is a *separator*. Extraction and
//! location of the cursor anchor must share this exact partition,
//! otherwise the anchor is meaningless.
//!

/// The number-like/separator partition.
///
/// Number-like are the decimal digits plus the configured prefix
/// symbols. Default prefix symbols are `+` and the fullwidth `＋`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharClass {
    prefix: Vec<char>,
}

impl Default for CharClass {
    fn default() -> Self {
        Self {
            prefix: vec!['+', '＋'],
        }
    }
}

impl CharClass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different set of prefix symbols.
    /// An empty set leaves only the digits as number-like.
    pub fn with_prefix(prefix: impl IntoIterator<Item = char>) -> Self {
        Self {
            prefix: prefix.into_iter().collect(),
        }
    }

    /// The configured prefix symbols.
    pub fn prefix(&self) -> &[char] {
        &self.prefix
    }

    /// Digit or prefix symbol.
    #[inline]
    pub fn is_number_like(&self, c: char) -> bool {
        c.is_ascii_digit() || self.prefix.contains(&c)
    }

    /// Anything that is not number-like. Spaces, dashes, parens and
    /// whatever other glyphs a formatter emits.
    #[inline]
    pub fn is_separator(&self, c: char) -> bool {
        !self.is_number_like(c)
    }

    /// Classify a grapheme. Returns the char if the grapheme is a
    /// single number-like scalar, None for any separator.
    #[inline]
    pub fn number_like_grapheme(&self, g: &str) -> Option<char> {
        let mut it = g.chars();
        match (it.next(), it.next()) {
            (Some(c), None) if self.is_number_like(c) => Some(c),
            _ => None,
        }
    }
}
