#![doc = include_str!("../readme.md")]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::collapsible_if)]

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::ops::Range;

mod anchor;
mod classify;
mod delegate;
mod format;
mod phone_input;
mod reformat;

pub use anchor::{extract_anchor, locate_anchor, CursorAnchor};
pub use classify::CharClass;
pub use delegate::FieldDelegate;
pub use format::{NullFormat, PartialFormat, PhoneValidate};
pub use phone_input::{
    handle_events, handle_mouse_events, handle_readonly_events, PhoneInput, PhoneInputState,
};
pub use reformat::{apply_edit, EditRequest, EditResult};

use crate::_private::NonExhaustive;
use ratatui::style::Style;
use ratatui::widgets::Block;

pub mod event {
    //!
    //! Event-handler traits and keybindings.
    //!

    pub use rat_event::*;

    /// Runs only the navigation events, not any editing.
    #[derive(Debug)]
    pub struct ReadOnly;

    /// Result of event handling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum TextOutcome {
        /// The given event has not been used at all.
        Continue,
        /// The event has been recognized, but the result was nil.
        /// Further processing for this event may stop.
        Unchanged,
        /// The event has been recognized and there is some change
        /// due to it.
        /// Further processing for this event may stop.
        /// Rendering the ui is advised.
        Changed,
        /// Text content has changed.
        TextChanged,
    }

    impl ConsumedEvent for TextOutcome {
        fn is_consumed(&self) -> bool {
            *self != TextOutcome::Continue
        }
    }

    // Useful for converting most navigation/edit results.
    impl From<bool> for TextOutcome {
        fn from(value: bool) -> Self {
            if value {
                TextOutcome::Changed
            } else {
                TextOutcome::Unchanged
            }
        }
    }

    impl From<Outcome> for TextOutcome {
        fn from(value: Outcome) -> Self {
            match value {
                Outcome::Continue => TextOutcome::Continue,
                Outcome::Unchanged => TextOutcome::Unchanged,
                Outcome::Changed => TextOutcome::Changed,
            }
        }
    }

    impl From<TextOutcome> for Outcome {
        fn from(value: TextOutcome) -> Self {
            match value {
                TextOutcome::Continue => Outcome::Continue,
                TextOutcome::Unchanged => Outcome::Unchanged,
                TextOutcome::Changed => Outcome::Changed,
                TextOutcome::TextChanged => Outcome::Changed,
            }
        }
    }
}

/// Trait for the widget that can show a text cursor.
///
/// Terminals only have one blinking cursor, the widget that
/// currently has the focus can report a position for it here.
pub trait HasScreenCursor {
    /// The cursor position as an absolute screen position, if the
    /// widget is focused and the cursor is visible.
    fn screen_cursor(&self) -> Option<(u16, u16)>;
}

/// Column/cursor type. Offsets are grapheme counts, not bytes.
#[allow(non_camel_case_types)]
pub type upos_type = u32;

/// Combined style for the widget.
#[derive(Debug, Clone)]
pub struct PhoneStyle {
    pub style: Style,
    pub focus: Option<Style>,
    pub invalid: Option<Style>,

    pub block: Option<Block<'static>>,
    pub border_style: Option<Style>,

    pub non_exhaustive: NonExhaustive,
}

impl Default for PhoneStyle {
    fn default() -> Self {
        Self {
            style: Default::default(),
            focus: None,
            invalid: None,
            block: None,
            border_style: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

/// Error type for the fallible text ops.
#[derive(Debug, PartialEq)]
pub enum PhoneTextError {
    /// Cursor position past the end of the text.
    /// Contains the position attempted and the text length.
    CharIndexOutOfBounds(upos_type, upos_type),
    /// Char-range partially or fully out of bounds.
    /// Contains the range attempted and the text length.
    CharRangeOutOfBounds(Range<upos_type>, upos_type),
    /// Reversed char-range (end < start).
    CharRangeInvalid(upos_type, upos_type),
}

impl Display for PhoneTextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for PhoneTextError {}

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
