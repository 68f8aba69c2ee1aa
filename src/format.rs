//!
//! There are several libphonenumber ports around, and none of them is
//! an obvious default.
//!
//! Provides the PartialFormat trait to connect the widget with the
//! phone formatting library of your choice, and PhoneValidate for the
//! upward-facing validity check.
//!

use dyn_clone::{clone_box, DynClone};
use std::fmt::Debug;

/// An as-you-type formatter for partial phone numbers.
///
/// Turns an in-progress digit string into a punctuated, region-styled
/// display string. Any region/prefix configuration lives inside the
/// implementation; the widget just calls it with the current splice.
///
/// Implementations must be pure and idempotent for a fixed
/// configuration: `format_partial(format_partial(t)) ==
/// format_partial(t)`. Cursor re-anchoring relies on that.
pub trait PartialFormat: DynClone + Debug {
    /// Format a raw or partially formatted number for display.
    fn format_partial(&self, text: &str) -> String;
}

/// Validity check for a phone number, backed by some external parser.
pub trait PhoneValidate: DynClone + Debug {
    /// Does the text parse as a valid number?
    fn is_valid(&self, text: &str) -> bool;
}

/// Identity formatter. The default, shows the raw input unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFormat;

impl PartialFormat for NullFormat {
    fn format_partial(&self, text: &str) -> String {
        text.to_string()
    }
}

impl Clone for Box<dyn PartialFormat> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

impl PartialFormat for Box<dyn PartialFormat> {
    fn format_partial(&self, text: &str) -> String {
        self.as_ref().format_partial(text)
    }
}

impl Clone for Box<dyn PhoneValidate> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

impl PhoneValidate for Box<dyn PhoneValidate> {
    fn is_valid(&self, text: &str) -> bool {
        self.as_ref().is_valid(text)
    }
}
