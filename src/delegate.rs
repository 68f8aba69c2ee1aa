//!
//! Application callbacks for the phone input.
//!
//! Every callback has a stated default, so implementations override
//! only what they care about. Veto callbacks default to allow.
//!

use crate::reformat::EditRequest;
use dyn_clone::{clone_box, DynClone};
use std::fmt::Debug;

/// Callbacks around the edit cycle of a [PhoneInputState](crate::PhoneInputState).
pub trait FieldDelegate: DynClone + Debug {
    /// Called before an edit is applied. Returning false drops the
    /// edit, text and cursor stay untouched.
    fn should_change(&self, _edit: &EditRequest<'_>) -> bool {
        true
    }

    /// Called after an edit or a clear has been committed.
    fn did_change(&self, _text: &str) {}

    /// Called before the field is cleared. Returning false keeps the
    /// content.
    fn should_clear(&self) -> bool {
        true
    }

    /// Called when Enter is pressed in the field. Returning false
    /// consumes the key, returning true leaves it to the application.
    fn should_submit(&self) -> bool {
        true
    }

    /// The widget gained focus.
    fn did_begin_editing(&self) {}

    /// The widget lost focus.
    fn did_end_editing(&self) {}
}

impl Clone for Box<dyn FieldDelegate> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

impl FieldDelegate for Box<dyn FieldDelegate> {
    fn should_change(&self, edit: &EditRequest<'_>) -> bool {
        self.as_ref().should_change(edit)
    }

    fn did_change(&self, text: &str) {
        self.as_ref().did_change(text)
    }

    fn should_clear(&self) -> bool {
        self.as_ref().should_clear()
    }

    fn should_submit(&self) -> bool {
        self.as_ref().should_submit()
    }

    fn did_begin_editing(&self) {
        self.as_ref().did_begin_editing()
    }

    fn did_end_editing(&self) {
        self.as_ref().did_end_editing()
    }
}
