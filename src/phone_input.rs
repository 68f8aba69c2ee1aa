//!
//! Phone number input widget.
//!
//! * Runs every edit through the injected [PartialFormat] formatter.
//! * Keeps the cursor on the character being edited while the
//!   formatter moves punctuation around.
//! * Backspace over formatter punctuation removes it for real.
//! * Invalid flag, validity check via [PhoneValidate].
//!
//! The visual cursor must be set separately after rendering.
//! It is accessible as [PhoneInputState::screen_cursor()] after rendering.
//!
//! Event handling by calling the freestanding fn [handle_events].
//! There's [handle_mouse_events] if you want to override the default key
//! bindings but keep the mouse behaviour.
//!

use crate::_private::NonExhaustive;
use crate::classify::CharClass;
use crate::delegate::FieldDelegate;
use crate::event::{ReadOnly, TextOutcome};
use crate::format::{NullFormat, PartialFormat, PhoneValidate};
use crate::reformat::{apply_edit, EditRequest};
use crate::{upos_type, HasScreenCursor, PhoneStyle, PhoneTextError};
use rat_event::util::MouseFlags;
use rat_event::{ct_event, HandleEvent, MouseOnly, Regular};
use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use rat_reloc::{relocate_area, RelocatableState};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::prelude::BlockExt;
use ratatui::style::{Style, Stylize};
use ratatui::widgets::{Block, StatefulWidget, Widget};
use std::cmp::min;
use std::ops::Range;
use unicode_display_width::width as unicode_width;
use unicode_segmentation::UnicodeSegmentation;

/// Phone number input widget.
///
/// # Stateful
/// This widget implements [`StatefulWidget`], you can use it with
/// [`PhoneInputState`] to handle common actions.
#[derive(Debug, Default, Clone)]
pub struct PhoneInput<'a> {
    block: Option<Block<'a>>,
    style: Style,
    focus_style: Option<Style>,
    invalid_style: Option<Style>,
}

/// State & event handling.
#[derive(Debug)]
pub struct PhoneInputState {
    /// The whole area with block.
    /// __read only__ renewed with each render.
    pub area: Rect,
    /// Area inside a possible block.
    /// __read only__ renewed with each render.
    pub inner: Rect,

    /// Display offset.
    /// __read+write__
    pub offset: upos_type,

    /// Display as invalid.
    /// __read only__ use [set_invalid](PhoneInputState::set_invalid)
    pub invalid: bool,

    /// Current focus state.
    /// __read + write__ But don't write it.
    pub focus: FocusFlag,

    /// Mouse selection in progress.
    /// __read+write__
    pub mouse: MouseFlags,

    /// The displayed text. Owned here, written only through the edit ops.
    text: String,
    /// Cursor, as a grapheme offset into text.
    cursor: upos_type,
    /// Correct the offset at the next render so the cursor is visible.
    scroll_to_cursor: bool,
    /// Did this widget already report did_begin_editing?
    editing: bool,

    /// Number-like/separator partition.
    char_class: CharClass,
    /// The as-you-type formatter.
    formatter: Box<dyn PartialFormat>,
    /// Validity check, if any.
    validator: Option<Box<dyn PhoneValidate>>,
    /// Application callbacks, if any.
    delegate: Option<Box<dyn FieldDelegate>>,

    /// Construct with `..Default::default()`
    pub non_exhaustive: NonExhaustive,
}

impl<'a> PhoneInput<'a> {
    /// New widget.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the combined style.
    #[inline]
    pub fn styles(mut self, styles: PhoneStyle) -> Self {
        self.style = styles.style;
        if styles.focus.is_some() {
            self.focus_style = styles.focus;
        }
        if styles.invalid.is_some() {
            self.invalid_style = styles.invalid;
        }
        self.block = self.block.map(|v| v.style(self.style));
        if let Some(border_style) = styles.border_style {
            self.block = self.block.map(|v| v.border_style(border_style));
        }
        if styles.block.is_some() {
            self.block = styles.block;
        }
        self
    }

    /// Base text style.
    #[inline]
    pub fn style(mut self, style: impl Into<Style>) -> Self {
        self.style = style.into();
        self
    }

    /// Style when focused.
    #[inline]
    pub fn focus_style(mut self, style: impl Into<Style>) -> Self {
        self.focus_style = Some(style.into());
        self
    }

    /// Style for the invalid indicator.
    /// This is patched onto either base_style or focus_style
    #[inline]
    pub fn invalid_style(mut self, style: impl Into<Style>) -> Self {
        self.invalid_style = Some(style.into());
        self
    }

    /// Block.
    #[inline]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    /// Preferred width: 0
    pub fn width(&self) -> u16 {
        0
    }

    /// Preferred height: 1
    pub fn height(&self) -> u16 {
        1
    }
}

impl<'a> StatefulWidget for &PhoneInput<'a> {
    type State = PhoneInputState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(self, area, buf, state);
    }
}

impl StatefulWidget for PhoneInput<'_> {
    type State = PhoneInputState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        render_ref(&self, area, buf, state);
    }
}

fn render_ref(widget: &PhoneInput<'_>, area: Rect, buf: &mut Buffer, state: &mut PhoneInputState) {
    state.area = area;
    state.inner = widget.block.inner_if_some(area);

    if state.scroll_to_cursor {
        state.scroll_to_cursor = false;

        let c = state.cursor;
        let o = state.offset;
        let w = state.inner.width as upos_type;

        if w > 0 {
            let mut no = if c < o {
                c
            } else if c >= o + w {
                c.saturating_sub(w)
            } else {
                o
            };
            // correct by one at right margin. block cursors appear as part of the
            // right border otherwise.
            if c == no + w {
                no = no.saturating_add(1);
            }
            state.offset = no;
        } else {
            // no render area. don't do nothing.
        }
    }

    let style = widget.style;
    let focus_style = if let Some(focus_style) = widget.focus_style {
        focus_style
    } else {
        style
    };
    let invalid_style = if let Some(invalid_style) = widget.invalid_style {
        invalid_style
    } else {
        Style::default().red()
    };

    let style = if state.focus.get() {
        if state.invalid {
            style.patch(focus_style).patch(invalid_style)
        } else {
            style.patch(focus_style)
        }
    } else {
        if state.invalid {
            style.patch(invalid_style)
        } else {
            style
        }
    };

    // set base style
    if let Some(block) = &widget.block {
        block.render(area, buf);
    }
    buf.set_style(state.inner, style);

    if state.inner.width == 0 || state.inner.height == 0 {
        // noop
        return;
    }

    let mut scx = 0u16;
    for g in state.text.graphemes(true).skip(state.offset as usize) {
        let w = unicode_width(g) as u16;
        if w == 0 {
            continue;
        }
        if scx + w > state.inner.width {
            break;
        }

        if let Some(cell) = buf.cell_mut((state.inner.x + scx, state.inner.y)) {
            cell.set_symbol(g);
        }
        // clear the rest of the cells to avoid interferences.
        for d in 1..w {
            if let Some(cell) = buf.cell_mut((state.inner.x + scx + d, state.inner.y)) {
                cell.reset();
                cell.set_style(style);
            }
        }

        scx += w;
    }
}

impl Clone for PhoneInputState {
    fn clone(&self) -> Self {
        Self {
            area: self.area,
            inner: self.inner,
            offset: self.offset,
            invalid: self.invalid,
            focus: FocusFlag::named(self.focus.name()),
            mouse: Default::default(),
            text: self.text.clone(),
            cursor: self.cursor,
            scroll_to_cursor: self.scroll_to_cursor,
            editing: false,
            char_class: self.char_class.clone(),
            formatter: self.formatter.clone(),
            validator: self.validator.clone(),
            delegate: self.delegate.clone(),
            non_exhaustive: NonExhaustive,
        }
    }
}

impl Default for PhoneInputState {
    fn default() -> Self {
        Self {
            area: Default::default(),
            inner: Default::default(),
            offset: 0,
            invalid: false,
            focus: Default::default(),
            mouse: Default::default(),
            text: Default::default(),
            cursor: 0,
            scroll_to_cursor: false,
            editing: false,
            char_class: Default::default(),
            formatter: Box::new(NullFormat),
            validator: None,
            delegate: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl HasFocus for PhoneInputState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    #[inline]
    fn focus(&self) -> FocusFlag {
        self.focus.clone()
    }

    #[inline]
    fn area(&self) -> Rect {
        self.area
    }
}

impl RelocatableState for PhoneInputState {
    fn relocate(&mut self, shift: (i16, i16), clip: Rect) {
        self.area = relocate_area(self.area, shift, clip);
        self.inner = relocate_area(self.inner, shift, clip);
    }
}

impl PhoneInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: &str) -> Self {
        Self {
            focus: FocusFlag::named(name),
            ..Default::default()
        }
    }

    /// Renders the widget in invalid style.
    #[inline]
    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    /// Renders the widget in invalid style.
    #[inline]
    pub fn get_invalid(&self) -> bool {
        self.invalid
    }
}

impl PhoneInputState {
    /// Formatter used for every edit.
    /// Default is [NullFormat], which shows the raw input.
    ///
    /// The current text is reformatted with the new formatter right
    /// away, the cursor stays with the character it was on.
    #[inline]
    pub fn set_formatter(&mut self, format: impl PartialFormat + 'static) {
        self.formatter = Box::new(format);
        self.reformat();
    }

    /// Formatter used for every edit.
    #[inline]
    pub fn formatter(&self) -> &dyn PartialFormat {
        self.formatter.as_ref()
    }

    /// Validity check used by [is_valid](PhoneInputState::is_valid).
    #[inline]
    pub fn set_validator(&mut self, validate: Option<impl PhoneValidate + 'static>) {
        match validate {
            None => self.validator = None,
            Some(v) => self.validator = Some(Box::new(v)),
        }
    }

    /// Validity check used by [is_valid](PhoneInputState::is_valid).
    #[inline]
    pub fn validator(&self) -> Option<&dyn PhoneValidate> {
        self.validator.as_deref()
    }

    /// Application callbacks.
    #[inline]
    pub fn set_delegate(&mut self, delegate: Option<impl FieldDelegate + 'static>) {
        match delegate {
            None => self.delegate = None,
            Some(v) => self.delegate = Some(Box::new(v)),
        }
    }

    /// Application callbacks.
    #[inline]
    pub fn delegate(&self) -> Option<&dyn FieldDelegate> {
        self.delegate.as_deref()
    }

    /// Change the prefix symbols that count as number-like.
    /// Default is `+` and `＋`.
    #[inline]
    pub fn set_prefix_chars(&mut self, prefix: impl IntoIterator<Item = char>) {
        self.char_class = CharClass::with_prefix(prefix);
    }

    /// The number-like/separator partition in use.
    #[inline]
    pub fn char_class(&self) -> &CharClass {
        &self.char_class
    }
}

impl PhoneInputState {
    /// The displayed text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Only the number-like characters of the text, punctuation
    /// stripped. This is what a formatter gets fed anyway.
    pub fn raw_text(&self) -> String {
        self.text
            .chars()
            .filter(|c| self.char_class.is_number_like(*c))
            .collect()
    }

    /// Replace the whole content. The text runs through the
    /// formatter, the cursor goes to the end.
    pub fn set_text(&mut self, text: impl AsRef<str>) {
        self.text = self.formatter.format_partial(text.as_ref());
        self.cursor = self.len();
        self.offset = 0;
        self.scroll_cursor_to_visible();
    }

    /// Empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Length in grapheme count.
    #[inline]
    pub fn len(&self) -> upos_type {
        self.text.graphemes(true).count() as upos_type
    }

    /// Checks the text with the installed validator.
    /// None if no validator is installed.
    #[inline]
    pub fn is_valid(&self) -> Option<bool> {
        self.validator.as_ref().map(|v| v.is_valid(&self.text))
    }

    /// Cursor position as grapheme offset.
    #[inline]
    pub fn cursor(&self) -> upos_type {
        self.cursor
    }

    /// Set the cursor position. Clamps to the text length.
    pub fn set_cursor(&mut self, cursor: upos_type) -> bool {
        let cursor = min(cursor, self.len());
        let old = self.cursor;
        self.cursor = cursor;
        self.scroll_cursor_to_visible();
        old != cursor
    }

    /// Place the cursor at the default position, the end of the text.
    #[inline]
    pub fn set_default_cursor(&mut self) {
        self.set_cursor(self.len());
    }
}

impl PhoneInputState {
    /// One edit, start to finish: veto-check with the delegate,
    /// anchor/splice/format via [apply_edit], commit text and cursor.
    ///
    /// When the cursor can't be re-anchored it goes to the end of
    /// the text.
    fn edit(&mut self, range: Range<upos_type>, replacement: &str) -> bool {
        let req = EditRequest {
            text: &self.text,
            cursor: self.cursor,
            range,
            replacement,
        };
        if let Some(delegate) = &self.delegate {
            if !delegate.should_change(&req) {
                return false;
            }
        }

        let r = apply_edit(&req, &self.char_class, self.formatter.as_ref());

        let old_cursor = self.cursor;
        let changed = r.text != self.text;
        self.text = r.text;
        self.cursor = match r.cursor {
            Some(c) => c,
            None => self.len(),
        };
        self.scroll_cursor_to_visible();

        if let Some(delegate) = &self.delegate {
            delegate.did_change(&self.text);
        }

        changed || old_cursor != self.cursor
    }

    /// Rerun the formatter over the current text, keeping the cursor
    /// with the character it was on. For formatter config changes.
    pub fn reformat(&mut self) {
        let req = EditRequest {
            text: &self.text,
            cursor: self.cursor,
            range: self.cursor..self.cursor,
            replacement: "",
        };
        let r = apply_edit(&req, &self.char_class, self.formatter.as_ref());
        self.text = r.text;
        self.cursor = match r.cursor {
            Some(c) => c,
            None => self.len(),
        };
        self.scroll_cursor_to_visible();
    }

    /// Insert a char at the current position.
    #[inline]
    pub fn insert_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        let replacement = c.encode_utf8(&mut buf);
        self.edit(self.cursor..self.cursor, replacement)
    }

    /// Insert text at the current position. Pastes go through the
    /// formatter as one edit.
    #[inline]
    pub fn insert_str(&mut self, t: &str) -> bool {
        if t.is_empty() {
            return false;
        }
        self.edit(self.cursor..self.cursor, t)
    }

    /// Delete the char before the cursor.
    ///
    /// If that char is formatter punctuation the deletion is committed
    /// without reformatting, otherwise the formatter would reinsert it
    /// and backspace would appear dead.
    pub fn delete_prev_char(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.edit(self.cursor - 1..self.cursor, "")
    }

    /// Delete the char after the cursor.
    pub fn delete_next_char(&mut self) -> bool {
        if self.cursor >= self.len() {
            return false;
        }
        self.edit(self.cursor..self.cursor + 1, "")
    }

    /// Remove a grapheme range.
    ///
    /// Panic
    /// Panics on an invalid range.
    #[inline]
    pub fn delete_range(&mut self, range: Range<upos_type>) -> bool {
        self.try_delete_range(range).expect("valid-range")
    }

    /// Remove a grapheme range.
    pub fn try_delete_range(&mut self, range: Range<upos_type>) -> Result<bool, PhoneTextError> {
        if range.start > range.end {
            return Err(PhoneTextError::CharRangeInvalid(range.start, range.end));
        }
        if range.end > self.len() {
            return Err(PhoneTextError::CharRangeOutOfBounds(range, self.len()));
        }
        if range.is_empty() {
            return Ok(false);
        }
        Ok(self.edit(range, ""))
    }

    /// Reset to empty.
    /// Consults [FieldDelegate::should_clear].
    pub fn clear(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        if let Some(delegate) = &self.delegate {
            if !delegate.should_clear() {
                return false;
            }
        }

        self.text.clear();
        self.cursor = 0;
        self.offset = 0;
        self.scroll_cursor_to_visible();

        if let Some(delegate) = &self.delegate {
            delegate.did_change(&self.text);
        }
        true
    }
}

impl PhoneInputState {
    /// Move to the previous char.
    #[inline]
    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.set_cursor(self.cursor - 1)
    }

    /// Move to the next char.
    #[inline]
    pub fn move_right(&mut self) -> bool {
        self.set_cursor(self.cursor + 1)
    }

    /// Start of text.
    #[inline]
    pub fn move_to_start(&mut self) -> bool {
        self.set_cursor(0)
    }

    /// End of text.
    #[inline]
    pub fn move_to_end(&mut self) -> bool {
        self.set_cursor(self.len())
    }
}

impl PhoneInputState {
    /// Converts from a widget relative screen coordinate to a grapheme
    /// index. x is the relative screen position.
    pub fn screen_to_col(&self, scx: i16) -> upos_type {
        let ox = self.offset;

        if scx < 0 {
            ox.saturating_sub(scx.unsigned_abs() as upos_type)
        } else if scx as u16 >= self.inner.width {
            min(ox + scx as upos_type, self.len())
        } else {
            let mut col = ox;
            let mut sx = 0u16;
            for g in self.text.graphemes(true).skip(ox as usize) {
                let w = unicode_width(g) as u16;
                if sx + w > scx as u16 {
                    return col;
                }
                sx += w;
                col += 1;
            }
            col
        }
    }

    /// Converts a grapheme based position to a screen position
    /// relative to the widget area.
    pub fn col_to_screen(&self, pos: upos_type) -> Option<u16> {
        let ox = self.offset;

        if pos < ox {
            return None;
        }

        let mut sx = 0u16;
        for g in self
            .text
            .graphemes(true)
            .skip(ox as usize)
            .take((pos - ox) as usize)
        {
            sx += unicode_width(g) as u16;
        }

        if sx < self.inner.width {
            Some(sx)
        } else {
            None
        }
    }

    /// Set the cursor position from a screen position relative to the
    /// origin of the widget. This value can be negative, which selects
    /// a currently not visible position and scrolls to it.
    #[inline]
    pub fn set_screen_cursor(&mut self, cursor: i16) -> bool {
        let cx = self.screen_to_col(cursor);
        self.set_cursor(cx)
    }

    /// Change the offset in a way that the cursor is visible.
    pub fn scroll_cursor_to_visible(&mut self) {
        self.scroll_to_cursor = true;
    }
}

impl HasScreenCursor for PhoneInputState {
    /// The current text cursor as an absolute screen position.
    fn screen_cursor(&self) -> Option<(u16, u16)> {
        if self.is_focused() {
            let cx = self.cursor;
            let ox = self.offset;

            if cx < ox {
                None
            } else if cx > ox + self.inner.width as upos_type {
                None
            } else {
                self.col_to_screen(cx)
                    .map(|sc| (self.inner.x + sc, self.inner.y))
            }
        } else {
            None
        }
    }
}

impl HandleEvent<crossterm::event::Event, Regular, TextOutcome> for PhoneInputState {
    fn handle(&mut self, event: &crossterm::event::Event, _keymap: Regular) -> TextOutcome {
        // small helper ...
        fn tc(r: bool) -> TextOutcome {
            if r {
                TextOutcome::TextChanged
            } else {
                TextOutcome::Unchanged
            }
        }

        // begin/end editing notifications, driven by the focus flag.
        if self.is_focused() != self.editing {
            self.editing = self.is_focused();
            if let Some(delegate) = &self.delegate {
                if self.editing {
                    delegate.did_begin_editing();
                } else {
                    delegate.did_end_editing();
                }
            }
        }

        let mut r = if self.is_focused() {
            match event {
                ct_event!(key press c) | ct_event!(key press SHIFT-c) => tc(self.insert_char(*c)),
                ct_event!(keycode press Backspace) => tc(self.delete_prev_char()),
                ct_event!(keycode press Delete) => tc(self.delete_next_char()),
                ct_event!(key press CONTROL-'d') => tc(self.clear()),
                ct_event!(keycode press Enter) => {
                    if let Some(delegate) = &self.delegate {
                        if !delegate.should_submit() {
                            TextOutcome::Unchanged
                        } else {
                            TextOutcome::Continue
                        }
                    } else {
                        TextOutcome::Continue
                    }
                }

                ct_event!(key release _)
                | ct_event!(key release SHIFT-_)
                | ct_event!(keycode release Backspace)
                | ct_event!(keycode release Delete)
                | ct_event!(key release CONTROL-'d') => TextOutcome::Unchanged,

                _ => TextOutcome::Continue,
            }
        } else {
            TextOutcome::Continue
        };
        if r == TextOutcome::Continue {
            r = self.handle(event, ReadOnly);
        }
        r
    }
}

impl HandleEvent<crossterm::event::Event, ReadOnly, TextOutcome> for PhoneInputState {
    fn handle(&mut self, event: &crossterm::event::Event, _keymap: ReadOnly) -> TextOutcome {
        let mut r = if self.is_focused() {
            match event {
                ct_event!(keycode press Left) => self.move_left().into(),
                ct_event!(keycode press Right) => self.move_right().into(),
                ct_event!(keycode press Home) => self.move_to_start().into(),
                ct_event!(keycode press End) => self.move_to_end().into(),

                ct_event!(keycode release Left)
                | ct_event!(keycode release Right)
                | ct_event!(keycode release Home)
                | ct_event!(keycode release End) => TextOutcome::Unchanged,

                _ => TextOutcome::Continue,
            }
        } else {
            TextOutcome::Continue
        };

        if r == TextOutcome::Continue {
            r = self.handle(event, MouseOnly);
        }
        r
    }
}

impl HandleEvent<crossterm::event::Event, MouseOnly, TextOutcome> for PhoneInputState {
    fn handle(&mut self, event: &crossterm::event::Event, _keymap: MouseOnly) -> TextOutcome {
        match event {
            ct_event!(mouse any for m) if self.mouse.drag(self.inner, m) => {
                let c = (m.column as i16) - (self.inner.x as i16);
                self.set_screen_cursor(c).into()
            }
            ct_event!(mouse down Left for column, row) => {
                if self.gained_focus() {
                    // don't react to the first click that's for
                    // focus. this one shouldn't move the cursor.
                    TextOutcome::Unchanged
                } else if self.inner.contains((*column, *row).into()) {
                    let c = (column - self.inner.x) as i16;
                    self.set_screen_cursor(c).into()
                } else {
                    TextOutcome::Continue
                }
            }
            _ => TextOutcome::Continue,
        }
    }
}

/// Handle all events.
/// Text events are only processed if focus is true.
/// Mouse events are processed if they are in range.
pub fn handle_events(
    state: &mut PhoneInputState,
    focus: bool,
    event: &crossterm::event::Event,
) -> TextOutcome {
    state.focus.set(focus);
    state.handle(event, Regular)
}

/// Handle only navigation events.
/// Text events are only processed if focus is true.
/// Mouse events are processed if they are in range.
pub fn handle_readonly_events(
    state: &mut PhoneInputState,
    focus: bool,
    event: &crossterm::event::Event,
) -> TextOutcome {
    state.focus.set(focus);
    state.handle(event, ReadOnly)
}

/// Handle only mouse-events.
pub fn handle_mouse_events(
    state: &mut PhoneInputState,
    event: &crossterm::event::Event,
) -> TextOutcome {
    state.handle(event, MouseOnly)
}
