use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use phone_input::event::TextOutcome;
use phone_input::{
    handle_events, FieldDelegate, HasScreenCursor, PartialFormat, PhoneInput, PhoneInputState,
    PhoneValidate,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::StatefulWidget;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default, Clone)]
struct UsFormat;

impl PartialFormat for UsFormat {
    fn format_partial(&self, text: &str) -> String {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        match digits.len() {
            0 => String::new(),
            1..=3 => digits,
            4..=6 => format!("({}) {}", &digits[..3], &digits[3..]),
            7..=10 => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
            _ => format!(
                "({}) {}-{} {}",
                &digits[..3],
                &digits[3..6],
                &digits[6..10],
                &digits[10..]
            ),
        }
    }
}

#[derive(Debug, Clone)]
struct TenDigits;

impl PhoneValidate for TenDigits {
    fn is_valid(&self, text: &str) -> bool {
        text.chars().filter(|c| c.is_ascii_digit()).count() == 10
    }
}

fn key(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn keycode(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn ctrl(c: char) -> Event {
    Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

#[test]
fn test_typing() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);

    for c in "0145551234".chars() {
        let r = handle_events(&mut state, true, &key(c));
        assert_eq!(r, TextOutcome::TextChanged);
        // typing at the end keeps the cursor at the end.
        assert_eq!(state.cursor(), state.len());
    }

    assert_eq!(state.text(), "(014) 555-1234");
    assert_eq!(state.cursor(), 14);
}

#[test]
fn test_typing_unfocused() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);

    let r = handle_events(&mut state, false, &key('1'));
    assert_eq!(r, TextOutcome::Continue);
    assert_eq!(state.text(), "");
}

#[test]
fn test_backspace() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);
    state.set_text("4155551");
    assert_eq!(state.text(), "(415) 555-1");
    assert_eq!(state.cursor(), 11);

    // deleting the trailing digit reformats.
    let r = handle_events(&mut state, true, &keycode(KeyCode::Backspace));
    assert_eq!(r, TextOutcome::TextChanged);
    assert_eq!(state.text(), "(415) 555");
    assert_eq!(state.cursor(), 9);

    // backspace over the formatter's space really removes it.
    state.set_cursor(6);
    let r = handle_events(&mut state, true, &keycode(KeyCode::Backspace));
    assert_eq!(r, TextOutcome::TextChanged);
    assert_eq!(state.text(), "(415)555");
    assert_eq!(state.cursor(), 5);

    // backspace at the start does nothing.
    state.set_cursor(0);
    let r = handle_events(&mut state, true, &keycode(KeyCode::Backspace));
    assert_eq!(r, TextOutcome::Unchanged);
}

#[test]
fn test_delete() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);
    state.set_text("415555");
    assert_eq!(state.text(), "(415) 555");

    // delete forward over the separator.
    state.set_cursor(5);
    let r = handle_events(&mut state, true, &keycode(KeyCode::Delete));
    assert_eq!(r, TextOutcome::TextChanged);
    assert_eq!(state.text(), "(415)555");
    assert_eq!(state.cursor(), 5);

    // delete at the end does nothing.
    state.move_to_end();
    let r = handle_events(&mut state, true, &keycode(KeyCode::Delete));
    assert_eq!(r, TextOutcome::Unchanged);
}

#[test]
fn test_navigation() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);
    state.set_text("415555");

    let r = handle_events(&mut state, true, &keycode(KeyCode::Home));
    assert_eq!(r, TextOutcome::Changed);
    assert_eq!(state.cursor(), 0);

    let r = handle_events(&mut state, true, &keycode(KeyCode::Left));
    assert_eq!(r, TextOutcome::Unchanged);

    let r = handle_events(&mut state, true, &keycode(KeyCode::Right));
    assert_eq!(r, TextOutcome::Changed);
    assert_eq!(state.cursor(), 1);

    let r = handle_events(&mut state, true, &keycode(KeyCode::End));
    assert_eq!(r, TextOutcome::Changed);
    assert_eq!(state.cursor(), 9);

    let r = handle_events(&mut state, true, &keycode(KeyCode::Right));
    assert_eq!(r, TextOutcome::Unchanged);

    // unknown keys are not consumed.
    let r = handle_events(&mut state, true, &keycode(KeyCode::F(1)));
    assert_eq!(r, TextOutcome::Continue);
}

#[test]
fn test_clear() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);
    state.set_text("415555");

    let r = handle_events(&mut state, true, &ctrl('d'));
    assert_eq!(r, TextOutcome::TextChanged);
    assert!(state.is_empty());
    assert_eq!(state.cursor(), 0);

    // clearing an empty field does nothing.
    let r = handle_events(&mut state, true, &ctrl('d'));
    assert_eq!(r, TextOutcome::Unchanged);
}

#[test]
fn test_insert_str() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);
    state.set_text("415");

    assert!(state.insert_str("5551234"));
    assert_eq!(state.text(), "(415) 555-1234");
    assert_eq!(state.cursor(), 14);

    assert!(!state.insert_str(""));
}

#[test]
fn test_raw_text() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);
    state.set_text("0145551234");
    assert_eq!(state.text(), "(014) 555-1234");
    assert_eq!(state.raw_text(), "0145551234");

    let mut state = PhoneInputState::new();
    state.set_text("+49 160 1234");
    assert_eq!(state.raw_text(), "+491601234");
}

#[test]
fn test_set_formatter_reformats() {
    let mut state = PhoneInputState::new();
    state.set_text("4155551234");
    assert_eq!(state.text(), "4155551234");

    // cursor on the last '5'.
    state.set_cursor(5);
    state.set_formatter(UsFormat);
    assert_eq!(state.text(), "(415) 555-1234");
    // still on the last '5'.
    assert_eq!(state.cursor(), 8);
}

#[test]
fn test_is_valid() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);
    state.set_text("415555");

    // no validator installed.
    assert_eq!(state.is_valid(), None);

    state.set_validator(Some(TenDigits));
    assert_eq!(state.is_valid(), Some(false));

    state.set_text("4155551234");
    assert_eq!(state.is_valid(), Some(true));

    state.set_validator(None::<TenDigits>);
    assert_eq!(state.is_valid(), None);
}

#[derive(Debug, Clone)]
struct VetoAll;

impl FieldDelegate for VetoAll {
    fn should_change(&self, _edit: &phone_input::EditRequest<'_>) -> bool {
        false
    }

    fn should_clear(&self) -> bool {
        false
    }

    fn should_submit(&self) -> bool {
        false
    }
}

#[test]
fn test_delegate_veto() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);
    state.set_text("415555");
    state.set_delegate(Some(VetoAll));

    let r = handle_events(&mut state, true, &key('9'));
    assert_eq!(r, TextOutcome::Unchanged);
    assert_eq!(state.text(), "(415) 555");

    let r = handle_events(&mut state, true, &keycode(KeyCode::Backspace));
    assert_eq!(r, TextOutcome::Unchanged);
    assert_eq!(state.text(), "(415) 555");

    let r = handle_events(&mut state, true, &ctrl('d'));
    assert_eq!(r, TextOutcome::Unchanged);
    assert_eq!(state.text(), "(415) 555");

    // enter is swallowed when the delegate rejects the submit.
    let r = handle_events(&mut state, true, &keycode(KeyCode::Enter));
    assert_eq!(r, TextOutcome::Unchanged);
}

#[test]
fn test_submit_passes_through() {
    let mut state = PhoneInputState::new();

    // without a delegate enter stays with the application.
    let r = handle_events(&mut state, true, &keycode(KeyCode::Enter));
    assert_eq!(r, TextOutcome::Continue);
}

#[derive(Debug, Clone)]
struct Recorder {
    log: Rc<RefCell<Vec<String>>>,
}

impl FieldDelegate for Recorder {
    fn did_change(&self, text: &str) {
        self.log.borrow_mut().push(format!("change:{}", text));
    }

    fn did_begin_editing(&self) {
        self.log.borrow_mut().push("begin".into());
    }

    fn did_end_editing(&self) {
        self.log.borrow_mut().push("end".into());
    }
}

#[test]
fn test_delegate_notifications() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);
    state.set_delegate(Some(Recorder { log: log.clone() }));

    handle_events(&mut state, true, &key('4'));
    handle_events(&mut state, true, &key('1'));
    // focus moves on.
    handle_events(&mut state, false, &keycode(KeyCode::F(1)));

    assert_eq!(
        log.borrow().as_slice(),
        ["begin", "change:4", "change:41", "end"]
    );
}

#[test]
fn test_render() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);
    state.set_text("0145551234");
    state.focus.set(true);

    let area = Rect::new(0, 0, 20, 1);
    let mut buf = Buffer::empty(area);
    PhoneInput::new().render(area, &mut buf, &mut state);

    assert_eq!(buf.cell((0, 0)).expect("cell").symbol(), "(");
    assert_eq!(buf.cell((1, 0)).expect("cell").symbol(), "0");
    assert_eq!(buf.cell((13, 0)).expect("cell").symbol(), "4");

    // cursor sits after the last digit.
    assert_eq!(state.screen_cursor(), Some((14, 0)));

    state.focus.set(false);
    assert_eq!(state.screen_cursor(), None);
}

#[test]
fn test_render_scrolls_to_cursor() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);
    state.set_text("0145551234");
    state.focus.set(true);

    // narrower than the text, the view scrolls so the cursor shows.
    let area = Rect::new(0, 0, 8, 1);
    let mut buf = Buffer::empty(area);
    PhoneInput::new().render(area, &mut buf, &mut state);

    // cursor 14, width 8 -> offset 7 (one extra to keep the cursor
    // off the right edge).
    assert_eq!(state.offset, 7);
    assert_eq!(buf.cell((0, 0)).expect("cell").symbol(), "5");
    assert_eq!(state.screen_cursor(), Some((7, 0)));
}

#[test]
fn test_mouse_click() {
    let mut state = PhoneInputState::new();
    state.set_formatter(UsFormat);
    state.set_text("0145551234");
    state.focus.set(true);

    let area = Rect::new(0, 0, 20, 1);
    let mut buf = Buffer::empty(area);
    PhoneInput::new().render(area, &mut buf, &mut state);

    let click = Event::Mouse(MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column: 3,
        row: 0,
        modifiers: KeyModifiers::NONE,
    });
    let r = handle_events(&mut state, true, &click);
    assert_eq!(r, TextOutcome::Changed);
    assert_eq!(state.cursor(), 3);
}
