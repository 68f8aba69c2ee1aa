//!
//! Minimal demo. Type a number, watch the formatting and the
//! invalid marker. Esc quits.
//!

use anyhow::Error;
use crossterm::event::{Event, KeyCode, KeyEvent};
use phone_input::event::ConsumedEvent;
use phone_input::{
    handle_events, HasScreenCursor, PartialFormat, PhoneInput, PhoneInputState, PhoneValidate,
};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Style, Stylize};
use ratatui::text::Line;
use ratatui::widgets::{Block, StatefulWidget, Widget};
use ratatui::{DefaultTerminal, Frame};

/// NANP-ish grouping, stands in for a real libphonenumber port.
#[derive(Debug, Clone)]
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

fn main() -> Result<(), Error> {
    setup_logging()?;

    let mut state = PhoneInputState::named("phone");
    state.set_formatter(UsFormat);
    state.set_validator(Some(TenDigits));
    state.focus.set(true);

    let mut terminal = ratatui::init();
    let r = run(&mut terminal, &mut state);
    ratatui::restore();
    r
}

fn run(terminal: &mut DefaultTerminal, state: &mut PhoneInputState) -> Result<(), Error> {
    loop {
        terminal.draw(|frame| render(frame, state))?;

        let event = crossterm::event::read()?;
        if matches!(
            &event,
            Event::Key(KeyEvent {
                code: KeyCode::Esc,
                ..
            })
        ) {
            return Ok(());
        }

        let r = handle_events(state, true, &event);
        if r.is_consumed() {
            state.set_invalid(state.is_valid() == Some(false));
        }
    }
}

fn render(frame: &mut Frame<'_>, state: &mut PhoneInputState) {
    let l = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Fill(1),
    ])
    .split(frame.area());

    Line::from("Enter a phone number. Esc quits.").render(l[0], frame.buffer_mut());

    PhoneInput::new()
        .block(Block::bordered().title("phone"))
        .style(Style::new().white().on_dark_gray())
        .focus_style(Style::new().white().on_blue())
        .invalid_style(Style::new().light_red())
        .render(l[1], frame.buffer_mut(), state);

    if let Some(cursor) = state.screen_cursor() {
        frame.set_cursor_position(cursor);
    }
}

fn setup_logging() -> Result<(), Error> {
    fern::Dispatch::new()
        .format(|out, message, _record| out.finish(format_args!("{}", message)))
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file("log.log")?)
        .apply()?;
    Ok(())
}
