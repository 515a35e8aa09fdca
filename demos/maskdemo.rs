//!
//! Some masked inputs in a raw terminal.
//!
//! Tab switches fields, Esc quits. Debug output goes to `test.log`.
//!

use crossterm::cursor::{MoveTo, Show};
use crossterm::event::{
    read, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{queue, ExecutableCommand};
use rat_mask::date_input::DateInputState;
use rat_mask::event::{HandleEvent, Regular, TextOutcome};
use rat_mask::text_input_mask::MaskedInputState;
use std::fs;
use std::io::{stdout, Write};
use std::path::PathBuf;

fn main() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let mut state = State {
        phone: MaskedInputState::new("(999) 999-9999")?,
        card: MaskedInputState::new("9999 9999 9999 9999")?,
        plate: MaskedInputState::new("AA-### 9999")?,
        date: DateInputState::with_pattern("%m/%d/%Y")?,
        focus: 0,
    };

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableBracketedPaste)?;

    let r = run(&mut state);

    stdout().execute(DisableBracketedPaste)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;

    r
}

struct State {
    phone: MaskedInputState,
    card: MaskedInputState,
    plate: MaskedInputState,
    date: DateInputState,
    focus: usize,
}

const FIELDS: usize = 4;

fn run(state: &mut State) -> Result<(), anyhow::Error> {
    loop {
        repaint(state)?;

        let event = read()?;
        match &event {
            Event::Key(KeyEvent {
                code: KeyCode::Esc,
                kind: KeyEventKind::Press,
                ..
            }) => break,
            Event::Key(KeyEvent {
                code: KeyCode::Tab,
                kind: KeyEventKind::Press,
                ..
            }) => {
                state.focus = (state.focus + 1) % FIELDS;
                continue;
            }
            _ => {}
        }

        let r = handle(state, &event);
        if r == TextOutcome::TextChanged {
            log::debug!("changed field {}", state.focus);
        }
    }
    Ok(())
}

fn handle(state: &mut State, event: &Event) -> TextOutcome {
    state.phone.focus = state.focus == 0;
    state.card.focus = state.focus == 1;
    state.plate.focus = state.focus == 2;
    state.date.widget.focus = state.focus == 3;

    match state.focus {
        0 => state.phone.handle(event, Regular),
        1 => state.card.handle(event, Regular),
        2 => state.plate.handle(event, Regular),
        _ => state.date.handle(event, Regular),
    }
}

fn repaint(state: &State) -> Result<(), anyhow::Error> {
    let mut out = stdout();
    queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;

    let rows = [
        ("phone", &state.phone, String::new()),
        ("card ", &state.card, String::new()),
        ("plate", &state.plate, String::new()),
        (
            "date ",
            &state.date.widget,
            match state.date.value() {
                Ok(v) => format!("{}", v),
                Err(e) => format!("{}", e),
            },
        ),
    ];

    let mut cursor = None;
    for (n, (label, input, extra)) in rows.iter().enumerate() {
        let y = n as u16 * 2;
        let shown = if input.display_value().is_empty() {
            input.placeholder_text()
        } else {
            input.display_value()
        };
        let marker = if state.focus == n { ">" } else { " " };
        queue!(
            out,
            MoveTo(0, y),
            Print(format!("{} {}: {}", marker, label, shown)),
            MoveTo(30, y),
            Print(format!("raw={:?} {}", input.raw_value(), extra)),
        )?;
        if state.focus == n {
            let sel = input.selection();
            cursor = Some((9 + sel.end as u16, y));
        }
    }
    queue!(
        out,
        MoveTo(0, FIELDS as u16 * 2 + 1),
        Print("Tab next field | Esc quit | Ctrl-Z undo | Ctrl-Y redo")
    )?;
    if let Some((x, y)) = cursor {
        queue!(out, MoveTo(x, y), Show)?;
    }
    out.flush()?;
    Ok(())
}

fn setup_logging() -> Result<(), anyhow::Error> {
    let log = PathBuf::from("test.log");
    if log.exists() {
        fs::remove_file(&log)?;
    }
    fern::Dispatch::new()
        .format(|out, message, _record| out.finish(format_args!("{}", message)))
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(&log)?)
        .apply()?;
    Ok(())
}
