use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rat_mask::event::{HandleEvent, ReadOnly, Regular, TextOutcome};
use rat_mask::text_control::{LocalControl, TextControl};
use rat_mask::text_input_mask::{handle_events, handle_readonly_events, MaskedInputState};
use rat_mask::Selection;

fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
    Event::Key(KeyEvent::new(code, modifiers))
}

fn ch(c: char) -> Event {
    key(KeyCode::Char(c), KeyModifiers::NONE)
}

fn ctrl(c: char) -> Event {
    key(KeyCode::Char(c), KeyModifiers::CONTROL)
}

fn date() -> MaskedInputState {
    MaskedInputState::new("99/99/9999").expect("mask")
}

#[test]
fn test_display() {
    let mut s = date();
    assert_eq!(s.display_value(), "");
    assert_eq!(s.control.text(), "");
    assert_eq!(s.placeholder_text(), "__/__/____");

    assert!(s.insert_char('1'));
    assert_eq!(s.display_value(), "1_/__/____");
    assert_eq!(s.control.text(), "1_/__/____");
    assert_eq!(s.control.selection(), Selection::caret(1));

    assert!(s.delete_prev_char());
    assert_eq!(s.control.text(), "");
    assert_eq!(s.control.selection(), Selection::caret(0));
}

#[test]
fn test_empty_display_caret() {
    let mut s = MaskedInputState::new("(999)").expect("mask");
    assert_eq!(s.value.selection(), Selection::caret(1));
    assert_eq!(s.control.text(), "");
    assert_eq!(s.control.selection(), Selection::caret(0));

    assert!(s.insert_char('5'));
    assert_eq!(s.control.text(), "(5__)");
    assert_eq!(s.control.selection(), Selection::caret(2));

    // emptied again, the caret is not pushed into the control.
    assert!(s.delete_prev_char());
    assert_eq!(s.value.selection(), Selection::caret(1));
    assert_eq!(s.control.text(), "");
    assert_eq!(s.control.selection(), Selection::caret(0));

    s.set_value("");
    assert_eq!(s.control.selection(), Selection::caret(0));
}

#[test]
fn test_selection_from_control() {
    let mut s = date();
    s.set_value("12/31/2024");
    assert_eq!(s.control.text(), "12/31/2024");

    // the control moved the caret on its own.
    s.control.set_selection(Selection::caret(3));
    assert!(s.delete_next_char());
    assert_eq!(s.text(), "12/_1/2024");
    assert_eq!(s.control.selection(), Selection::caret(4));

    s.control.set_selection(Selection::new(6, 10));
    assert!(s.paste("1999"));
    assert_eq!(s.control.text(), "12/_1/1999");
    assert_eq!(s.control.selection(), Selection::caret(10));
}

#[test]
fn test_rejected_keeps_control() {
    let mut s = date();
    s.insert_char('1');
    s.control.set_selection(Selection::caret(1));
    assert!(!s.insert_char('x'));
    assert_eq!(s.control.text(), "1_/__/____");
    assert_eq!(s.control.selection(), Selection::caret(1));
}

#[test]
fn test_control_changed() {
    let mut s = date();
    s.set_value("12/31/2024");

    // the control cut "31" and left the caret where it was.
    s.control.set_text("12//2024");
    s.control.set_selection(Selection::caret(3));
    assert!(s.control_changed());
    assert_eq!(s.text(), "12/__/2024");
    assert_eq!(s.control.text(), "12/__/2024");
    assert_eq!(s.control.selection(), Selection::caret(3));

    // anything else is reverted.
    s.control.set_text("garbage-garbage");
    assert!(!s.control_changed());
    assert_eq!(s.control.text(), "12/__/2024");

    // selection only
    s.control.set_selection(Selection::caret(7));
    assert!(!s.control_changed());
    assert_eq!(s.value.selection(), Selection::caret(7));
}

#[test]
fn test_undo_redo() {
    let mut s = date();
    s.insert_char('1');
    s.insert_char('2');
    assert!(s.undo());
    assert_eq!(s.control.text(), "1_/__/____");
    assert_eq!(s.control.selection(), Selection::caret(1));
    assert!(s.redo());
    assert_eq!(s.control.text(), "12/__/____");
    assert!(!s.redo());
}

#[test]
fn test_navigation() {
    let mut s = date();
    s.set_value("12/31/2024");
    assert_eq!(s.cursor(), 10);

    assert!(s.move_left(false));
    assert_eq!(s.selection(), Selection::caret(9));
    assert!(s.move_left(true));
    assert!(s.move_left(true));
    assert_eq!(s.selection(), Selection::new(7, 9));
    assert_eq!(s.cursor(), 7);
    assert_eq!(s.anchor(), 9);
    assert!(s.move_right(true));
    assert_eq!(s.selection(), Selection::new(8, 9));

    assert!(s.move_to_line_start(false));
    assert_eq!(s.selection(), Selection::caret(0));
    assert!(!s.move_to_line_start(false));
    assert!(s.move_to_line_end(true));
    assert_eq!(s.selection(), Selection::new(0, 10));
    assert!(!s.move_right(true));

    assert!(s.set_cursor(4, false));
    assert!(s.select_all());
    assert_eq!(s.selection(), Selection::new(0, 10));
    assert!(s.delete_prev_char());
    assert_eq!(s.control.text(), "");
}

#[test]
fn test_line_start_literal() {
    let mut s = MaskedInputState::new("(999) 999").expect("mask");
    s.set_value("(123) 4");
    assert!(s.move_to_line_start(false));
    assert_eq!(s.cursor(), 1);
    assert!(s.move_to_line_start(false));
    assert_eq!(s.cursor(), 0);
}

#[test]
fn test_screen_cursor() {
    let mut s = MaskedInputState::new("aa-99").expect("mask");
    s.set_value("日本-1");
    assert_eq!(s.screen_cursor(), None);
    s.focus = true;
    assert_eq!(s.cursor(), 4);
    // wide chars count twice
    assert_eq!(s.screen_cursor(), Some(6));
    s.select_all();
    assert_eq!(s.screen_cursor(), None);
}

#[test]
fn test_screen_cursor_wide() {
    let n = 70_000;
    let mut s = MaskedInputState::new(&"9".repeat(n)).expect("mask");
    s.set_value(&"1".repeat(n));
    s.focus = true;
    assert_eq!(s.cursor(), n as u32);
    assert_eq!(s.screen_cursor(), Some(u16::MAX));
}

#[test]
fn test_custom_control() {
    let mut s = date().with_control(LocalControl::new());
    s.insert_char('3');
    let c = s.control.clone();
    assert_eq!(c.text(), "3_/__/____");
}

#[test]
fn test_events() {
    let mut s = date();

    assert_eq!(handle_events(&mut s, false, &ch('1')), TextOutcome::Continue);
    assert_eq!(s.text(), "__/__/____");

    assert_eq!(handle_events(&mut s, true, &ch('1')), TextOutcome::TextChanged);
    assert_eq!(handle_events(&mut s, true, &ch('2')), TextOutcome::TextChanged);
    assert_eq!(handle_events(&mut s, true, &ch('x')), TextOutcome::Unchanged);
    assert_eq!(s.control.text(), "12/__/____");

    // enter passes through
    assert_eq!(
        handle_events(&mut s, true, &key(KeyCode::Enter, KeyModifiers::NONE)),
        TextOutcome::Continue
    );

    assert_eq!(
        handle_events(&mut s, true, &key(KeyCode::Backspace, KeyModifiers::NONE)),
        TextOutcome::TextChanged
    );
    assert_eq!(s.control.text(), "1_/__/____");

    assert_eq!(
        handle_events(&mut s, true, &Event::Paste("2/31".into())),
        TextOutcome::TextChanged
    );
    assert_eq!(s.control.text(), "12/31/____");

    assert_eq!(
        handle_events(&mut s, true, &key(KeyCode::Left, KeyModifiers::NONE)),
        TextOutcome::Changed
    );
    assert_eq!(
        handle_events(&mut s, true, &key(KeyCode::Left, KeyModifiers::NONE)),
        TextOutcome::Changed
    );
    assert_eq!(s.selection(), Selection::caret(4));
    assert_eq!(
        handle_events(&mut s, true, &key(KeyCode::Delete, KeyModifiers::NONE)),
        TextOutcome::TextChanged
    );
    assert_eq!(s.control.text(), "12/3_/____");
}

#[test]
fn test_undo_keys() {
    let mut s = date();
    s.focus = true;
    s.insert_char('1');
    s.insert_char('2');

    assert_eq!(s.handle(&ctrl('z'), Regular), TextOutcome::TextChanged);
    assert_eq!(s.text(), "1_/__/____");
    assert_eq!(s.handle(&ctrl('y'), Regular), TextOutcome::TextChanged);
    assert_eq!(s.text(), "12/__/____");
    assert_eq!(
        s.handle(
            &key(
                KeyCode::Char('Y'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT
            ),
            Regular
        ),
        TextOutcome::TextChanged
    );
    assert_eq!(s.text(), "1_/__/____");
    assert_eq!(
        s.handle(
            &key(
                KeyCode::Char('Z'),
                KeyModifiers::CONTROL | KeyModifiers::SHIFT
            ),
            Regular
        ),
        TextOutcome::TextChanged
    );
    assert_eq!(s.text(), "12/__/____");
    assert_eq!(s.handle(&ctrl('y'), Regular), TextOutcome::Unchanged);

    // unknown ctrl keys are not typed.
    assert_eq!(s.handle(&ctrl('q'), Regular), TextOutcome::Continue);
    assert_eq!(s.text(), "12/__/____");

    assert_eq!(s.handle(&ctrl('d'), Regular), TextOutcome::TextChanged);
    assert!(s.is_empty());
}

#[test]
fn test_release() {
    let mut s = date();
    s.focus = true;
    let release = Event::Key(KeyEvent::new_with_kind(
        KeyCode::Char('1'),
        KeyModifiers::NONE,
        KeyEventKind::Release,
    ));
    assert_eq!(s.handle(&release, Regular), TextOutcome::Unchanged);
    assert_eq!(s.text(), "__/__/____");
}

#[test]
fn test_readonly() {
    let mut s = date();
    s.set_value("12/31/2024");

    assert_eq!(
        handle_readonly_events(&mut s, true, &ch('1')),
        TextOutcome::Continue
    );
    assert_eq!(
        handle_readonly_events(&mut s, true, &key(KeyCode::Home, KeyModifiers::NONE)),
        TextOutcome::Changed
    );
    assert_eq!(s.selection(), Selection::caret(0));
    assert_eq!(
        handle_readonly_events(&mut s, true, &key(KeyCode::End, KeyModifiers::SHIFT)),
        TextOutcome::Changed
    );
    assert_eq!(s.selection(), Selection::new(0, 10));
    assert_eq!(
        handle_readonly_events(&mut s, true, &key(KeyCode::Right, KeyModifiers::SHIFT)),
        TextOutcome::Unchanged
    );
    assert_eq!(s.handle(&ctrl('a'), ReadOnly), TextOutcome::Unchanged);
    assert_eq!(s.text(), "12/31/2024");
}
