//! Text input with an input mask.
//!
//! * Binds a [MaskedCore] to some visible [TextControl].
//! * Every edit reads the selection from the control, runs the
//!   engine and writes value and selection back.
//! * Keyboard navigation with selection.
//! * Undo/Redo.
//!
//! * Accepts an input mask:
//!   * `9` or `1`: digit
//!   * `a`: letter
//!   * `A`: letter, converted to uppercase
//!   * `*`: letter or digit
//!   * `#`: letter or digit, converted to uppercase
//!   * `\`: escapes the following character and uses it as a literal.
//!   * everything else is a literal.
//!
//! ```rust
//! use rat_mask::text_input_mask::MaskedInputState;
//!
//! let mut date_state = MaskedInputState::new("99/99/9999")?;
//! date_state.insert_char('1');
//! date_state.insert_char('2');
//! assert_eq!(date_state.text(), "12/__/____");
//! # Ok::<(), rat_mask::MaskError>(())
//! ```
//!
//! Nothing here draws. The screen column of the caret is
//! available as [MaskedInputState::screen_cursor].
//!
//! Event handling by calling the freestanding fn [handle_events].
//! There's [handle_readonly_events] if you only want navigation.
//!

use crate::_private::NonExhaustive;
use crate::core::{MaskedCore, PatternChange};
use crate::event::{HandleEvent, ReadOnly, Regular, TextOutcome};
use crate::text_control::{LocalControl, TextControl};
use crate::undo_buffer::UndoBuffer;
use crate::{upos_type, MaskError, Selection};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use unicode_width::UnicodeWidthChar;

/// State & event-handling.
#[derive(Debug, Clone)]
pub struct MaskedInputState {
    /// Editing core
    pub value: MaskedCore,
    /// The visible control.
    /// Source of the selection, target for value and selection.
    pub control: Box<dyn TextControl>,
    /// Current focus state.
    /// __read+write__
    pub focus: bool,

    // fixed end of a keyboard selection
    anchor: upos_type,

    pub non_exhaustive: NonExhaustive,
}

impl MaskedInputState {
    /// New state with a [LocalControl].
    pub fn new(mask: &str) -> Result<Self, MaskError> {
        Ok(Self::with_core(MaskedCore::new(mask)?))
    }

    /// New state for an existing core.
    pub fn with_core(core: MaskedCore) -> Self {
        let mut s = Self {
            anchor: core.selection().start,
            value: core,
            control: Box::new(LocalControl::default()),
            focus: false,
            non_exhaustive: NonExhaustive,
        };
        s.write_back();
        s
    }

    /// Use this control. The control gets the current value.
    pub fn with_control(mut self, control: impl TextControl + 'static) -> Self {
        self.set_control(Box::new(control));
        self
    }

    /// Replace the control.
    pub fn set_control(&mut self, control: Box<dyn TextControl>) {
        self.control = control;
        self.write_back();
    }

    /// Set the input mask. Tries to keep the current value.
    pub fn set_mask(&mut self, mask: &str) -> Result<(), MaskError> {
        self.value.set_pattern(mask, PatternChange::default())?;
        self.write_back();
        Ok(())
    }

    /// Current mask.
    #[inline]
    pub fn mask(&self) -> &str {
        self.value.mask()
    }

    /// Shown when the control is empty.
    #[inline]
    pub fn placeholder_text(&self) -> String {
        self.value.empty_value()
    }

    /// Text for the control.
    ///
    /// This is empty while nothing has been typed, so the
    /// control can show its placeholder text.
    pub fn display_value(&self) -> String {
        if self.value.is_empty() {
            String::new()
        } else {
            self.value.value()
        }
    }

    /// Value with placeholders.
    #[inline]
    pub fn text(&self) -> String {
        self.value.value()
    }

    /// Value without trailing placeholders.
    #[inline]
    pub fn raw_value(&self) -> String {
        self.value.raw_value()
    }

    /// Set a raw value.
    pub fn set_value(&mut self, raw: &str) {
        self.value.set_value(raw);
        self.write_back();
    }

    /// Nothing entered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// All slots filled.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.value.is_complete()
    }

    /// Length in slots.
    #[inline]
    pub fn len(&self) -> upos_type {
        self.value.len()
    }

    /// Reset to empty.
    pub fn clear(&mut self) -> bool {
        if self.value.clear() {
            self.write_back();
            true
        } else {
            false
        }
    }

    /// Copy selection from the control to the core.
    fn sync_selection(&mut self) {
        let sel = self.control.selection();
        self.value.set_selection(sel);
    }

    /// Show the core state in the control.
    fn write_back(&mut self) {
        let sel = self.value.selection();
        self.anchor = sel.start;
        let display = self.display_value();
        self.control.set_text(&display);
        // an empty control has no place for the caret.
        if !display.is_empty() {
            self.control.set_selection(sel);
        }
    }

    fn accept(&mut self, r: bool) -> bool {
        if r {
            self.write_back();
        }
        r
    }
}

impl MaskedInputState {
    /// Set undo buffer.
    #[inline]
    pub fn set_undo_buffer(&mut self, undo: Option<impl UndoBuffer + 'static>) {
        match undo {
            None => self.value.set_undo_buffer(None),
            Some(v) => self.value.set_undo_buffer(Some(Box::new(v))),
        }
    }

    /// Undo
    #[inline]
    pub fn undo_buffer(&self) -> Option<&dyn UndoBuffer> {
        self.value.undo_buffer()
    }

    /// Undo operation
    pub fn undo(&mut self) -> bool {
        let r = self.value.undo();
        self.accept(r)
    }

    /// Redo operation
    pub fn redo(&mut self) -> bool {
        let r = self.value.redo();
        self.accept(r)
    }
}

impl MaskedInputState {
    /// Insert a char at the current position.
    pub fn insert_char(&mut self, c: char) -> bool {
        self.sync_selection();
        let r = self.value.input(c);
        self.accept(r)
    }

    /// Deletes the char before the cursor, or the selection.
    pub fn delete_prev_char(&mut self) -> bool {
        self.sync_selection();
        let r = self.value.backspace();
        self.accept(r)
    }

    /// Deletes the char after the cursor, or the selection.
    pub fn delete_next_char(&mut self) -> bool {
        self.sync_selection();
        let r = self.value.delete();
        self.accept(r)
    }

    /// Paste text at the current position.
    pub fn paste(&mut self, text: &str) -> bool {
        self.sync_selection();
        let r = self.value.paste(text);
        self.accept(r)
    }

    /// The control has changed its text on its own.
    ///
    /// A shorter text means something was cut. The missing part
    /// is cleared as if it had been selected and deleted with
    /// backspace. Anything else is overwritten with the current
    /// value.
    ///
    /// Returns true if the value changed.
    pub fn control_changed(&mut self) -> bool {
        let text = self.control.text();
        if text == self.display_value() {
            self.sync_selection();
            return false;
        }

        let old_len = self.value.len() as usize;
        let new_len = text.chars().count();
        if new_len < old_len {
            let start = self.control.selection().start;
            let cut = Selection::new(start, start + (old_len - new_len) as upos_type);
            debug!("control_changed: cut {:?}", cut);
            self.value.set_selection(cut);
            if self.value.backspace() {
                self.write_back();
                return true;
            }
        }

        self.write_back();
        false
    }
}

impl MaskedInputState {
    /// Selection as the control sees it.
    #[inline]
    pub fn selection(&self) -> Selection {
        self.control.selection()
    }

    /// Any text selection.
    #[inline]
    pub fn has_selection(&self) -> bool {
        !self.selection().is_caret()
    }

    /// Set the selection.
    pub fn set_selection(&mut self, selection: impl Into<Selection>) -> bool {
        let old = self.control.selection();
        self.value.set_selection(selection);
        self.write_back();
        old != self.control.selection()
    }

    /// The moving end of the selection.
    pub fn cursor(&self) -> upos_type {
        let sel = self.selection();
        if self.anchor == sel.end && sel.start != sel.end {
            sel.start
        } else {
            sel.end
        }
    }

    /// The fixed end of the selection.
    pub fn anchor(&self) -> upos_type {
        let sel = self.selection();
        if self.anchor == sel.start || self.anchor == sel.end {
            self.anchor
        } else {
            sel.start
        }
    }

    /// Set the cursor. Extends the selection if requested.
    ///
    /// Returns true if the selection changed.
    pub fn set_cursor(&mut self, cursor: upos_type, extend_selection: bool) -> bool {
        let old = self.control.selection();
        let cursor = cursor.min(self.len());
        let anchor = if extend_selection {
            self.anchor()
        } else {
            cursor
        };

        self.value.set_selection(Selection::new(anchor, cursor));
        self.anchor = anchor;
        self.control.set_selection(self.value.selection());
        old != self.control.selection()
    }

    /// Select all text.
    pub fn select_all(&mut self) -> bool {
        let old = self.control.selection();
        self.value.select_all();
        self.anchor = 0;
        self.control.set_selection(self.value.selection());
        old != self.control.selection()
    }

    /// Move to the left.
    pub fn move_left(&mut self, extend_selection: bool) -> bool {
        let c = self.cursor().saturating_sub(1);
        self.set_cursor(c, extend_selection)
    }

    /// Move to the right.
    pub fn move_right(&mut self, extend_selection: bool) -> bool {
        let c = self.cursor() + 1;
        self.set_cursor(c, extend_selection)
    }

    /// Start of line
    pub fn move_to_line_start(&mut self, extend_selection: bool) -> bool {
        let first = self.value.pattern().first_editable();
        if self.cursor() != first {
            self.set_cursor(first, extend_selection)
        } else {
            self.set_cursor(0, extend_selection)
        }
    }

    /// End of line
    pub fn move_to_line_end(&mut self, extend_selection: bool) -> bool {
        self.set_cursor(self.len(), extend_selection)
    }

    /// Screen column of the caret relative to the start of the
    /// control. None if not focused or there is a selection.
    pub fn screen_cursor(&self) -> Option<u16> {
        if !self.focus || self.has_selection() {
            return None;
        }
        let width: usize = self
            .value
            .value()
            .chars()
            .take(self.cursor() as usize)
            .map(|c| c.width().unwrap_or(0))
            .sum();
        Some(u16::try_from(width).unwrap_or(u16::MAX))
    }
}

impl HandleEvent<Event, Regular, TextOutcome> for MaskedInputState {
    fn handle(&mut self, event: &Event, _keymap: Regular) -> TextOutcome {
        // small helper ...
        fn tc(r: bool) -> TextOutcome {
            if r {
                TextOutcome::TextChanged
            } else {
                TextOutcome::Unchanged
            }
        }

        let mut r = if self.focus {
            match event {
                Event::Paste(text) => tc(self.paste(text)),
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind,
                    ..
                }) => {
                    let ctrl = modifiers.contains(KeyModifiers::CONTROL);
                    let shift = modifiers.contains(KeyModifiers::SHIFT);
                    let alt = modifiers.contains(KeyModifiers::ALT);
                    match (kind, code) {
                        // AltGr arrives as CONTROL_ALT
                        (KeyEventKind::Press, KeyCode::Char(c)) if ctrl == alt => {
                            tc(self.insert_char(*c))
                        }
                        (KeyEventKind::Press, KeyCode::Backspace) => tc(self.delete_prev_char()),
                        (KeyEventKind::Press, KeyCode::Delete) => tc(self.delete_next_char()),
                        (KeyEventKind::Press, KeyCode::Char(c)) if ctrl && !alt => {
                            match (c.to_ascii_lowercase(), shift) {
                                ('z', false) | ('y', true) => tc(self.undo()),
                                ('y', false) | ('z', true) => tc(self.redo()),
                                ('d', false) => tc(self.clear()),
                                _ => TextOutcome::Continue,
                            }
                        }
                        (KeyEventKind::Release, KeyCode::Char(_))
                        | (KeyEventKind::Release, KeyCode::Backspace)
                        | (KeyEventKind::Release, KeyCode::Delete) => TextOutcome::Unchanged,
                        _ => TextOutcome::Continue,
                    }
                }
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

impl HandleEvent<Event, ReadOnly, TextOutcome> for MaskedInputState {
    fn handle(&mut self, event: &Event, _keymap: ReadOnly) -> TextOutcome {
        if !self.focus {
            return TextOutcome::Continue;
        }

        match event {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) => {
                let ctrl = modifiers.contains(KeyModifiers::CONTROL);
                let shift = modifiers.contains(KeyModifiers::SHIFT);
                match code {
                    KeyCode::Left if !ctrl => self.move_left(shift).into(),
                    KeyCode::Right if !ctrl => self.move_right(shift).into(),
                    KeyCode::Home => self.move_to_line_start(shift).into(),
                    KeyCode::End => self.move_to_line_end(shift).into(),
                    KeyCode::Char('a') | KeyCode::Char('A') if ctrl => self.select_all().into(),
                    _ => TextOutcome::Continue,
                }
            }
            _ => TextOutcome::Continue,
        }
    }
}

/// Handle all events.
/// Text events are only processed if focus is true.
pub fn handle_events(state: &mut MaskedInputState, focus: bool, event: &Event) -> TextOutcome {
    state.focus = focus;
    state.handle(event, Regular)
}

/// Handle only navigation events.
/// Text events are only processed if focus is true.
pub fn handle_readonly_events(
    state: &mut MaskedInputState,
    focus: bool,
    event: &Event,
) -> TextOutcome {
    state.focus = focus;
    state.handle(event, ReadOnly)
}
