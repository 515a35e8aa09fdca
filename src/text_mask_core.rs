use crate::_private::NonExhaustive;
use crate::format_char::FormatCharacters;
use crate::mask_buffer::MaskBuffer;
use crate::mask_op::{self, EditOutcome};
use crate::pattern::Pattern;
use crate::undo_buffer::{UndoBuffer, UndoEntry, UndoVec};
use crate::{upos_type, MaskError, Selection};
use log::debug;

/// Default placeholder.
pub const PLACEHOLDER_CHAR: char = '_';

/// Options for creating a [MaskedCore].
#[derive(Debug, Clone)]
pub struct MaskOptions {
    /// The mask.
    pub mask: String,
    /// Initial raw value.
    pub value: Option<String>,
    /// Format chars. Uses the default table if None.
    pub format_chars: Option<FormatCharacters>,
    /// Shown for unfilled slots. Uses `_` if None.
    pub placeholder: Option<char>,
    /// Initial selection. Defaults to the caret after the
    /// last entered char.
    pub selection: Option<Selection>,

    pub non_exhaustive: NonExhaustive,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            mask: Default::default(),
            value: None,
            format_chars: None,
            placeholder: None,
            selection: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl MaskOptions {
    pub fn new(mask: impl Into<String>) -> Self {
        Self {
            mask: mask.into(),
            ..Default::default()
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn format_chars(mut self, format_chars: FormatCharacters) -> Self {
        self.format_chars = Some(format_chars);
        self
    }

    pub fn placeholder(mut self, placeholder: char) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }
}

/// Options for [MaskedCore::set_pattern].
#[derive(Debug, Clone)]
pub struct PatternChange {
    /// Use this raw value instead of mapping the current
    /// content to the new mask.
    pub value: Option<String>,
    /// Selection after the change.
    pub selection: Option<Selection>,
    /// Replaces the format chars.
    pub format_chars: Option<FormatCharacters>,

    pub non_exhaustive: NonExhaustive,
}

impl Default for PatternChange {
    fn default() -> Self {
        Self {
            value: None,
            selection: None,
            format_chars: None,
            non_exhaustive: NonExhaustive,
        }
    }
}

impl PatternChange {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn selection(mut self, selection: Selection) -> Self {
        self.selection = Some(selection);
        self
    }

    pub fn format_chars(mut self, format_chars: FormatCharacters) -> Self {
        self.format_chars = Some(format_chars);
        self
    }
}

/// Masked editing core.
///
/// Owns the compiled mask, the value, the selection and the
/// undo history. Every mutator returns true if it was accepted,
/// the new selection can be read afterwards.
#[derive(Debug, Clone)]
pub struct MaskedCore {
    // parsed mask
    pattern: Pattern,
    format_chars: FormatCharacters,
    // value
    value: MaskBuffer,
    selection: Selection,
    undo: Option<Box<dyn UndoBuffer>>,
}

impl MaskedCore {
    /// New core with the default format chars.
    pub fn new(mask: &str) -> Result<Self, MaskError> {
        Self::with_options(MaskOptions::new(mask))
    }

    /// New core.
    pub fn with_options(options: MaskOptions) -> Result<Self, MaskError> {
        let format_chars = options.format_chars.unwrap_or_default();
        let placeholder = options.placeholder.unwrap_or(PLACEHOLDER_CHAR);
        let pattern = Pattern::compile(&options.mask, &format_chars)?;

        let value = match &options.value {
            Some(raw) => MaskBuffer::with_value(&pattern, placeholder, raw),
            None => MaskBuffer::new(&pattern, placeholder),
        };

        let mut s = Self {
            pattern,
            format_chars,
            value,
            selection: Default::default(),
            undo: Some(Box::new(UndoVec::default())),
        };
        s.selection = match options.selection {
            Some(selection) => selection.clamp(s.len()),
            None => s.default_caret(),
        };
        s.reset_undo();
        Ok(s)
    }

    /// Builder style value. This is the initial state,
    /// there is nothing to undo.
    pub fn with_value(mut self, raw: &str) -> Self {
        self.set_value(raw);
        self.reset_undo();
        self
    }

    /// The mask as given.
    #[inline]
    pub fn mask(&self) -> &str {
        self.pattern.mask()
    }

    /// Compiled mask.
    #[inline]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[inline]
    pub fn format_chars(&self) -> &FormatCharacters {
        &self.format_chars
    }

    #[inline]
    pub fn placeholder(&self) -> char {
        self.value.placeholder()
    }

    /// Length of the mask in slots.
    #[inline]
    pub fn len(&self) -> upos_type {
        self.pattern.len()
    }

    /// Nothing entered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.value.is_clear(&self.pattern)
    }

    /// Every editable slot is filled.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.value.is_complete(&self.pattern)
    }

    /// Changes the mask.
    ///
    /// Without an explicit value the entered chars are carried
    /// over to the new mask as far as they fit. Resets the undo
    /// history.
    ///
    /// On error nothing is changed.
    pub fn set_pattern(&mut self, mask: &str, change: PatternChange) -> Result<(), MaskError> {
        let format_chars = change
            .format_chars
            .unwrap_or_else(|| self.format_chars.clone());
        let pattern = Pattern::compile(mask, &format_chars)?;

        debug!("set_pattern: {:?} -> {:?}", self.pattern.mask(), mask);

        let value = match &change.value {
            Some(raw) => MaskBuffer::with_value(&pattern, self.placeholder(), raw),
            None => self.value.remap(&self.pattern, &pattern),
        };

        self.pattern = pattern;
        self.format_chars = format_chars;
        self.value = value;
        self.selection = match change.selection {
            Some(selection) => selection.clamp(self.len()),
            None => self.default_caret(),
        };
        self.reset_undo();
        Ok(())
    }
}

impl MaskedCore {
    /// Undo
    #[inline]
    pub fn set_undo_buffer(&mut self, undo: Option<Box<dyn UndoBuffer>>) {
        self.undo = undo;
        self.reset_undo();
    }

    /// Set undo count
    #[inline]
    pub fn set_undo_count(&mut self, n: u32) {
        if let Some(undo) = self.undo.as_mut() {
            undo.set_undo_count(n);
        }
    }

    /// Undo
    #[inline]
    pub fn undo_buffer(&self) -> Option<&dyn UndoBuffer> {
        self.undo.as_deref()
    }

    /// Undo
    #[inline]
    pub fn undo_buffer_mut(&mut self) -> Option<&mut dyn UndoBuffer> {
        match &mut self.undo {
            None => None,
            Some(v) => Some(v.as_mut()),
        }
    }

    /// Undo last.
    pub fn undo(&mut self) -> bool {
        let Some(undo) = self.undo.as_mut() else {
            return false;
        };
        match undo.undo() {
            Some(entry) => {
                self.value = entry.value.clone();
                self.selection = entry.selection;
                true
            }
            None => false,
        }
    }

    /// Redo last.
    pub fn redo(&mut self) -> bool {
        let Some(undo) = self.undo.as_mut() else {
            return false;
        };
        match undo.redo() {
            Some(entry) => {
                self.value = entry.value.clone();
                self.selection = entry.selection;
                true
            }
            None => false,
        }
    }

    fn reset_undo(&mut self) {
        let entry = UndoEntry::new(self.value.clone(), self.selection);
        if let Some(undo) = self.undo.as_mut() {
            undo.clear(entry);
        }
    }

    fn append_undo(&mut self) {
        let entry = UndoEntry::new(self.value.clone(), self.selection);
        if let Some(undo) = self.undo.as_mut() {
            undo.append(entry);
        }
    }
}

impl MaskedCore {
    /// Current selection.
    #[inline]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Caret position. This is the end of the selection.
    #[inline]
    pub fn cursor(&self) -> upos_type {
        self.selection.end
    }

    /// Any text selection.
    #[inline]
    pub fn has_selection(&self) -> bool {
        !self.selection.is_caret()
    }

    /// Set the selection. The values are capped to the mask length.
    ///
    /// Returns true, if the selection actually changed.
    pub fn set_selection(&mut self, selection: impl Into<Selection>) -> bool {
        let old = self.selection;
        self.selection = selection.into().clamp(self.len());
        old != self.selection
    }

    /// Set a caret.
    #[inline]
    pub fn set_cursor(&mut self, cursor: upos_type) -> bool {
        self.set_selection(Selection::caret(cursor))
    }

    /// Select all.
    #[inline]
    pub fn select_all(&mut self) -> bool {
        self.set_selection(Selection::new(0, self.len()))
    }

    /// A caret sitting after unfilled slots is pulled back
    /// behind the last entered char.
    ///
    /// Returns true, if the selection changed.
    pub fn snap_caret(&mut self) -> bool {
        let snapped = mask_op::snap_caret(&self.pattern, &self.value, self.selection);
        self.set_selection(snapped)
    }

    /// Caret after the last entered char, on the next editable slot.
    pub fn default_caret(&self) -> Selection {
        match self.value.last_filled(&self.pattern) {
            Some(idx) => Selection::caret(self.pattern.skip_literals(idx + 1)),
            None => Selection::caret(self.pattern.first_editable()),
        }
    }
}

impl MaskedCore {
    /// Value with placeholders. Always as long as the mask.
    #[inline]
    pub fn value(&self) -> String {
        self.value.value()
    }

    /// Value without trailing placeholders.
    #[inline]
    pub fn raw_value(&self) -> String {
        self.value.raw_value(&self.pattern)
    }

    /// The value with nothing entered.
    #[inline]
    pub fn empty_value(&self) -> String {
        MaskBuffer::new(&self.pattern, self.placeholder()).value()
    }

    /// The content.
    #[inline]
    pub fn buffer(&self) -> &MaskBuffer {
        &self.value
    }

    /// Sets the value from a raw value.
    ///
    /// Chars that don't fit leave their slot empty.
    /// The caret moves behind the last entered char.
    pub fn set_value(&mut self, raw: &str) {
        self.value.set_value(&self.pattern, raw);
        self.selection = self.default_caret();
        self.append_undo();
    }

    /// Reset the value to empty.
    pub fn clear(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.value.clear(&self.pattern);
        self.selection = self.default_caret();
        self.append_undo();
        true
    }
}

impl MaskedCore {
    fn apply(&mut self, r: EditOutcome) -> bool {
        if r.accepted {
            self.selection = r.selection;
            self.append_undo();
        }
        r.accepted
    }

    /// Type a char at the selection.
    pub fn input(&mut self, c: char) -> bool {
        let r = mask_op::insert_char(&self.pattern, &mut self.value, self.selection, c);
        self.apply(r)
    }

    /// Backspace.
    pub fn backspace(&mut self) -> bool {
        let r = mask_op::remove_prev(&self.pattern, &mut self.value, self.selection);
        self.apply(r)
    }

    /// Forward delete.
    pub fn delete(&mut self) -> bool {
        let r = mask_op::remove_next(&self.pattern, &mut self.value, self.selection);
        self.apply(r)
    }

    /// Paste text at the selection.
    pub fn paste(&mut self, text: &str) -> bool {
        let r = mask_op::paste(&self.pattern, &mut self.value, self.selection, text);
        self.apply(r)
    }
}
