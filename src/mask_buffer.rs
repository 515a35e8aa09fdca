use crate::pattern::Pattern;
use crate::upos_type;

/// Content of a masked input.
///
/// Holds one entry per pattern slot. Literal slots always hold their
/// literal, editable slots hold an entered char or nothing.
///
/// Most functions need the pattern the buffer was created for.
/// Using a different pattern gives garbage, but it will not panic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskBuffer {
    // None is an unfilled editable slot.
    slots: Vec<Option<char>>,
    placeholder: char,
}

impl MaskBuffer {
    /// Buffer with nothing entered.
    pub fn new(pattern: &Pattern, placeholder: char) -> Self {
        Self {
            slots: pattern.slots().iter().map(|v| v.literal()).collect(),
            placeholder,
        }
    }

    /// Buffer with the given raw value. See [MaskBuffer::set_value].
    pub fn with_value(pattern: &Pattern, placeholder: char, raw: &str) -> Self {
        let mut s = Self::new(pattern, placeholder);
        s.set_value(pattern, raw);
        s
    }

    /// Shown for unfilled slots.
    #[inline]
    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    #[inline]
    pub fn len(&self) -> upos_type {
        self.slots.len() as upos_type
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Char at idx. Literal or entered char, None for an
    /// unfilled slot.
    #[inline]
    pub fn get(&self, idx: upos_type) -> Option<char> {
        self.slots.get(idx as usize).copied().flatten()
    }

    /// Editable slot with some char entered.
    #[inline]
    pub fn is_filled(&self, pattern: &Pattern, idx: upos_type) -> bool {
        pattern.is_editable(idx) && self.get(idx).is_some()
    }

    /// Store c at idx. Does nothing for literal slots.
    ///
    /// There is no validation, that's the job of the caller.
    pub(crate) fn fill(&mut self, pattern: &Pattern, idx: upos_type, c: char) {
        if !pattern.is_editable(idx) {
            return;
        }
        if let Some(slot) = self.slots.get_mut(idx as usize) {
            *slot = Some(c);
        }
    }

    /// Reset an editable slot. Returns true if something changed.
    pub(crate) fn reset(&mut self, pattern: &Pattern, idx: upos_type) -> bool {
        if !self.is_filled(pattern, idx) {
            return false;
        }
        match self.slots.get_mut(idx as usize) {
            Some(slot) => {
                *slot = None;
                true
            }
            None => false,
        }
    }

    /// Reset all editable slots.
    pub fn clear(&mut self, pattern: &Pattern) {
        for idx in pattern.editable_indices() {
            if let Some(slot) = self.slots.get_mut(idx as usize) {
                *slot = None;
            }
        }
    }

    /// Value with placeholders.
    ///
    /// Always exactly one char per slot.
    pub fn value(&self) -> String {
        self.slots
            .iter()
            .map(|v| v.unwrap_or(self.placeholder))
            .collect()
    }

    /// Value without the placeholder cosmetics.
    ///
    /// Everything after the last entered char is dropped, literals
    /// included. Unfilled slots before that stay as placeholder,
    /// so the positions of the entered chars survive a
    /// set_value(raw_value()).
    pub fn raw_value(&self, pattern: &Pattern) -> String {
        let Some(last) = self.last_filled(pattern) else {
            return String::new();
        };
        self.slots
            .iter()
            .take(last as usize + 1)
            .map(|v| v.unwrap_or(self.placeholder))
            .collect()
    }

    /// Sets the content from a raw value.
    ///
    /// Scans the value left to right:
    /// * A literal slot consumes the next char if it equals the literal.
    /// * An editable slot consumes the next char and stores it if
    ///   it is valid. An invalid char or the placeholder leave
    ///   the slot empty.
    ///
    /// Broken input gives a partial value, never an error.
    pub fn set_value(&mut self, pattern: &Pattern, raw: &str) {
        self.clear(pattern);

        let mut raw = raw.chars().peekable();
        for idx in 0..pattern.len() {
            let Some(c) = raw.peek().copied() else {
                break;
            };
            match pattern.literal_at(idx) {
                Some(lit) => {
                    if c == lit {
                        raw.next();
                    }
                }
                None => {
                    raw.next();
                    if c != self.placeholder && pattern.is_valid_at(c, idx) {
                        self.fill(pattern, idx, pattern.transform_at(c, idx));
                    }
                }
            }
        }
    }

    /// Nothing entered.
    pub fn is_clear(&self, pattern: &Pattern) -> bool {
        self.filled_count(pattern) == 0
    }

    /// Every editable slot is filled.
    pub fn is_complete(&self, pattern: &Pattern) -> bool {
        pattern
            .editable_indices()
            .all(|idx| self.get(idx).is_some())
    }

    /// Number of entered chars.
    pub fn filled_count(&self, pattern: &Pattern) -> usize {
        pattern
            .editable_indices()
            .filter(|idx| self.get(*idx).is_some())
            .count()
    }

    /// Last slot with an entered char.
    pub fn last_filled(&self, pattern: &Pattern) -> Option<upos_type> {
        pattern
            .editable_indices()
            .filter(|idx| self.get(*idx).is_some())
            .last()
    }

    /// Moves the entered chars to a new pattern.
    ///
    /// The n-th editable slot of the old pattern maps to the n-th
    /// editable slot of the new one. A char the new slot doesn't
    /// accept is dropped.
    pub fn remap(&self, old: &Pattern, new: &Pattern) -> MaskBuffer {
        let mut buf = MaskBuffer::new(new, self.placeholder);
        for (old_idx, new_idx) in old.editable_indices().zip(new.editable_indices()) {
            if let Some(c) = self.get(old_idx) {
                if new.is_valid_at(c, new_idx) {
                    buf.fill(new, new_idx, new.transform_at(c, new_idx));
                }
            }
        }
        buf
    }
}
