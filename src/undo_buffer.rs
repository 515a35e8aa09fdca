//! Undo functionality.

use crate::_private::NonExhaustive;
use crate::mask_buffer::MaskBuffer;
use crate::Selection;
use dyn_clone::{clone_box, DynClone};
use std::fmt::Debug;

/// Undo buffer.
///
/// Keeps a stack of snapshots with a cursor. The entry at the cursor
/// always matches the live state of the input.
///
/// Keeps up to undo_count steps that can be undone.
pub trait UndoBuffer: DynClone + Debug {
    /// How many undoes are stored?
    fn undo_count(&self) -> u32;

    /// How many undoes are stored?
    fn set_undo_count(&mut self, n: u32);

    /// Record the state after an edit.
    ///
    /// If the value equals the one at the cursor only the
    /// selection is updated. Otherwise redoes are truncated and
    /// the entry becomes the new cursor.
    fn append(&mut self, entry: UndoEntry);

    /// Drop everything and start with the given state.
    fn clear(&mut self, initial: UndoEntry);

    /// Entry at the cursor.
    fn current(&self) -> Option<&UndoEntry>;

    /// Get the number of possible undo operations.
    fn open_undo(&self) -> usize;

    /// Get the number of possible redo operations.
    fn open_redo(&self) -> usize;

    /// Step back. Returns the state to restore.
    fn undo(&mut self) -> Option<&UndoEntry>;

    /// Step forward. Returns the state to restore.
    fn redo(&mut self) -> Option<&UndoEntry>;
}

/// Storage for undo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    pub value: MaskBuffer,
    pub selection: Selection,
    pub non_exhaustive: NonExhaustive,
}

impl UndoEntry {
    pub fn new(value: MaskBuffer, selection: Selection) -> Self {
        Self {
            value,
            selection,
            non_exhaustive: NonExhaustive,
        }
    }
}

/// Standard implementation for undo.
#[derive(Debug, Clone)]
pub struct UndoVec {
    undo_count: u32,
    buf: Vec<UndoEntry>,
    // cursor
    idx: usize,
}

impl Default for UndoVec {
    fn default() -> Self {
        Self {
            undo_count: 99,
            buf: Vec::default(),
            idx: 0,
        }
    }
}

impl UndoVec {
    /// New undo.
    pub fn new(undo_count: u32) -> Self {
        Self {
            undo_count,
            ..Default::default()
        }
    }

    fn trim_undo(&mut self) {
        // the cursor entry is not an undo, so there is one more.
        // never drop the cursor entry or a redo.
        let cap = self.undo_count as usize + 1;
        if self.buf.len() > cap {
            let drop = (self.buf.len() - cap).min(self.idx);
            self.buf.drain(..drop);
            self.idx = self.idx.saturating_sub(drop);
        }
    }
}

impl Clone for Box<dyn UndoBuffer> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

impl UndoBuffer for UndoVec {
    fn undo_count(&self) -> u32 {
        self.undo_count
    }

    fn set_undo_count(&mut self, n: u32) {
        self.undo_count = n;
        self.trim_undo();
    }

    fn append(&mut self, entry: UndoEntry) {
        if let Some(last) = self.buf.get_mut(self.idx) {
            if last.value == entry.value {
                last.selection = entry.selection;
                return;
            }
            // Dump redo.
            self.buf.truncate(self.idx + 1);
        }

        self.buf.push(entry);
        self.idx = self.buf.len() - 1;
        self.trim_undo();
    }

    fn clear(&mut self, initial: UndoEntry) {
        self.buf.clear();
        self.buf.push(initial);
        self.idx = 0;
    }

    fn current(&self) -> Option<&UndoEntry> {
        self.buf.get(self.idx)
    }

    fn open_undo(&self) -> usize {
        if self.buf.is_empty() {
            0
        } else {
            self.idx
        }
    }

    fn open_redo(&self) -> usize {
        if self.buf.is_empty() {
            0
        } else {
            self.buf.len() - self.idx - 1
        }
    }

    fn undo(&mut self) -> Option<&UndoEntry> {
        if self.open_undo() > 0 {
            self.idx -= 1;
            self.buf.get(self.idx)
        } else {
            None
        }
    }

    fn redo(&mut self) -> Option<&UndoEntry> {
        if self.open_redo() > 0 {
            self.idx += 1;
            self.buf.get(self.idx)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format_char::FormatCharacters;
    use crate::pattern::Pattern;

    fn entry(pattern: &Pattern, raw: &str) -> UndoEntry {
        UndoEntry::new(
            MaskBuffer::with_value(pattern, '_', raw),
            Selection::caret(raw.len() as u32),
        )
    }

    #[test]
    fn test_trim() {
        let p = Pattern::compile("9999", &FormatCharacters::default()).expect("mask");
        let mut u = UndoVec::new(2);
        u.clear(entry(&p, ""));
        for raw in ["1", "12", "123", "1234"] {
            u.append(entry(&p, raw));
        }
        assert_eq!(u.open_undo(), 2);
        assert_eq!(u.open_redo(), 0);
        assert_eq!(u.current(), Some(&entry(&p, "1234")));

        assert_eq!(u.undo(), Some(&entry(&p, "123")));
        assert_eq!(u.undo(), Some(&entry(&p, "12")));
        assert_eq!(u.undo(), None);
        assert_eq!(u.open_redo(), 2);

        u.set_undo_count(0);
        assert_eq!(u.open_undo(), 0);
    }

    #[test]
    fn test_same_value() {
        let p = Pattern::compile("99", &FormatCharacters::default()).expect("mask");
        let mut u = UndoVec::default();
        u.clear(entry(&p, "1"));
        let mut e = entry(&p, "1");
        e.selection = Selection::caret(0);
        u.append(e.clone());
        assert_eq!(u.open_undo(), 0);
        assert_eq!(u.current(), Some(&e));
    }
}
