//!
//! Edit operations for a masked value.
//!
//! Each operation takes the pattern, the buffer and the current
//! selection and returns an [EditOutcome]. A rejected operation
//! doesn't touch the buffer.
//!
//! [MaskedCore](crate::core::MaskedCore) wraps these with history.
//!

use crate::mask_buffer::MaskBuffer;
use crate::pattern::Pattern;
use crate::{upos_type, Selection};
use log::debug;
use unicode_segmentation::UnicodeSegmentation;

/// Result of an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOutcome {
    /// Some change happened. If false nothing should be
    /// reflected to the ui.
    pub accepted: bool,
    /// Selection after the edit. Unchanged if not accepted.
    pub selection: Selection,
}

impl EditOutcome {
    #[inline]
    pub fn accepted(selection: Selection) -> Self {
        Self {
            accepted: true,
            selection,
        }
    }

    #[inline]
    pub fn rejected(selection: Selection) -> Self {
        Self {
            accepted: false,
            selection,
        }
    }
}

/// Reset every editable slot in the range. Literals stay as they are.
///
/// Returns true if any slot changed.
pub fn clear_range(pattern: &Pattern, buf: &mut MaskBuffer, range: Selection) -> bool {
    let range = range.clamp(pattern.len());
    let mut changed = false;
    for idx in range.start..range.end {
        changed |= buf.reset(pattern, idx);
    }
    changed
}

/// Type a char.
///
/// The char goes to the first editable slot at or after the selection
/// start. A selected range is cleared first, but only if the char is
/// accepted at all.
pub fn insert_char(
    pattern: &Pattern,
    buf: &mut MaskBuffer,
    selection: Selection,
    c: char,
) -> EditOutcome {
    let sel = selection.clamp(pattern.len());

    let Some(target) = pattern.next_editable(sel.start) else {
        debug!("insert_char: no editable slot after {}", sel.start);
        return EditOutcome::rejected(selection);
    };
    if !pattern.is_valid_at(c, target) {
        debug!("insert_char: {:?} invalid at {}", c, target);
        return EditOutcome::rejected(selection);
    }

    if !sel.is_caret() {
        clear_range(pattern, buf, sel);
    }
    buf.fill(pattern, target, pattern.transform_at(c, target));

    EditOutcome::accepted(Selection::caret(pattern.skip_literals(target + 1)))
}

/// Backspace.
///
/// Clears a selected range, or the first editable slot before the
/// caret. The caret lands on the cleared slot.
pub fn remove_prev(pattern: &Pattern, buf: &mut MaskBuffer, selection: Selection) -> EditOutcome {
    let sel = selection.clamp(pattern.len());

    if !sel.is_caret() {
        clear_range(pattern, buf, sel);
        return EditOutcome::accepted(Selection::caret(sel.start));
    }

    let Some(idx) = pattern.prev_editable(sel.start) else {
        debug!("remove_prev: no editable slot before {}", sel.start);
        return EditOutcome::rejected(selection);
    };
    buf.reset(pattern, idx);
    EditOutcome::accepted(Selection::caret(idx))
}

/// Forward delete.
///
/// Clears a selected range, or the first editable slot at or after
/// the caret. The caret moves on to the next editable slot.
pub fn remove_next(pattern: &Pattern, buf: &mut MaskBuffer, selection: Selection) -> EditOutcome {
    let sel = selection.clamp(pattern.len());

    if !sel.is_caret() {
        clear_range(pattern, buf, sel);
        return EditOutcome::accepted(Selection::caret(sel.end));
    }

    let Some(idx) = pattern.next_editable(sel.start) else {
        debug!("remove_next: no editable slot after {}", sel.start);
        return EditOutcome::rejected(selection);
    };
    buf.reset(pattern, idx);
    EditOutcome::accepted(Selection::caret(pattern.skip_literals(idx + 1)))
}

/// Paste some text.
///
/// Fills consecutive editable slots starting at the selection. Stops
/// at the first char that doesn't fit or at the end of the pattern.
/// A char that equals the literal at the current position is stepped
/// over, so pasting a formatted value works too.
///
/// Rejected if not a single char could be used.
pub fn paste(
    pattern: &Pattern,
    buf: &mut MaskBuffer,
    selection: Selection,
    text: &str,
) -> EditOutcome {
    let sel = selection.clamp(pattern.len());

    let mut scratch = buf.clone();
    if !sel.is_caret() {
        clear_range(pattern, &mut scratch, sel);
    }

    let mut pos = sel.start;
    let mut count = 0;
    for g in text.graphemes(true) {
        let mut it = g.chars();
        // a slot holds exactly one char.
        let (Some(c), None) = (it.next(), it.next()) else {
            break;
        };

        if pattern.literal_at(pos) == Some(c) {
            pos += 1;
            continue;
        }
        let Some(target) = pattern.next_editable(pos) else {
            break;
        };
        if !pattern.is_valid_at(c, target) {
            break;
        }
        scratch.fill(pattern, target, pattern.transform_at(c, target));
        count += 1;
        pos = target + 1;
    }

    if count == 0 {
        debug!("paste: nothing usable in {:?}", text);
        return EditOutcome::rejected(selection);
    }

    *buf = scratch;
    EditOutcome::accepted(Selection::caret(pattern.skip_literals(pos)))
}

/// Pulls a caret back behind the last entered char before it.
///
/// A caret in front of the first editable slot goes to that slot.
/// Ranges are left alone.
pub fn snap_caret(pattern: &Pattern, buf: &MaskBuffer, selection: Selection) -> Selection {
    let sel = selection.clamp(pattern.len());
    if !sel.is_caret() {
        return sel;
    }

    let first: upos_type = pattern.first_editable();
    let mut idx = sel.start;
    if idx <= first {
        return Selection::caret(first);
    }
    while idx > first {
        if buf.is_filled(pattern, idx - 1) {
            break;
        }
        idx -= 1;
    }
    Selection::caret(idx)
}
