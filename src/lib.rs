#![doc = include_str!("../readme.md")]
#![allow(clippy::uninlined_format_args)]
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::ops::Range;

pub mod date_input;
pub mod format_char;
pub mod mask_op;
pub mod text_control;
pub mod text_input_mask;
pub mod undo_buffer;

mod mask_buffer;
mod pattern;
mod text_mask_core;

pub mod event {
    //!
    //! Event-handler traits and results.
    //!

    /// Handle an event.
    ///
    /// The qualifier selects the key-bindings that apply.
    pub trait HandleEvent<Event, Qualifier, Return>
    where
        Return: ConsumedEvent,
    {
        fn handle(&mut self, event: &Event, qualifier: Qualifier) -> Return;
    }

    /// Has the event been used in some way.
    pub trait ConsumedEvent {
        fn is_consumed(&self) -> bool;
    }

    /// All the key-bindings, editing included.
    #[derive(Debug)]
    pub struct Regular;

    /// Runs only the navigation events, not any editing.
    #[derive(Debug)]
    pub struct ReadOnly;

    /// Result of event handling.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub enum TextOutcome {
        /// The given event has not been used at all.
        Continue,
        /// The event has been recognized, but the result was nil.
        /// Further processing for this event may stop.
        Unchanged,
        /// The event has been recognized and there is some change
        /// due to it.
        /// Further processing for this event may stop.
        /// Rendering the ui is advised.
        Changed,
        /// Text content has changed.
        TextChanged,
    }

    impl ConsumedEvent for TextOutcome {
        fn is_consumed(&self) -> bool {
            *self != TextOutcome::Continue
        }
    }

    // Useful for converting most navigation/edit results.
    impl From<bool> for TextOutcome {
        fn from(value: bool) -> Self {
            if value {
                TextOutcome::Changed
            } else {
                TextOutcome::Unchanged
            }
        }
    }
}

pub mod core {
    //!
    //! Core structs for masked editing.
    //! Used to implement the input states.
    //!

    pub use crate::mask_buffer::MaskBuffer;
    pub use crate::pattern::{Pattern, PatternSlot};
    pub use crate::text_mask_core::{MaskOptions, MaskedCore, PatternChange, PLACEHOLDER_CHAR};
}

#[derive(Debug, PartialEq)]
pub enum MaskError {
    /// The mask can't be compiled.
    ///
    /// Contains the offending mask.
    InvalidPattern(String),
}

impl Display for MaskError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl Error for MaskError {}

/// Position type.
#[allow(non_camel_case_types)]
pub type upos_type = u32;

/// Selection in the mask.
///
/// Offsets are slot-indices, both lie in `0..=len`.
/// A selection with start == end is a caret.
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Selection {
    pub start: upos_type,
    pub end: upos_type,
}

impl Debug for Selection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl From<Range<upos_type>> for Selection {
    fn from(value: Range<upos_type>) -> Self {
        Self::new(value.start, value.end)
    }
}

impl From<Selection> for Range<upos_type> {
    fn from(value: Selection) -> Self {
        value.start..value.end
    }
}

impl Selection {
    /// New selection.
    ///
    /// The positions are swapped if start > end.
    pub const fn new(start: upos_type, end: upos_type) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Caret at the given position.
    pub const fn caret(pos: upos_type) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Is a caret.
    #[inline]
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Selection contains the position.
    #[inline]
    pub fn contains_pos(&self, pos: upos_type) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Cap both ends to 0..=len.
    ///
    /// Out-of-range selections are never an error, they are
    /// just pulled back into range.
    #[inline]
    pub fn clamp(self, len: upos_type) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

mod _private {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct NonExhaustive;
}
