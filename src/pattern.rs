use crate::format_char::{FormatChar, FormatCharacters, ESCAPE_CHAR};
use crate::{upos_type, MaskError};
use log::debug;
use std::fmt;
use std::fmt::{Display, Formatter};

/// One position of a compiled mask.
#[derive(Debug, Clone)]
pub enum PatternSlot {
    /// Fixed char, always part of the value.
    Literal(char),
    /// Editable slot.
    Editable {
        /// Char in the mask that created the slot.
        trigger: char,
        format: Box<dyn FormatChar>,
    },
}

impl PatternSlot {
    #[inline]
    pub fn is_editable(&self) -> bool {
        matches!(self, PatternSlot::Editable { .. })
    }

    /// The literal char, if any.
    #[inline]
    pub fn literal(&self) -> Option<char> {
        match self {
            PatternSlot::Literal(c) => Some(*c),
            PatternSlot::Editable { .. } => None,
        }
    }

    /// Can c be stored here. Never true for a literal.
    #[inline]
    pub fn accepts(&self, c: char) -> bool {
        match self {
            PatternSlot::Literal(_) => false,
            PatternSlot::Editable { format, .. } => format.validate(c),
        }
    }

    /// Char as it is stored. Literals return c unchanged.
    #[inline]
    pub fn transform(&self, c: char) -> char {
        match self {
            PatternSlot::Literal(_) => c,
            PatternSlot::Editable { format, .. } => format.transform(c),
        }
    }
}

impl Display for PatternSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PatternSlot::Literal(c) => write!(f, "{}", c),
            PatternSlot::Editable { trigger, .. } => write!(f, "{}", trigger),
        }
    }
}

/// Compiled mask.
///
/// The slot-index is the char-index into the value, there is no
/// other position space.
#[derive(Debug, Clone)]
pub struct Pattern {
    // source
    mask: String,
    slots: Vec<PatternSlot>,
    first_editable: upos_type,
    last_editable: upos_type,
}

impl Pattern {
    /// Compile the mask with the given format chars.
    ///
    /// Fails for an empty mask, a mask ending in a lone escape
    /// and a mask without any editable slot.
    pub fn compile(mask: &str, format_chars: &FormatCharacters) -> Result<Self, MaskError> {
        if mask.is_empty() {
            return Err(MaskError::InvalidPattern(mask.into()));
        }

        let mut slots = Vec::new();
        let mut esc = false;
        for c in mask.chars() {
            if esc {
                esc = false;
                slots.push(PatternSlot::Literal(c));
            } else if c == ESCAPE_CHAR {
                esc = true;
            } else if let Some(format) = format_chars.get(c) {
                slots.push(PatternSlot::Editable {
                    trigger: c,
                    format: dyn_clone::clone_box(format),
                });
            } else {
                slots.push(PatternSlot::Literal(c));
            }
        }
        if esc {
            debug!("compile: dangling escape in {:?}", mask);
            return Err(MaskError::InvalidPattern(mask.into()));
        }

        let first_editable = slots.iter().position(|v| v.is_editable());
        let last_editable = slots.iter().rposition(|v| v.is_editable());
        let (Some(first_editable), Some(last_editable)) = (first_editable, last_editable) else {
            debug!("compile: no editable slot in {:?}", mask);
            return Err(MaskError::InvalidPattern(mask.into()));
        };

        Ok(Self {
            mask: mask.into(),
            slots,
            first_editable: first_editable as upos_type,
            last_editable: last_editable as upos_type,
        })
    }

    /// The source mask.
    #[inline]
    pub fn mask(&self) -> &str {
        self.mask.as_str()
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> upos_type {
        self.slots.len() as upos_type
    }

    /// A compiled pattern is never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn slots(&self) -> &[PatternSlot] {
        &self.slots
    }

    #[inline]
    pub fn slot(&self, idx: upos_type) -> Option<&PatternSlot> {
        self.slots.get(idx as usize)
    }

    /// Editable slot at idx. False for out of bounds.
    #[inline]
    pub fn is_editable(&self, idx: upos_type) -> bool {
        self.slot(idx).is_some_and(|v| v.is_editable())
    }

    /// Literal char at idx.
    #[inline]
    pub fn literal_at(&self, idx: upos_type) -> Option<char> {
        self.slot(idx).and_then(|v| v.literal())
    }

    #[inline]
    pub fn first_editable(&self) -> upos_type {
        self.first_editable
    }

    #[inline]
    pub fn last_editable(&self) -> upos_type {
        self.last_editable
    }

    /// Number of editable slots.
    pub fn editable_count(&self) -> usize {
        self.slots.iter().filter(|v| v.is_editable()).count()
    }

    /// Indices of all editable slots.
    pub fn editable_indices(&self) -> impl Iterator<Item = upos_type> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_editable())
            .map(|(i, _)| i as upos_type)
    }

    /// First editable slot at or after pos.
    pub fn next_editable(&self, pos: upos_type) -> Option<upos_type> {
        (pos..self.len()).find(|i| self.is_editable(*i))
    }

    /// Last editable slot strictly before pos.
    pub fn prev_editable(&self, pos: upos_type) -> Option<upos_type> {
        (0..pos.min(self.len())).rev().find(|i| self.is_editable(*i))
    }

    /// Moves pos forward over literals. Ends at the next
    /// editable slot or at len().
    pub fn skip_literals(&self, pos: upos_type) -> upos_type {
        self.next_editable(pos).unwrap_or(self.len())
    }

    /// Can c be stored at idx.
    #[inline]
    pub fn is_valid_at(&self, c: char, idx: upos_type) -> bool {
        self.slot(idx).is_some_and(|v| v.accepts(c))
    }

    /// Char as it would be stored at idx.
    #[inline]
    pub fn transform_at(&self, c: char, idx: upos_type) -> char {
        match self.slot(idx) {
            Some(slot) => slot.transform(c),
            None => c,
        }
    }
}
