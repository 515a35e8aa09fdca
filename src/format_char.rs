//!
//! Format characters decide which chars may go into an editable slot.
//!
//! The default table:
//!
//! * `9`, `1`: a digit
//! * `a`: a letter
//! * `A`: a letter, converted to uppercase
//! * `*`: a letter or digit
//! * `#`: a letter or digit, converted to uppercase
//!
//! Every other char in a mask is a literal. `\` escapes the
//! following char, so `\9` is a literal 9.
//!
//! The table can be replaced with your own. Anything that implements
//! [FormatChar] can be used, [FnFormat] wraps plain fns.
//!

use dyn_clone::{clone_box, DynClone};
use rustc_hash::FxHashMap;
use std::fmt::Debug;

/// Escapes the next char of a mask.
pub const ESCAPE_CHAR: char = '\\';

/// Validation for one editable slot.
pub trait FormatChar: DynClone + Debug {
    /// Can c be entered here.
    fn validate(&self, c: char) -> bool;

    /// Map the char before it is stored.
    ///
    /// Only called for chars that passed validate.
    fn transform(&self, c: char) -> char {
        c
    }
}

/// The usual char classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// 0-9
    Digit,
    /// Alphabetic.
    Letter,
    /// Alphabetic or 0-9.
    LetterOrDigit,
    /// Anything but control chars.
    Any,
}

impl FormatChar for CharClass {
    fn validate(&self, c: char) -> bool {
        match self {
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Letter => c.is_alphabetic(),
            CharClass::LetterOrDigit => c.is_alphabetic() || c.is_ascii_digit(),
            CharClass::Any => !c.is_control(),
        }
    }
}

/// Char class that stores uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upper(pub CharClass);

impl FormatChar for Upper {
    fn validate(&self, c: char) -> bool {
        self.0.validate(c)
    }

    fn transform(&self, c: char) -> char {
        // 'ß' and friends uppercase to more than one char.
        // they stay as they are, a slot holds exactly one char.
        let mut upper = c.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(u), None) => u,
            _ => c,
        }
    }
}

/// Format char from plain functions.
#[derive(Debug, Clone, Copy)]
pub struct FnFormat {
    validate: fn(char) -> bool,
    transform: fn(char) -> char,
}

fn no_transform(c: char) -> char {
    c
}

impl FnFormat {
    pub fn new(validate: fn(char) -> bool) -> Self {
        Self {
            validate,
            transform: no_transform,
        }
    }

    /// Add a transformation.
    pub fn with_transform(mut self, transform: fn(char) -> char) -> Self {
        self.transform = transform;
        self
    }
}

impl FormatChar for FnFormat {
    fn validate(&self, c: char) -> bool {
        (self.validate)(c)
    }

    fn transform(&self, c: char) -> char {
        (self.transform)(c)
    }
}

impl Clone for Box<dyn FormatChar> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

impl FormatChar for Box<dyn FormatChar> {
    fn validate(&self, c: char) -> bool {
        self.as_ref().validate(c)
    }

    fn transform(&self, c: char) -> char {
        self.as_ref().transform(c)
    }
}

/// Maps trigger chars to their format.
#[derive(Debug, Clone)]
pub struct FormatCharacters {
    table: FxHashMap<char, Box<dyn FormatChar>>,
}

impl Default for FormatCharacters {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert('9', CharClass::Digit);
        table.insert('1', CharClass::Digit);
        table.insert('a', CharClass::Letter);
        table.insert('A', Upper(CharClass::Letter));
        table.insert('*', CharClass::LetterOrDigit);
        table.insert('#', Upper(CharClass::LetterOrDigit));
        table
    }
}

impl FormatCharacters {
    /// The default table.
    pub fn new() -> Self {
        Self::default()
    }

    /// A table without any format chars.
    pub fn empty() -> Self {
        Self {
            table: FxHashMap::default(),
        }
    }

    /// Builder style insert.
    pub fn with(mut self, trigger: char, format: impl FormatChar + 'static) -> Self {
        self.insert(trigger, format);
        self
    }

    /// Add or replace a format char.
    ///
    /// The escape char `\` can't be used as trigger, it is
    /// always consumed as escape.
    pub fn insert(&mut self, trigger: char, format: impl FormatChar + 'static) {
        self.table.insert(trigger, Box::new(format));
    }

    /// Remove a format char. The trigger is a literal afterwards.
    pub fn remove(&mut self, trigger: char) -> bool {
        self.table.remove(&trigger).is_some()
    }

    /// Format for the trigger char.
    pub fn get(&self, trigger: char) -> Option<&(dyn FormatChar + 'static)> {
        self.table.get(&trigger).map(|v| v.as_ref())
    }

    /// Is a format char.
    pub fn contains(&self, trigger: char) -> bool {
        self.table.contains_key(&trigger)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
