//!
//! Date input with a chrono format.
//!
//! The input mask is derived from the format, the value
//! is parsed with the same format.
//!

use crate::_private::NonExhaustive;
use crate::event::{HandleEvent, ReadOnly, Regular, TextOutcome};
use crate::text_input_mask::MaskedInputState;
use crate::MaskError;
use chrono::format::{Item, Numeric, StrftimeItems};
use chrono::NaiveDate;
use crossterm::event::Event;
use log::debug;
use std::fmt::Write;
use unicode_segmentation::UnicodeSegmentation;

/// State & event-handling.
/// Use [DateInputState::with_pattern] to set the date pattern.
#[derive(Debug, Clone)]
pub struct DateInputState {
    /// Uses MaskedInputState for the actual functionality.
    pub widget: MaskedInputState,
    /// The chrono format pattern.
    pattern: String,

    pub non_exhaustive: NonExhaustive,
}

impl DateInputState {
    /// New state for the given chrono format.
    pub fn with_pattern<S: AsRef<str>>(pattern: S) -> Result<Self, MaskError> {
        let mask = date_mask(pattern.as_ref())?;
        Ok(Self {
            widget: MaskedInputState::new(&mask)?,
            pattern: pattern.as_ref().to_string(),
            non_exhaustive: NonExhaustive,
        })
    }

    /// chrono format string.
    ///
    /// Generates a mask according to the format and overwrites
    /// whatever mask has been set before.
    pub fn set_format<S: AsRef<str>>(&mut self, pattern: S) -> Result<(), MaskError> {
        let mask = date_mask(pattern.as_ref())?;
        self.widget.set_mask(&mask)?;
        self.pattern = pattern.as_ref().to_string();
        Ok(())
    }

    /// chrono format string.
    #[inline]
    pub fn format(&self) -> &str {
        self.pattern.as_str()
    }

    /// The generated mask.
    #[inline]
    pub fn mask(&self) -> &str {
        self.widget.mask()
    }

    /// Raw text.
    #[inline]
    pub fn text(&self) -> String {
        self.widget.text()
    }

    /// Nothing entered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.widget.is_empty()
    }

    /// Reset to empty.
    #[inline]
    pub fn clear(&mut self) -> bool {
        self.widget.clear()
    }

    /// Set the date value.
    pub fn set_value(&mut self, date: NaiveDate) {
        let mut v = String::new();
        if write!(v, "{}", date.format(self.pattern.as_str())).is_err() {
            debug!("set_value: can't format {} with {:?}", date, self.pattern);
            return;
        }
        self.widget.set_value(&v);
    }

    /// Parses the text according to the given pattern.
    #[inline]
    pub fn value(&self) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(self.widget.text().as_str(), self.pattern.as_str())
    }
}

/// Input mask for a chrono format.
///
/// Numeric date fields become runs of `9`, literals are escaped.
/// Anything else, text fields like month names included, can't
/// be expressed as a mask.
pub fn date_mask(pattern: &str) -> Result<String, MaskError> {
    let err = || MaskError::InvalidPattern(pattern.to_string());

    let mut mask = String::new();
    let items = StrftimeItems::new(pattern).parse().map_err(|_| err())?;
    for t in &items {
        match t {
            Item::Literal(s) => {
                for c in s.graphemes(true) {
                    mask.push('\\');
                    mask.push_str(c);
                }
            }
            Item::OwnedLiteral(s) => {
                for c in s.graphemes(true) {
                    mask.push('\\');
                    mask.push_str(c);
                }
            }
            Item::Space(s) => {
                for c in s.graphemes(true) {
                    mask.push('\\');
                    mask.push_str(c);
                }
            }
            Item::OwnedSpace(s) => {
                for c in s.graphemes(true) {
                    mask.push('\\');
                    mask.push_str(c);
                }
            }
            Item::Numeric(v, _) => match v {
                Numeric::Year | Numeric::IsoYear => mask.push_str("9999"),
                Numeric::YearDiv100
                | Numeric::YearMod100
                | Numeric::IsoYearDiv100
                | Numeric::IsoYearMod100
                | Numeric::Month
                | Numeric::Day
                | Numeric::WeekFromSun
                | Numeric::WeekFromMon
                | Numeric::IsoWeek => mask.push_str("99"),
                Numeric::NumDaysFromSun | Numeric::WeekdayFromMon => mask.push('9'),
                Numeric::Ordinal => mask.push_str("999"),
                _ => return Err(err()),
            },
            _ => return Err(err()),
        }
    }

    debug!("date_mask: {:?} -> {:?}", pattern, mask);
    Ok(mask)
}

impl HandleEvent<Event, Regular, TextOutcome> for DateInputState {
    fn handle(&mut self, event: &Event, _keymap: Regular) -> TextOutcome {
        self.widget.handle(event, Regular)
    }
}

impl HandleEvent<Event, ReadOnly, TextOutcome> for DateInputState {
    fn handle(&mut self, event: &Event, _keymap: ReadOnly) -> TextOutcome {
        self.widget.handle(event, ReadOnly)
    }
}

/// Handle all events.
/// Text events are only processed if focus is true.
pub fn handle_events(state: &mut DateInputState, focus: bool, event: &Event) -> TextOutcome {
    state.widget.focus = focus;
    HandleEvent::handle(state, event, Regular)
}

/// Handle only navigation events.
/// Text events are only processed if focus is true.
pub fn handle_readonly_events(
    state: &mut DateInputState,
    focus: bool,
    event: &Event,
) -> TextOutcome {
    state.widget.focus = focus;
    HandleEvent::handle(state, event, ReadOnly)
}
