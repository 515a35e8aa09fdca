//!
//! The visible control a masked input is bound to.
//!
//! Provides the TextControl trait to connect the state with
//! whatever shows the text and owns the native selection.
//!
//! There is a default implementation that just keeps the
//! text and selection in memory.
//!

use crate::{upos_type, Selection};
use dyn_clone::{clone_box, DynClone};
use std::fmt::Debug;

/// Access to the visible control.
pub trait TextControl: DynClone + Debug {
    /// Text currently shown.
    fn text(&self) -> String;

    /// Replace the shown text.
    fn set_text(&mut self, text: &str);

    /// Selection of the control.
    fn selection(&self) -> Selection;

    /// Set the selection of the control.
    fn set_selection(&mut self, selection: Selection);
}

/// Local control. A string and a selection in disguise.
#[derive(Debug, Default, Clone)]
pub struct LocalControl {
    text: String,
    selection: Selection,
}

impl LocalControl {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clone for Box<dyn TextControl> {
    fn clone(&self) -> Self {
        clone_box(self.as_ref())
    }
}

impl TextControl for LocalControl {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn set_text(&mut self, text: &str) {
        self.text = text.into();
        // like any control, the selection can't point past the text.
        let len = self.text.chars().count() as upos_type;
        self.selection = self.selection.clamp(len);
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }
}
