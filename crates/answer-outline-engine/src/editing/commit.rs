use log::warn;
use thiserror::Error;

use super::{
    field::EditableField,
    list_input::{EditEvent, LineBreakEdit, on_line_break},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error(
        "field text changed before the caret was placed (expected {expected_len} chars, found {actual_len})"
    )]
    StaleText {
        expected_len: usize,
        actual_len: usize,
    },
}

/// Caret placement owed to a field whose text was just replaced.
///
/// Returned by [`begin_line_break`]. The host must call [`PendingCaret::commit`]
/// only after it has observed the new text in the field (for a UI toolkit,
/// after the re-render that displays it).
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "the caret is only placed once the pending commit is applied"]
pub struct PendingCaret {
    expected_text: String,
    caret: usize,
}

impl PendingCaret {
    /// The caret offset that will be applied, in characters.
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// The text the field must hold for the caret to be valid.
    pub fn expected_text(&self) -> &str {
        &self.expected_text
    }

    /// Places the caret, provided the field still shows the text this caret
    /// was computed for. Returns the caret offset on success.
    pub fn commit<F: EditableField + ?Sized>(self, field: &mut F) -> Result<usize, EditError> {
        let actual = field.value();
        if actual != self.expected_text {
            let err = EditError::StaleText {
                expected_len: self.expected_text.chars().count(),
                actual_len: actual.chars().count(),
            };
            warn!("dropping caret placement: {err}");
            return Err(err);
        }
        field.set_caret(self.caret);
        Ok(self.caret)
    }
}

/// First phase of a line break: evaluates the edit against the field's
/// current text and selection, then commits the new text.
pub fn begin_line_break<F: EditableField + ?Sized>(field: &mut F) -> (LineBreakEdit, PendingCaret) {
    let value = field.value();
    let selection = field.selection();
    let edit = on_line_break(&EditEvent::new(&value, selection.start, selection.end));

    field.set_value(edit.new_text.clone());

    let pending = PendingCaret {
        expected_text: edit.new_text.clone(),
        caret: edit.new_caret,
    };
    (edit, pending)
}
