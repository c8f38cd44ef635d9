/*!
 * # Numbered List Input
 *
 * Continues numbered lists while an answer is being typed.
 *
 * ## Line-break Contract
 *
 * On every line-break keypress the host hands over an [`EditEvent`] (text plus
 * selection) and gets back a [`LineBreakEdit`]: the replacement text and where
 * the caret belongs afterwards. The decision only looks at the current line up
 * to the caret:
 *
 * - `N. ...` at column 0 inserts `"\n{N+1}. "`
 * - an empty line or a line without a numeral inserts `"\n1. "`
 * - a numeral behind leading whitespace inserts a bare `"\n"`
 *
 * Each call is independent; nothing is remembered between keypresses.
 *
 * ## Two-phase Commit
 *
 * Assigning a new value to a text field resets its caret, so the caret can
 * only be placed after the new text is showing:
 *
 * ```rust
 * use answer_outline_engine::editing::{EditableField, TextArea, begin_line_break};
 *
 * let mut field = TextArea::new("1. var");
 *
 * // 1. compute the edit and commit the text
 * let (_edit, pending) = begin_line_break(&mut field);
 *
 * // 2. host re-renders the field with the new value here
 *
 * // 3. commit the caret
 * let caret = pending.commit(&mut field).unwrap();
 * assert_eq!(field.value(), "1. var\n2. ");
 * assert_eq!(caret, 10);
 * ```
 *
 * ## Module Structure
 *
 * - **`list_input`**: `on_line_break` and the `ListContinuation` decision
 * - **`field`**: `EditableField` trait and the rope-backed `TextArea`
 * - **`commit`**: `begin_line_break` / `PendingCaret` two-phase API
 */

pub mod commit;
pub mod field;
pub mod list_input;

pub use commit::{EditError, PendingCaret, begin_line_break};
pub use field::{EditableField, TextArea};
pub use list_input::{EditEvent, LineBreakEdit, ListContinuation, on_line_break};

/// Byte offset of the `char_idx`-th character, or `text.len()` past the end.
pub(crate) fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}
