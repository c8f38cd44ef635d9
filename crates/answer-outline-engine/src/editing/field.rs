use std::ops::Range;

use xi_rope::{Rope, delta::Builder};

use super::char_to_byte;

/// The host text field the list controller edits.
///
/// Offsets are character indices. Like a browser textarea, assigning a new
/// value is not expected to preserve the caret; it is placed separately once
/// the value has been committed.
pub trait EditableField {
    /// The field's current text.
    fn value(&self) -> String;
    /// Current selection; collapsed when `start == end`.
    fn selection(&self) -> Range<usize>;
    fn set_value(&mut self, value: String);
    /// Collapses the selection to `caret`.
    fn set_caret(&mut self, caret: usize);
}

/// In-memory multi-line text field backed by an xi-rope buffer.
#[derive(Debug, Clone)]
pub struct TextArea {
    buffer: Rope,
    /// Selection as character offsets into `buffer`
    selection: Range<usize>,
    /// Incremented on every change to `buffer`
    version: u64,
}

impl TextArea {
    /// Creates a field holding `text` with the caret at the end.
    pub fn new(text: &str) -> Self {
        let len = text.chars().count();
        Self {
            buffer: Rope::from(text),
            selection: len..len,
            version: 0,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Number of characters in the field.
    pub fn char_len(&self) -> usize {
        self.buffer.to_string().chars().count()
    }

    pub fn caret(&self) -> usize {
        self.selection.end
    }

    /// Selects `range`, clamped to the text.
    pub fn select(&mut self, range: Range<usize>) {
        let len = self.char_len();
        let end = range.end.min(len);
        self.selection = range.start.min(end)..end;
    }

    /// Replaces the selection with `text` and places the caret after it.
    pub fn insert_str(&mut self, text: &str) {
        let start = self.selection.start;
        self.replace_chars(self.selection.clone(), text);
        let caret = start + text.chars().count();
        self.selection = caret..caret;
    }

    pub fn insert_char(&mut self, c: char) {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf));
    }

    /// Deletes the selection, or the character before a collapsed caret.
    pub fn backspace(&mut self) {
        let Range { start, end } = self.selection.clone();
        if start != end {
            self.replace_chars(start..end, "");
            self.selection = start..start;
        } else if start > 0 {
            self.replace_chars(start - 1..start, "");
            self.selection = start - 1..start - 1;
        }
    }

    pub fn move_left(&mut self) {
        let caret = self.selection.start.saturating_sub(1);
        self.selection = caret..caret;
    }

    pub fn move_right(&mut self) {
        let caret = (self.selection.end + 1).min(self.char_len());
        self.selection = caret..caret;
    }

    /// Moves the caret to the start of its line.
    pub fn move_line_start(&mut self) {
        let text = self.buffer.to_string();
        let (line, _) = line_col(&text, self.caret());
        let caret = line_start(&text, line);
        self.selection = caret..caret;
    }

    /// Moves the caret to the end of its line.
    pub fn move_line_end(&mut self) {
        let text = self.buffer.to_string();
        let (line, _) = line_col(&text, self.caret());
        let start = line_start(&text, line);
        let len = text.split('\n').nth(line).map_or(0, |l| l.chars().count());
        let caret = start + len;
        self.selection = caret..caret;
    }

    /// Zero-based `(line, column)` of the caret, in characters.
    pub fn caret_line_col(&self) -> (usize, usize) {
        line_col(&self.buffer.to_string(), self.caret())
    }

    fn replace_chars(&mut self, range: Range<usize>, text: &str) {
        let current = self.buffer.to_string();
        let start = char_to_byte(&current, range.start);
        let end = char_to_byte(&current, range.end);

        let mut builder = Builder::new(self.buffer.len());
        builder.replace(start..end, Rope::from(text));
        self.buffer = builder.build().apply(&self.buffer);
        self.version += 1;
    }
}

impl Default for TextArea {
    fn default() -> Self {
        Self::new("")
    }
}

impl EditableField for TextArea {
    fn value(&self) -> String {
        self.buffer.to_string()
    }

    fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Replaces the whole text. The caret moves to the end, as a textarea's
    /// does when its value is assigned.
    fn set_value(&mut self, value: String) {
        let len = value.chars().count();
        self.buffer = Rope::from(value);
        self.selection = len..len;
        self.version += 1;
    }

    fn set_caret(&mut self, caret: usize) {
        let caret = caret.min(self.char_len());
        self.selection = caret..caret;
    }
}

fn line_col(text: &str, caret: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    for c in text.chars().take(caret) {
        if c == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Character offset of the first character on `line`.
fn line_start(text: &str, line: usize) -> usize {
    text.split('\n')
        .take(line)
        .map(|l| l.chars().count() + 1)
        .sum()
}
