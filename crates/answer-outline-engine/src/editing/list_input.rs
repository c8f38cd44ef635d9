use std::sync::OnceLock;

use log::trace;
use regex::Regex;
use xi_rope::{Rope, delta::Builder};

use super::char_to_byte;

/// A line-break keypress as reported by the host text field.
///
/// Offsets are character indices into `full_text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditEvent<'a> {
    pub full_text: &'a str,
    pub caret_start: usize,
    pub caret_end: usize,
}

impl<'a> EditEvent<'a> {
    pub fn new(full_text: &'a str, caret_start: usize, caret_end: usize) -> Self {
        Self {
            full_text,
            caret_start,
            caret_end,
        }
    }

    /// Collapsed caret at the end of `full_text`.
    pub fn at_end(full_text: &'a str) -> Self {
        let len = full_text.chars().count();
        Self::new(full_text, len, len)
    }

    /// Clamps the caret into `0 <= start <= end <= len`.
    fn clamped(&self) -> (usize, usize) {
        let len = self.full_text.chars().count();
        let end = self.caret_end.min(len);
        let start = self.caret_start.min(end);
        (start, end)
    }
}

/// What a line break inserts, decided from the line the caret is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListContinuation {
    /// The line starts with `N.`; insert the next number.
    Continue { next: i32 },
    /// The line is empty or has no numeral; start a new list at 1.
    StartList,
    /// The line has a numeral behind leading whitespace; plain line break.
    PlainBreak,
}

fn leading_numeral_regex() -> &'static Regex {
    static LEADING: OnceLock<Regex> = OnceLock::new();
    LEADING.get_or_init(|| Regex::new(r"^([0-9]+)\.\s*").expect("Invalid leading numeral regex"))
}

fn numeral_prefix_regex() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| Regex::new(r"^[0-9]+\.").expect("Invalid numeral prefix regex"))
}

impl ListContinuation {
    /// Decides the continuation for the text of the current line up to the
    /// caret.
    ///
    /// The numeral must sit at column 0 to be continued. An indented numeral
    /// (`"  3. item"`) only gets a bare newline.
    pub fn for_line(line: &str) -> Self {
        if let Some(caps) = leading_numeral_regex().captures(line) {
            // Numerals that overflow i32 count as non-numbered lines.
            return match caps[1].parse::<i32>().ok().and_then(|n| n.checked_add(1)) {
                Some(next) => ListContinuation::Continue { next },
                None => ListContinuation::StartList,
            };
        }

        let trimmed = line.trim();
        if !trimmed.is_empty() && numeral_prefix_regex().is_match(trimmed) {
            ListContinuation::PlainBreak
        } else {
            ListContinuation::StartList
        }
    }

    /// The text inserted at the caret.
    pub fn insertion(self) -> String {
        match self {
            ListContinuation::Continue { next } => format!("\n{next}. "),
            ListContinuation::StartList => "\n1. ".to_string(),
            ListContinuation::PlainBreak => "\n".to_string(),
        }
    }
}

/// Result of evaluating a line break.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBreakEdit {
    pub new_text: String,
    /// Character offset of the caret once `new_text` is committed.
    pub new_caret: usize,
    pub continuation: ListContinuation,
    pub insertion: String,
}

/// Returns the line containing the caret, up to the caret.
fn current_line(text_before_caret: &str) -> &str {
    match text_before_caret.rfind('\n') {
        Some(idx) => &text_before_caret[idx + 1..],
        None => text_before_caret,
    }
}

/// Computes the replacement text and caret for a line-break keypress.
///
/// The selection `[caret_start, caret_end)` is replaced by the insertion
/// chosen by [`ListContinuation::for_line`]. Only the text before the caret
/// on the current line is inspected. Never fails and has no side effects;
/// applying the result to the field is the host's job.
pub fn on_line_break(event: &EditEvent<'_>) -> LineBreakEdit {
    let (caret_start, caret_end) = event.clamped();
    let text = event.full_text;
    let start_byte = char_to_byte(text, caret_start);
    let end_byte = char_to_byte(text, caret_end);

    let continuation = ListContinuation::for_line(current_line(&text[..start_byte]));
    let insertion = continuation.insertion();

    let mut builder = Builder::new(text.len());
    builder.replace(start_byte..end_byte, Rope::from(insertion.as_str()));
    let new_text = builder.build().apply(&Rope::from(text)).to_string();
    let new_caret = caret_start + insertion.chars().count();

    trace!("line break at {caret_start}..{caret_end}: {continuation:?}, caret -> {new_caret}");

    LineBreakEdit {
        new_text,
        new_caret,
        continuation,
        insertion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("5. foo", ListContinuation::Continue { next: 6 })]
    #[case("1.", ListContinuation::Continue { next: 2 })]
    #[case("9.   spaced", ListContinuation::Continue { next: 10 })]
    #[case("007. bond", ListContinuation::Continue { next: 8 })]
    #[case("", ListContinuation::StartList)]
    #[case("   ", ListContinuation::StartList)]
    #[case("abc", ListContinuation::StartList)]
    #[case("a. lettered", ListContinuation::StartList)]
    #[case("  3. Cannot be updated", ListContinuation::PlainBreak)]
    #[case("\t12. tabbed", ListContinuation::PlainBreak)]
    #[case("2147483647. max", ListContinuation::StartList)]
    #[case("99999999999. huge", ListContinuation::StartList)]
    fn continuation_for_line(#[case] line: &str, #[case] expected: ListContinuation) {
        assert_eq!(ListContinuation::for_line(line), expected);
    }

    #[test]
    fn insertion_text_per_branch() {
        assert_eq!(ListContinuation::Continue { next: 6 }.insertion(), "\n6. ");
        assert_eq!(ListContinuation::StartList.insertion(), "\n1. ");
        assert_eq!(ListContinuation::PlainBreak.insertion(), "\n");
    }

    #[test]
    fn continues_numbering_at_end_of_line() {
        let edit = on_line_break(&EditEvent::at_end("5. foo"));

        assert_eq!(edit.insertion, "\n6. ");
        assert_eq!(edit.new_text, "5. foo\n6. ");
        assert_eq!(edit.new_caret, 6 + 4);
    }

    #[test]
    fn only_text_before_caret_is_inspected() {
        // Caret sits after "ab" on a line that continues with "1. x"
        let edit = on_line_break(&EditEvent::new("ab1. x", 2, 2));

        assert_eq!(edit.continuation, ListContinuation::StartList);
        assert_eq!(edit.new_text, "ab\n1. 1. x");
        assert_eq!(edit.new_caret, 6);
    }

    #[test]
    fn uses_line_containing_caret() {
        let text = "Intro\n3. third\nmore";
        let edit = on_line_break(&EditEvent::new(text, 14, 14));

        assert_eq!(edit.new_text, "Intro\n3. third\n4. \nmore");
        assert_eq!(edit.new_caret, 18);
    }

    #[test]
    fn replaces_selection() {
        let edit = on_line_break(&EditEvent::new("1. keep DROP", 8, 12));

        assert_eq!(edit.new_text, "1. keep \n2. ");
        assert_eq!(edit.new_caret, 12);
    }

    #[rstest]
    #[case("é\n3. x", 1, 5, "é\n1. x", 5)]
    #[case("1. a\n2. b", 4, 7, "1. a\n2.  b", 8)]
    fn selection_across_lines_uses_line_at_selection_start(
        #[case] text: &str,
        #[case] start: usize,
        #[case] end: usize,
        #[case] expected_text: &str,
        #[case] expected_caret: usize,
    ) {
        let edit = on_line_break(&EditEvent::new(text, start, end));

        assert_eq!(edit.new_text, expected_text);
        assert_eq!(edit.new_caret, expected_caret);
    }

    #[test]
    fn indented_numeral_gets_bare_newline() {
        let edit = on_line_break(&EditEvent::at_end("  3. Cannot be updated"));

        assert_eq!(edit.insertion, "\n");
        assert_eq!(edit.new_caret, 23);
    }

    #[test]
    fn caret_counts_characters_not_bytes() {
        let text = "1. café ☕";
        let edit = on_line_break(&EditEvent::at_end(text));

        assert_eq!(edit.new_text, "1. café ☕\n2. ");
        assert_eq!(edit.new_caret, text.chars().count() + 4);
    }

    #[test]
    fn out_of_range_caret_is_clamped() {
        let edit = on_line_break(&EditEvent::new("1. a", 50, 10));

        assert_eq!(edit.new_text, "1. a\n2. ");
        assert_eq!(edit.new_caret, 8);
    }

    #[test]
    fn empty_field_starts_list() {
        let edit = on_line_break(&EditEvent::at_end(""));

        assert_eq!(edit.new_text, "\n1. ");
        assert_eq!(edit.new_caret, 4);
    }
}
