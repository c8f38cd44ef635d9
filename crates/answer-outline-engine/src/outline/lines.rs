use super::span::Span;

/// A reference to a single line of an answer with its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRef<'a> {
    /// Byte span of this line in the answer (excludes the line ending).
    pub span: Span,
    /// The line text without its terminating `\n` or `\r\n`.
    pub text: &'a str,
}

/// Returns an iterator over the `\n`-separated lines of `text`.
///
/// `base` is the byte offset of `text` within the full answer, so spans
/// always point into the original string. A trailing newline produces a
/// final empty line. A `\r` before the `\n` is part of the line ending,
/// not the line.
pub fn lines_with_spans(text: &str, base: usize) -> impl Iterator<Item = LineRef<'_>> {
    let mut offset = base;
    text.split('\n').map(move |raw| {
        let start = offset;
        offset += raw.len() + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        LineRef {
            span: Span {
                start,
                end: start + line.len(),
            },
            text: line,
        }
    })
}
