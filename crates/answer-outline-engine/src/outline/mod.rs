//! # Answer Outlines
//!
//! Re-derives the structure of a stored answer purely from its text.
//!
//! ## Parsing
//!
//! 1. **Marker search**: the answer is scanned for the first `<digits>. `
//!    marker. Without one, the whole answer is a single unstructured block.
//! 2. **Split**: text before the marker becomes the (trimmed) preamble; the
//!    rest is split on `\n`.
//! 3. **Line classification** (`classify`): every line becomes exactly one
//!    [`LineElement`], keeping its byte span into the answer.
//!
//! Numbering is never validated or repaired: `1.` followed by `3.` renders
//! as written.
//!
//! ## Modules
//!
//! - **`span`**: byte ranges into the answer text
//! - **`lines`**: `\n` splitting with spans
//! - **`classify`**: `LineClassifier` and the `LineElement` sum type
//! - **`render`**: `RenderPlan` with per-line indentation levels

pub mod classify;
pub mod lines;
pub mod render;
pub mod span;

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

pub use classify::{LineClassifier, LineElement, OutlineLine};
pub use lines::{LineRef, lines_with_spans};
pub use render::{IndentLevel, LineRole, RenderPlan, RenderedLine, render};
pub use span::Span;

/// Structured view of an answer string. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerDocument {
    /// No numbered marker anywhere: the answer is shown as one block.
    Unstructured(String),
    /// At least one marker was found.
    Outline(Outline),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outline {
    /// Trimmed text before the first marker. May be empty.
    pub preamble: String,
    /// Every line from the first marker onward, in source order.
    pub body: Vec<OutlineLine>,
}

impl AnswerDocument {
    /// The preamble, or `""` for unstructured answers.
    pub fn preamble(&self) -> &str {
        match self {
            AnswerDocument::Unstructured(_) => "",
            AnswerDocument::Outline(outline) => &outline.preamble,
        }
    }

    /// The classified body lines, empty for unstructured answers.
    pub fn body(&self) -> &[OutlineLine] {
        match self {
            AnswerDocument::Unstructured(_) => &[],
            AnswerDocument::Outline(outline) => &outline.body,
        }
    }

    /// The body elements without their spans.
    pub fn elements(&self) -> impl Iterator<Item = &LineElement> {
        self.body().iter().map(|line| &line.element)
    }

    /// The unstructured block, if no marker was found.
    pub fn unstructured(&self) -> Option<&str> {
        match self {
            AnswerDocument::Unstructured(text) => Some(text),
            AnswerDocument::Outline(_) => None,
        }
    }
}

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"[0-9]+\.\s").expect("Invalid marker regex"))
}

/// Parses an answer into an [`AnswerDocument`].
///
/// Total and pure: every input yields a document, and the same input always
/// yields the same document. The marker may appear mid-line, in which case
/// the text before it on that line belongs to the preamble.
pub fn parse(answer: &str) -> AnswerDocument {
    let Some(marker) = marker_regex().find(answer) else {
        debug!("answer has no numbered marker; rendering unstructured");
        return AnswerDocument::Unstructured(answer.to_string());
    };

    let preamble = answer[..marker.start()].trim().to_string();
    let classifier = LineClassifier;
    let body: Vec<OutlineLine> = lines_with_spans(&answer[marker.start()..], marker.start())
        .map(|lr| classifier.classify(&lr))
        .collect();

    debug!(
        "parsed answer outline: preamble={} lines={}",
        !preamble.is_empty(),
        body.len()
    );

    AnswerDocument::Outline(Outline { preamble, body })
}
