use std::sync::OnceLock;

use regex::Regex;

use super::{lines::LineRef, span::Span};

/// Structural role of a single answer line.
///
/// Exactly one variant applies to any line; see [`LineClassifier::element`]
/// for the match order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineElement {
    /// Empty or whitespace-only line.
    Blank,
    /// `N. content` at the very start of the line.
    NumberedPoint { number: String, content: String },
    /// `a. content`, optionally indented.
    LetteredSubpoint { letter: String, content: String },
    /// Anything else; `content` is the whole line, untrimmed.
    PlainLine { content: String },
}

impl LineElement {
    /// Reconstructs a line of text that classifies back to this variant.
    pub fn source_line(&self) -> String {
        match self {
            LineElement::Blank => String::new(),
            LineElement::NumberedPoint { number, content } => format!("{number}. {content}"),
            LineElement::LetteredSubpoint { letter, content } => format!("{letter}. {content}"),
            LineElement::PlainLine { content } => content.clone(),
        }
    }

    /// Short name of the variant, used in logs and test output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            LineElement::Blank => "Blank",
            LineElement::NumberedPoint { .. } => "NumberedPoint",
            LineElement::LetteredSubpoint { .. } => "LetteredSubpoint",
            LineElement::PlainLine { .. } => "PlainLine",
        }
    }
}

/// A classified line together with where it came from in the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineLine {
    /// Byte span of the line in the answer text.
    pub span: Span,
    pub element: LineElement,
}

fn numbered_regex() -> &'static Regex {
    static NUMBERED: OnceLock<Regex> = OnceLock::new();
    NUMBERED.get_or_init(|| Regex::new(r"^([0-9]+)\.\s(.*)$").expect("Invalid numbered regex"))
}

fn lettered_regex() -> &'static Regex {
    static LETTERED: OnceLock<Regex> = OnceLock::new();
    LETTERED.get_or_init(|| Regex::new(r"^\s*([a-z])\.\s(.*)$").expect("Invalid lettered regex"))
}

/// Classifies individual answer lines.
///
/// Each line is classified on its own, without reference to its neighbours.
pub struct LineClassifier;

impl LineClassifier {
    /// Classifies a line into an [`OutlineLine`], keeping its span.
    pub fn classify(&self, lr: &LineRef<'_>) -> OutlineLine {
        OutlineLine {
            span: lr.span,
            element: self.element(lr.text),
        }
    }

    /// Classifies raw line text. First match wins: numbered, lettered,
    /// blank, then plain.
    pub fn element(&self, line: &str) -> LineElement {
        if let Some(caps) = numbered_regex().captures(line) {
            return LineElement::NumberedPoint {
                number: caps[1].to_string(),
                content: caps[2].to_string(),
            };
        }
        if let Some(caps) = lettered_regex().captures(line) {
            return LineElement::LetteredSubpoint {
                letter: caps[1].to_string(),
                content: caps[2].to_string(),
            };
        }
        if line.trim().is_empty() {
            return LineElement::Blank;
        }
        LineElement::PlainLine {
            content: line.to_string(),
        }
    }
}
