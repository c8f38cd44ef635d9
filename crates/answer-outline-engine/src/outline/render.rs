use answer_outline_config::RenderSettings;

use super::{AnswerDocument, LineElement, Outline};

/// Indentation tier of a rendered line.
///
/// Tiers are ordered: `Flush < Shallow < Deep < Subpoint`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum IndentLevel {
    /// Preamble headings, unstructured blocks and spacing.
    Flush,
    /// Top-level points of an answer without a preamble.
    Shallow,
    /// Points nested under a preamble heading.
    Deep,
    /// Lettered sub-points, deeper than any point.
    Subpoint,
}

impl IndentLevel {
    pub fn columns(self, settings: &RenderSettings) -> usize {
        match self {
            IndentLevel::Flush => 0,
            IndentLevel::Shallow => settings.shallow_indent,
            IndentLevel::Deep => settings.deep_indent,
            IndentLevel::Subpoint => settings.subpoint_indent,
        }
    }
}

/// What a rendered line represents, for hosts that style roles differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    Unstructured,
    Preamble,
    Point,
    Subpoint,
    Plain,
    Spacing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    pub indent: IndentLevel,
    pub role: LineRole,
    /// `None` for spacing lines.
    pub text: Option<String>,
}

impl RenderedLine {
    fn spacing() -> Self {
        Self {
            indent: IndentLevel::Flush,
            role: LineRole::Spacing,
            text: None,
        }
    }
}

/// Displayable form of an [`AnswerDocument`], one entry per output line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderPlan {
    pub lines: Vec<RenderedLine>,
}

impl RenderPlan {
    /// Lays the plan out as plain text, indenting each tier by the configured
    /// number of columns. Spacing lines become empty lines.
    pub fn to_text(&self, settings: &RenderSettings) -> String {
        self.lines
            .iter()
            .map(|line| match &line.text {
                Some(text) => format!("{}{}", " ".repeat(line.indent.columns(settings)), text),
                None => String::new(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Builds the render plan for a parsed answer.
///
/// The point tier is chosen once per document: `Deep` when there is a
/// preamble heading, `Shallow` otherwise. Lettered sub-points are always
/// `Subpoint`.
pub fn render(doc: &AnswerDocument) -> RenderPlan {
    match doc {
        AnswerDocument::Unstructured(text) => RenderPlan {
            lines: vec![RenderedLine {
                indent: IndentLevel::Flush,
                role: LineRole::Unstructured,
                text: Some(text.clone()),
            }],
        },
        AnswerDocument::Outline(outline) => render_outline(outline),
    }
}

fn render_outline(outline: &Outline) -> RenderPlan {
    let has_preamble = !outline.preamble.is_empty();
    let point_indent = if has_preamble {
        IndentLevel::Deep
    } else {
        IndentLevel::Shallow
    };

    let mut lines = Vec::with_capacity(outline.body.len() + 1);
    if has_preamble {
        lines.push(RenderedLine {
            indent: IndentLevel::Flush,
            role: LineRole::Preamble,
            text: Some(outline.preamble.clone()),
        });
    }

    lines.extend(outline.body.iter().map(|line| match &line.element {
        LineElement::Blank => RenderedLine::spacing(),
        LineElement::NumberedPoint { number, content } => RenderedLine {
            indent: point_indent,
            role: LineRole::Point,
            text: Some(format!("{number}. {content}")),
        },
        LineElement::LetteredSubpoint { letter, content } => RenderedLine {
            indent: IndentLevel::Subpoint,
            role: LineRole::Subpoint,
            text: Some(format!("{letter}. {content}")),
        },
        LineElement::PlainLine { content } => RenderedLine {
            indent: point_indent,
            role: LineRole::Plain,
            text: Some(content.clone()),
        },
    }));

    RenderPlan { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::parse;
    use pretty_assertions::assert_eq;

    fn indents(plan: &RenderPlan) -> Vec<IndentLevel> {
        plan.lines.iter().map(|l| l.indent).collect()
    }

    #[test]
    fn unstructured_renders_single_flush_block() {
        let plan = render(&parse("No list here.\nSecond line."));

        assert_eq!(
            plan.lines,
            vec![RenderedLine {
                indent: IndentLevel::Flush,
                role: LineRole::Unstructured,
                text: Some("No list here.\nSecond line.".into()),
            }]
        );
    }

    #[test]
    fn points_are_shallow_without_preamble() {
        let plan = render(&parse("1. var\n   a. function scoped\n2. let"));

        assert_eq!(
            indents(&plan),
            vec![
                IndentLevel::Shallow,
                IndentLevel::Subpoint,
                IndentLevel::Shallow,
            ]
        );
    }

    #[test]
    fn points_are_deep_under_preamble() {
        let plan = render(&parse("Scopes:\n1. var\nplain note\n  a. sub\n2. let"));

        assert_eq!(plan.lines[0].role, LineRole::Preamble);
        assert_eq!(plan.lines[0].text.as_deref(), Some("Scopes:"));
        assert_eq!(
            indents(&plan),
            vec![
                IndentLevel::Flush,
                IndentLevel::Deep,
                IndentLevel::Deep,
                IndentLevel::Subpoint,
                IndentLevel::Deep,
            ]
        );
    }

    #[test]
    fn subpoints_are_deeper_than_any_point_tier() {
        assert!(IndentLevel::Subpoint > IndentLevel::Deep);
        assert!(IndentLevel::Subpoint > IndentLevel::Shallow);
    }

    #[test]
    fn blank_lines_render_as_spacing() {
        let plan = render(&parse("1. one\n\n2. two"));

        assert_eq!(plan.lines[1], RenderedLine::spacing());
        assert!(plan.lines[1].text.is_none());
    }

    #[test]
    fn to_text_uses_configured_columns() {
        let plan = render(&parse("Intro\n1. var\n  a. sub\n\n2. let"));
        let settings = RenderSettings {
            shallow_indent: 1,
            deep_indent: 2,
            subpoint_indent: 5,
        };

        assert_eq!(
            plan.to_text(&settings),
            "Intro\n  1. var\n     a. sub\n\n  2. let"
        );
    }

    #[test]
    fn plan_debug_snapshot() {
        let plan = render(&parse("1. var\n  a. hoisted"));

        insta::assert_debug_snapshot!(plan, @r#"
        RenderPlan {
            lines: [
                RenderedLine {
                    indent: Shallow,
                    role: Point,
                    text: Some(
                        "1. var",
                    ),
                },
                RenderedLine {
                    indent: Subpoint,
                    role: Subpoint,
                    text: Some(
                        "a. hoisted",
                    ),
                },
            ],
        }
        "#);
    }
}
