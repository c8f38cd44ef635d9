pub mod editing;
pub mod io;
pub mod models;
pub mod outline;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{
    EditError, EditEvent, EditableField, LineBreakEdit, ListContinuation, PendingCaret, TextArea,
    begin_line_break, on_line_break,
};
pub use io::*;
pub use models::*;
pub use outline::{
    AnswerDocument, IndentLevel, LineElement, LineRole, Outline, OutlineLine, RenderPlan,
    RenderedLine, parse, render,
};
