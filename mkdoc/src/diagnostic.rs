use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label};

/// A documentation block that was still open when its file ended.
/// The block is dropped from the output; this only exists for reporting.
#[derive(Debug, Clone)]
pub struct Unterminated {
    pub span: Range<usize>,
    /// Full text of the file, kept so the warning can be rendered.
    pub source: String,
}

impl Unterminated {
    pub fn to_diagnostic(&self, file_id: usize) -> Diagnostic<usize> {
        Diagnostic::warning()
            .with_message("unterminated documentation block")
            .with_labels(vec![
                Label::primary(file_id, self.span.clone()).with_message("never closed"),
            ])
            .with_notes(vec!["the block was dropped from the generated docs".to_string()])
    }
}
