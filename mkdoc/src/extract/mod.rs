pub mod syntax;

use std::ops::Range;

use tracing::trace;

use crate::extract::syntax::{CommentStyle, Syntax};

/// The lines captured between one pair of block markers, marker lines
/// excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    pub lines: Vec<String>,
    /// Byte span in the source, from the open marker line to the close line.
    pub span: Range<usize>,
}

/// Everything found in one source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    /// Closed blocks, in source order.
    pub blocks: Vec<RawBlock>,
    /// Span of a block still open at end of file. Its lines are discarded.
    pub unterminated: Option<Range<usize>>,
}

/// Line-oriented scanner that pulls documentation blocks out of a file.
pub struct Extractor {
    style: CommentStyle,
}

enum State {
    Outside,
    Inside {
        indent: usize,
        start: usize,
        lines: Vec<String>,
    },
}

impl Extractor {
    pub fn new(syntax: &Syntax) -> Self {
        Extractor {
            style: syntax.style,
        }
    }

    pub fn extract(&self, source: &str) -> Extraction {
        let mut out = Extraction::default();
        let mut state = State::Outside;
        let mut offset = 0;

        for raw in source.split_inclusive('\n') {
            let line_start = offset;
            offset += raw.len();
            let line = raw
                .strip_suffix('\n')
                .map(|l| l.strip_suffix('\r').unwrap_or(l))
                .unwrap_or(raw);

            state = match state {
                State::Outside => match self.style.open(line) {
                    Some(indent) => {
                        trace!(offset = line_start, indent, "doc block opened");
                        State::Inside {
                            indent,
                            start: line_start,
                            lines: Vec::new(),
                        }
                    }
                    None => State::Outside,
                },
                State::Inside {
                    indent,
                    start,
                    mut lines,
                } => {
                    if self.style.closes(line) {
                        trace!(lines = lines.len(), "doc block closed");
                        out.blocks.push(RawBlock {
                            lines,
                            span: start..offset,
                        });
                        State::Outside
                    } else {
                        lines.push(self.style.clean(line, indent));
                        State::Inside {
                            indent,
                            start,
                            lines,
                        }
                    }
                }
            };
        }

        if let State::Inside { start, .. } = state {
            out.unterminated = Some(start..source.len());
        }
        out
    }
}
