//! Turns one raw documentation block into a Markdown section.
//!
//! The leading non-blank lines of a block are its header. A header whose
//! first line begins with one of the syntax's function tokens (a return
//! type such as `string` or `void`) becomes a `##` heading; anything else
//! is a top-level `#` heading. Multi-line headers collapse onto one line.

/// Which heading level a block header renders at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingKind {
    /// Plain section title, level 1.
    Heading,
    /// Function or data signature, level 2.
    Function,
}

impl HeadingKind {
    pub fn level(self) -> u8 {
        match self {
            HeadingKind::Heading => 1,
            HeadingKind::Function => 2,
        }
    }
}

/// Classify a header by its first line. An empty line never matches.
pub fn classify(first_line: &str, function_tokens: &[&str]) -> HeadingKind {
    if !first_line.is_empty() && function_tokens.iter().any(|t| first_line.starts_with(t)) {
        HeadingKind::Function
    } else {
        HeadingKind::Heading
    }
}

/// Index of the first blank or whitespace-only line, or `lines.len()`.
pub fn header_len(lines: &[String]) -> usize {
    lines
        .iter()
        .position(|l| l.trim().is_empty())
        .unwrap_or(lines.len())
}

pub fn format_block(lines: &[String], function_tokens: &[&str]) -> String {
    let (header, body) = lines.split_at(header_len(lines));
    let header: Vec<&str> = header.iter().map(|l| l.trim()).collect();

    let kind = classify(header.first().copied().unwrap_or(""), function_tokens);
    let mut out = "#".repeat(kind.level() as usize);
    out.push(' ');
    out.push_str(&header.join(" "));

    for line in body {
        out.push('\n');
        out.push_str(line);
    }

    // The heading line always leads, so only the tail needs trimming. Keep
    // the marker's space when there is nothing after it.
    let trimmed = out.trim_end().len();
    if trimmed > kind.level() as usize {
        out.truncate(trimmed);
    } else {
        out.truncate(kind.level() as usize + 1);
    }
    out
}
