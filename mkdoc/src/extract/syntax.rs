/// How documentation comments are delimited in a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `##` opens a block, every following `#` line continues it.
    Hash,
    /// `/**` opens a block, `*/` closes it.
    Block,
}

/// Everything the extractor and formatter need to know about one source
/// language: its comment delimiters, its file extension, and which header
/// prefixes mark a function-like entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syntax {
    pub style: CommentStyle,
    /// Extension stripped from module names, including the leading dot.
    pub extension: &'static str,
    /// Header prefixes that render as a level-2 heading.
    pub function_tokens: &'static [&'static str],
}

const HASH_TOKENS: &[&str] = &[
    "string", "void", "data", "private", "object", "int", "bool", "Promise",
];

const BLOCK_TOKENS: &[&str] = &[
    "string", "void", "data", "private", "object", "int", "bool", "Promise", "[]string",
    "async",
];

impl Syntax {
    pub const HASH: Syntax = Syntax {
        style: CommentStyle::Hash,
        extension: ".coffee",
        function_tokens: HASH_TOKENS,
    };

    pub const BLOCK: Syntax = Syntax {
        style: CommentStyle::Block,
        extension: ".js",
        function_tokens: BLOCK_TOKENS,
    };
}

impl Default for Syntax {
    fn default() -> Self {
        Syntax::HASH
    }
}

impl CommentStyle {
    /// Does this (already stripped) line open a documentation block?
    /// Returns the column the marker starts at, used as the block indent.
    pub(crate) fn open(self, line: &str) -> Option<usize> {
        let stripped = line.trim();
        match self {
            CommentStyle::Hash => stripped.starts_with("##").then_some(0),
            CommentStyle::Block => {
                if !stripped.starts_with("/**") {
                    return None;
                }
                let byte = line.find("/**").unwrap_or(0);
                Some(line[..byte].chars().count())
            }
        }
    }

    pub(crate) fn closes(self, line: &str) -> bool {
        let stripped = line.trim();
        match self {
            CommentStyle::Hash => !stripped.starts_with('#'),
            CommentStyle::Block => stripped.starts_with("*/"),
        }
    }

    /// Turn a raw line inside a block into the text that gets buffered.
    pub(crate) fn clean(self, line: &str, indent: usize) -> String {
        match self {
            CommentStyle::Hash => strip_hashes(line.trim()).to_string(),
            CommentStyle::Block => skip_chars(line, indent).trim_end().to_string(),
        }
    }
}

/// Remove a leading run of `#` (plus one whitespace character after it)
/// and a trailing run of `#`.
fn strip_hashes(line: &str) -> &str {
    let rest = line.trim_start_matches('#');
    let rest = if rest.len() < line.len() {
        let mut chars = rest.chars();
        match chars.next() {
            Some(c) if c.is_whitespace() => chars.as_str(),
            _ => rest,
        }
    } else {
        rest
    };
    rest.trim_end_matches('#')
}

fn skip_chars(line: &str, n: usize) -> &str {
    match line.char_indices().nth(n) {
        Some((byte, _)) => &line[byte..],
        None => "",
    }
}
