use std::fs;
use std::path::{Path, PathBuf};

use pulldown_cmark::{CowStr, Event, Options, Parser as CmarkParser, Tag, TagEnd, html};

use crate::ModuleDocument;
use crate::error::Error;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render Markdown to an HTML fragment.
///
/// Raw HTML in the input is escaped rather than passed through (an HTML
/// block becomes a paragraph of escaped text), code blocks
/// are wrapped in a `codehilite` div for client-side highlighting, and a
/// list only starts after a blank line, never in the middle of a paragraph.
pub fn render_html(markdown: &str) -> String {
    let source = sane_lists(markdown);
    let parser = CmarkParser::new_ext(&source, Options::empty());

    let events = parser.flat_map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => vec![Event::Text(raw)],
        Event::Start(Tag::HtmlBlock) => vec![Event::Start(Tag::Paragraph)],
        Event::End(TagEnd::HtmlBlock) => vec![Event::End(TagEnd::Paragraph)],
        Event::Start(Tag::CodeBlock(kind)) => vec![
            Event::Html(CowStr::Borrowed("<div class=\"codehilite\">")),
            Event::Start(Tag::CodeBlock(kind)),
        ],
        Event::End(TagEnd::CodeBlock) => vec![
            Event::End(TagEnd::CodeBlock),
            Event::Html(CowStr::Borrowed("</div>\n")),
        ],
        other => vec![other],
    });

    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}

/// A complete standalone page for one module.
pub fn render_page(title: &str, markdown: &str, stylesheet: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <title>{title}</title>\n\
         <link rel=\"stylesheet\" type=\"text/css\" href=\"{href}\">\n\
         </head>\n\
         <body>\n\
         \n\
         {body}\n\
         \n\
         </body>\n\
         </html>",
        title = escape_html(title),
        href = escape_html(stylesheet),
        body = render_html(markdown),
    )
}

/// Write `<dir>/<module>.html`, replacing any previous file. `dir` must exist.
pub fn write_html(
    dir: &Path,
    document: &ModuleDocument,
    stylesheet: &str,
) -> Result<PathBuf, Error> {
    let path = dir.join(format!("{}.html", document.module.name));
    let page = render_page(&document.module.name, &document.markdown(), stylesheet);
    fs::write(&path, page).map_err(Error::write(&path))?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Clone, Copy, PartialEq)]
enum LineKind {
    Blank,
    Paragraph,
    Other,
}

/// Escape list markers that directly follow a paragraph line so CommonMark
/// does not let the list interrupt the paragraph.
fn sane_lists(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut prev = LineKind::Blank;
    let mut in_list = false;
    let mut fence: Option<&str> = None;

    for line in markdown.split_inclusive('\n') {
        let trimmed = line.trim_start();

        if let Some(marker) = fence {
            if trimmed.starts_with(marker) {
                fence = None;
                prev = LineKind::Other;
            }
            out.push_str(line);
            continue;
        }

        if trimmed.trim_end().is_empty() {
            prev = LineKind::Blank;
            out.push_str(line);
            continue;
        }

        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            fence = Some(&trimmed[..3]);
            in_list = false;
            prev = LineKind::Other;
            out.push_str(line);
            continue;
        }

        if trimmed.starts_with('#') {
            in_list = false;
            prev = LineKind::Other;
            out.push_str(line);
            continue;
        }

        let indent = line.len() - trimmed.len();
        match list_marker(trimmed) {
            Some(at) if indent < 4 => {
                if in_list || prev != LineKind::Paragraph {
                    in_list = true;
                    prev = LineKind::Other;
                    out.push_str(line);
                } else {
                    let split = indent + at;
                    out.push_str(&line[..split]);
                    out.push('\\');
                    out.push_str(&line[split..]);
                    prev = LineKind::Paragraph;
                }
            }
            _ => {
                if prev == LineKind::Blank && indent == 0 {
                    in_list = false;
                }
                prev = LineKind::Paragraph;
                out.push_str(line);
            }
        }
    }
    out
}

/// If `line` starts with a list item marker, the byte offset of the marker
/// character to escape (`-`, `*`, `+`, or the `.`/`)` after the number).
fn list_marker(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let followed_by_space = |i: usize| bytes.get(i).is_none_or(|b| *b == b' ' || *b == b'\t');

    match *bytes.first()? {
        b'-' | b'*' | b'+' if followed_by_space(1) => Some(0),
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            match bytes.get(digits) {
                Some(b'.' | b')') if digits <= 9 && followed_by_space(digits + 1) => Some(digits),
                _ => None,
            }
        }
        _ => None,
    }
}
