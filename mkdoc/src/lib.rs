pub mod diagnostic;
pub mod error;
pub mod extract;
pub mod format;
pub mod render;
pub mod scanner;
pub mod writer;

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info};

pub use crate::diagnostic::Unterminated;
pub use crate::error::Error;
pub use crate::extract::syntax::{CommentStyle, Syntax};
pub use crate::scanner::Module;

use crate::extract::Extractor;

/// Where to read sources from and where the generated docs go.
#[derive(Debug, Clone)]
pub struct Config {
    pub root: PathBuf,
    /// Receives `<module>.md`. Must already exist.
    pub docs_dir: PathBuf,
    /// Receives `<module>.html`. Must already exist.
    pub html_dir: PathBuf,
    pub syntax: Syntax,
    /// Stylesheet href written into every page.
    pub stylesheet: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            root: PathBuf::from("src"),
            docs_dir: PathBuf::from("docs"),
            html_dir: PathBuf::from("docs/html"),
            syntax: Syntax::HASH,
            stylesheet: "md.css".to_string(),
        }
    }
}

/// The Markdown sections of one module, one per documentation block.
#[derive(Debug, Clone)]
pub struct ModuleDocument {
    pub module: Module,
    pub fragments: Vec<String>,
    /// Set when the file ended inside a block.
    pub unterminated: Option<Unterminated>,
}

impl ModuleDocument {
    /// The full Markdown text, sections separated by a blank line.
    pub fn markdown(&self) -> String {
        self.fragments.join("\n\n")
    }
}

/// Read one module's file and format every documentation block in it.
pub fn document_module(module: &Module, syntax: &Syntax) -> Result<ModuleDocument, Error> {
    let bytes = fs::read(&module.path).map_err(Error::read(&module.path))?;
    let source = String::from_utf8_lossy(&bytes);

    let extraction = Extractor::new(syntax).extract(&source);
    let fragments: Vec<String> = extraction
        .blocks
        .iter()
        .map(|block| format::format_block(&block.lines, syntax.function_tokens))
        .collect();

    debug!(
        module = %module.name,
        blocks = fragments.len(),
        unterminated = extraction.unterminated.is_some(),
        "extracted docs"
    );

    Ok(ModuleDocument {
        module: module.clone(),
        fragments,
        unterminated: extraction.unterminated.map(|span| Unterminated {
            span,
            source: source.into_owned(),
        }),
    })
}

/// Document every module under `config.root`, one module at a time in scan
/// order. A progress line per module goes to `progress` before its files are
/// written. The first error, including a failed progress write, stops the
/// run; files already written are left in place.
pub fn generate(
    config: &Config,
    progress: &mut impl Write,
) -> Result<Vec<ModuleDocument>, Error> {
    let modules = scanner::scan(&config.root, config.syntax.extension)?;
    debug!(root = %config.root.display(), modules = modules.len(), "scanned source tree");

    let mut documents = Vec::with_capacity(modules.len());
    for module in &modules {
        let document = document_module(module, &config.syntax)?;

        writeln!(progress, "Write docs for module: {}", module.name).map_err(Error::Progress)?;

        writer::write_markdown(&config.docs_dir, &document)?;
        render::write_html(&config.html_dir, &document, &config.stylesheet)?;
        documents.push(document);
    }

    info!(
        modules = documents.len(),
        sections = documents.iter().map(|d| d.fragments.len()).sum::<usize>(),
        "docs written"
    );
    Ok(documents)
}
