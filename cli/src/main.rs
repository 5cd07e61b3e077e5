use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

use mkdoc::{Config, ModuleDocument, Syntax};

#[derive(Parser)]
#[command(name = "mkdoc", version, about = "Generate Markdown and HTML docs from source comments")]
struct Cli {
    /// Source tree to scan
    #[arg(long, default_value = "src")]
    root: PathBuf,

    /// Directory for the generated .md files (must exist)
    #[arg(long, default_value = "docs")]
    docs: PathBuf,

    /// Directory for the generated .html files (must exist)
    #[arg(long, default_value = "docs/html")]
    html: PathBuf,

    /// Documentation comment syntax of the sources
    #[arg(long, value_enum, default_value_t = SyntaxArg::Hash)]
    syntax: SyntaxArg,

    /// Stylesheet linked from every HTML page
    #[arg(long, default_value = "md.css")]
    stylesheet: String,

    /// Report documentation blocks left open at end of file
    #[arg(long)]
    warn_unterminated: bool,

    /// Disable colored diagnostics
    #[arg(long)]
    no_color: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum SyntaxArg {
    /// `##` ... `#` comment blocks, .coffee sources
    Hash,
    /// `/**` ... `*/` comment blocks, .js sources
    Block,
}

impl From<SyntaxArg> for Syntax {
    fn from(arg: SyntaxArg) -> Self {
        match arg {
            SyntaxArg::Hash => Syntax::HASH,
            SyntaxArg::Block => Syntax::BLOCK,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config {
        root: cli.root,
        docs_dir: cli.docs,
        html_dir: cli.html,
        syntax: cli.syntax.into(),
        stylesheet: cli.stylesheet,
    };

    let mut stdout = std::io::stdout();
    let documents = match mkdoc::generate(&config, &mut stdout) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    };

    if cli.warn_unterminated {
        let color_choice = if cli.no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        emit_unterminated(&documents, color_choice);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn emit_unterminated(documents: &[ModuleDocument], color_choice: ColorChoice) {
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    let mut files = SimpleFiles::new();

    for doc in documents {
        let Some(unterminated) = &doc.unterminated else {
            continue;
        };
        let file_id = files.add(
            doc.module.path.display().to_string(),
            unterminated.source.clone(),
        );
        let diagnostic = unterminated.to_diagnostic(file_id);
        let _ = term::emit_to_write_style(&mut writer.lock(), &config, &files, &diagnostic);
    }
}
