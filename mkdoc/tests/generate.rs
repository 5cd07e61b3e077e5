use std::fs;
use std::io;
use std::path::Path;

use mkdoc::scanner::{module_name, scan};
use mkdoc::{Config, Error, Syntax, generate};

const HELLO: &str = "##\n# string Hello\n#\n# Returns greeting.\n##\nhello = -> 'hi'\n";

fn workspace() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::create_dir_all(dir.path().join("docs/html")).unwrap();
    dir
}

fn config(base: &Path, syntax: Syntax) -> Config {
    Config {
        root: base.join("src"),
        docs_dir: base.join("docs"),
        html_dir: base.join("docs/html"),
        syntax,
        ..Config::default()
    }
}

fn run(config: &Config) -> (Vec<mkdoc::ModuleDocument>, String) {
    let mut progress = Vec::new();
    let docs = generate(config, &mut progress).expect("generate failed");
    (docs, String::from_utf8(progress).unwrap())
}

#[test]
fn module_names_are_dotted() {
    let root = Path::new("src");
    assert_eq!(module_name(root, Path::new("src/foo/bar.js"), ".js"), "foo.bar");
    assert_eq!(module_name(root, Path::new("src/brain.coffee"), ".coffee"), "brain");
    assert_eq!(module_name(root, Path::new("src/lang/coffee.js"), ".js"), "lang.coffee");
    assert_eq!(module_name(root, Path::new("src/README.md"), ".js"), "README.md");
    assert_eq!(
        module_name(root, Path::new("src/x.coffee/y.coffee"), ".coffee"),
        "x.y"
    );
    assert_eq!(
        module_name(root, Path::new("src/a.coffee.orig"), ".coffee"),
        "a.orig"
    );
}

#[test]
fn scan_lists_files_before_subdirectories() {
    let dir = workspace();
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("lang")).unwrap();
    fs::write(src.join("lang/javascript.js"), "").unwrap();
    fs::write(src.join("utils.js"), "").unwrap();
    fs::write(src.join("brain.js"), "").unwrap();
    fs::write(src.join("notes.txt"), "").unwrap();

    let names: Vec<String> = scan(&src, ".js")
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["brain", "notes.txt", "utils", "lang.javascript"]);
}

#[cfg(unix)]
#[test]
fn scan_does_not_follow_directory_symlinks() {
    let dir = workspace();
    let src = dir.path().join("src");
    fs::write(src.join("a.coffee"), HELLO).unwrap();
    std::os::unix::fs::symlink(&src, src.join("loop")).unwrap();

    let names: Vec<String> = scan(&src, ".coffee")
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["a"]);
}

#[cfg(unix)]
#[test]
fn scan_keeps_file_symlinks() {
    let dir = workspace();
    let src = dir.path().join("src");
    fs::write(dir.path().join("shared.coffee"), HELLO).unwrap();
    std::os::unix::fs::symlink(dir.path().join("shared.coffee"), src.join("linked.coffee"))
        .unwrap();

    let names: Vec<String> = scan(&src, ".coffee")
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(names, vec!["linked"]);
}

#[test]
fn end_to_end_hash_syntax() {
    let dir = workspace();
    fs::write(dir.path().join("src/hello.coffee"), HELLO).unwrap();

    let (docs, progress) = run(&config(dir.path(), Syntax::HASH));
    assert_eq!(progress, "Write docs for module: hello\n");
    assert_eq!(docs.len(), 1);

    let md = fs::read_to_string(dir.path().join("docs/hello.md")).unwrap();
    assert_eq!(md, "## string Hello\n\nReturns greeting.");
    assert_eq!(md, docs[0].markdown());

    let html = fs::read_to_string(dir.path().join("docs/html/hello.html")).unwrap();
    assert!(html.contains("<title>hello</title>"), "{}", html);
    assert!(
        html.contains("<h2>string Hello</h2>\n<p>Returns greeting.</p>"),
        "{}",
        html
    );
}

#[test]
fn end_to_end_block_syntax() {
    let dir = workspace();
    let src = dir.path().join("src");
    fs::create_dir_all(src.join("lib")).unwrap();
    fs::write(
        src.join("lib/brain.js"),
        "/**\nBrain\n\nReply logic.\n*/\nclass Brain {\n\t/**\n\tstring reply (string user)\n\n\tFetch a reply.\n\t*/\n\treply() {}\n}\n",
    )
    .unwrap();

    let (docs, progress) = run(&config(dir.path(), Syntax::BLOCK));
    assert_eq!(progress, "Write docs for module: lib.brain\n");
    assert_eq!(
        docs[0].fragments,
        vec![
            "# Brain\n\nReply logic.",
            "## string reply (string user)\n\nFetch a reply.",
        ]
    );

    let md = fs::read_to_string(dir.path().join("docs/lib.brain.md")).unwrap();
    assert_eq!(
        md,
        "# Brain\n\nReply logic.\n\n## string reply (string user)\n\nFetch a reply."
    );
    assert!(dir.path().join("docs/html/lib.brain.html").is_file());
}

#[test]
fn files_without_docs_still_get_outputs() {
    let dir = workspace();
    fs::write(dir.path().join("src/hello.coffee"), HELLO).unwrap();
    fs::write(dir.path().join("src/data.json"), "{\"a\": 1}\n").unwrap();

    let (docs, progress) = run(&config(dir.path(), Syntax::HASH));
    assert_eq!(
        progress,
        "Write docs for module: data.json\nWrite docs for module: hello\n"
    );
    assert!(docs[0].fragments.is_empty());
    assert_eq!(fs::read_to_string(dir.path().join("docs/data.json.md")).unwrap(), "");
    assert!(dir.path().join("docs/html/data.json.html").is_file());
}

#[test]
fn unterminated_block_is_left_out() {
    let dir = workspace();
    fs::write(
        dir.path().join("src/partial.coffee"),
        format!("{}##\n# Lost\n# never closed", HELLO),
    )
    .unwrap();

    let (docs, _) = run(&config(dir.path(), Syntax::HASH));
    assert_eq!(docs[0].fragments.len(), 1);
    assert!(docs[0].unterminated.is_some());

    let md = fs::read_to_string(dir.path().join("docs/partial.md")).unwrap();
    assert!(!md.contains("Lost"), "{}", md);
}

#[test]
fn outputs_are_overwritten() {
    let dir = workspace();
    fs::write(dir.path().join("src/hello.coffee"), HELLO).unwrap();
    fs::write(dir.path().join("docs/hello.md"), "stale content that is longer").unwrap();

    run(&config(dir.path(), Syntax::HASH));
    let md = fs::read_to_string(dir.path().join("docs/hello.md")).unwrap();
    assert_eq!(md, "## string Hello\n\nReturns greeting.");
}

#[test]
fn missing_root_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut progress = Vec::new();
    let err = generate(&config(dir.path(), Syntax::HASH), &mut progress).unwrap_err();
    assert!(matches!(err, Error::Scan { .. }), "{}", err);
}

#[test]
fn missing_output_directory_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/hello.coffee"), HELLO).unwrap();

    let mut progress = Vec::new();
    let err = generate(&config(dir.path(), Syntax::HASH), &mut progress).unwrap_err();
    assert!(matches!(err, Error::Write { .. }), "{}", err);
    assert!(!dir.path().join("docs").exists());
}

struct ClosedPipe;

impl io::Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::from(io::ErrorKind::BrokenPipe))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn failed_progress_write_is_fatal() {
    let dir = workspace();
    fs::write(dir.path().join("src/hello.coffee"), HELLO).unwrap();

    let err = generate(&config(dir.path(), Syntax::HASH), &mut ClosedPipe).unwrap_err();
    assert!(matches!(err, Error::Progress(_)), "{}", err);
    assert!(!dir.path().join("docs/hello.md").exists());
}
